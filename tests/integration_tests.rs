//! Integration tests for tfshift.
//!
//! These tests verify the end-to-end functionality of the walker,
//! rewrite pipeline, and reporter modules against scratch example trees.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tfshift::{Config, ReportFormat, Rewriter, TfShiftError};

/// Create a scratch project root with an `examples` subdirectory.
fn project_tree() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let examples = dir.path().join("examples");
    fs::create_dir_all(&examples).unwrap();
    (dir, examples)
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

fn config_with(tag: &str, to_github: bool, update_tag: bool) -> Config {
    let mut config = Config::default();
    config.rewrite.tag_version = tag.to_string();
    config.rewrite.to_github = to_github;
    config.rewrite.update_tag = update_tag;
    config
}

mod rewrite_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_to_github_converts_module_subpath() {
        let (root, examples) = project_tree();
        let file = examples.join("eks/main.tf");
        write(
            &file,
            concat!(
                "module \"irsa\" {\n",
                "  source = \"../modules/irsa\"\n",
                "\n",
                "  cluster_name = var.cluster_name\n",
                "}\n",
            ),
        );

        let rewriter = Rewriter::new(config_with("v5.0.0", true, false));
        let result = rewriter
            .rewrite_tree(&examples, root.path(), false)
            .await
            .unwrap();

        assert_eq!(result.files_changed(), 1);
        assert_eq!(
            read(&file),
            concat!(
                "module \"irsa\" {\n",
                "  source = \"github.com/aws-ia/terraform-aws-eks-blueprints//modules/irsa?ref=v5.0.0\"\n",
                "\n",
                "  cluster_name = var.cluster_name\n",
                "}\n",
            )
        );
    }

    #[tokio::test]
    async fn test_to_github_root_module_collapses() {
        let (root, examples) = project_tree();
        let file = examples.join("complete/main.tf");
        write(&file, "  source = \"../..\"\n");

        let rewriter = Rewriter::new(config_with("v5.0.0", true, false));
        rewriter
            .rewrite_tree(&examples, root.path(), false)
            .await
            .unwrap();

        assert_eq!(
            read(&file),
            "  source = \"github.com/aws-ia/terraform-aws-eks-blueprints?ref=v5.0.0\"\n"
        );
    }

    #[tokio::test]
    async fn test_update_tag_replaces_existing_ref() {
        let (root, examples) = project_tree();
        let file = examples.join("eks/main.tf");
        write(
            &file,
            "  source = \"github.com/aws-ia/terraform-aws-eks-blueprints?ref=v4.4.0\"\n",
        );

        let rewriter = Rewriter::new(config_with("v4.5.0", false, true));
        rewriter
            .rewrite_tree(&examples, root.path(), false)
            .await
            .unwrap();

        assert_eq!(
            read(&file),
            "  source = \"github.com/aws-ia/terraform-aws-eks-blueprints?ref=v4.5.0\"\n"
        );
    }

    #[tokio::test]
    async fn test_update_tag_is_idempotent() {
        let (root, examples) = project_tree();
        let file = examples.join("eks/main.tf");
        write(
            &file,
            "  source = \"github.com/aws-ia/terraform-aws-eks-blueprints//modules/irsa?ref=v4.4.0\"\n",
        );

        let rewriter = Rewriter::new(config_with("v4.5.0", false, true));
        rewriter
            .rewrite_tree(&examples, root.path(), false)
            .await
            .unwrap();
        let once = read(&file);

        rewriter
            .rewrite_tree(&examples, root.path(), false)
            .await
            .unwrap();

        assert_eq!(read(&file), once);
        assert!(once.contains("?ref=v4.5.0\""));
    }

    #[tokio::test]
    async fn test_to_local_module_subpath() {
        let (root, examples) = project_tree();
        let file = examples.join("eks/main.tf");
        write(
            &file,
            "  source = \"github.com/aws-ia/terraform-aws-eks-blueprints//modules/irsa?ref=v4.4.0\"\n",
        );

        let rewriter = Rewriter::new(config_with("v4.4.0", false, false));
        rewriter
            .rewrite_tree(&examples, root.path(), false)
            .await
            .unwrap();

        assert_eq!(read(&file), "  source = \"../../modules/irsa\"\n");
    }

    #[tokio::test]
    async fn test_to_local_root_module_uses_tree_depth() {
        let (root, examples) = project_tree();
        let file = examples.join("foo/bar/main.tf");
        write(
            &file,
            "  source = \"github.com/aws-ia/terraform-aws-eks-blueprints\"\n",
        );

        let rewriter = Rewriter::new(config_with("v4.4.0", false, false));
        rewriter
            .rewrite_tree(&examples, root.path(), false)
            .await
            .unwrap();

        assert_eq!(read(&file), "  source = \"../../..\"\n");
    }

    #[tokio::test]
    async fn test_round_trip_preserves_module_paths() {
        let (root, examples) = project_tree();
        let file = examples.join("eks/main.tf");
        let original = concat!(
            "module \"vpc\" {\n",
            "  source = \"../../modules/vpc\"\n",
            "}\n",
        );
        write(&file, original);

        let to_github = Rewriter::new(config_with("v5.0.0", true, false));
        to_github
            .rewrite_tree(&examples, root.path(), false)
            .await
            .unwrap();
        assert!(read(&file).contains("//modules/vpc?ref=v5.0.0"));

        let to_local = Rewriter::new(config_with("v5.0.0", false, false));
        to_local
            .rewrite_tree(&examples, root.path(), false)
            .await
            .unwrap();

        pretty_assertions::assert_eq!(read(&file), original);
    }

    #[tokio::test]
    async fn test_files_without_sources_are_untouched() {
        let (root, examples) = project_tree();
        let file = examples.join("plain/main.tf");
        let original = concat!(
            "# A file with no module sources\n",
            "resource \"aws_vpc\" \"this\" {\n",
            "  cidr_block = \"10.0.0.0/16\"\n",
            "}\n",
        );
        write(&file, original);

        let rewriter = Rewriter::new(config_with("v5.0.0", true, false));
        let result = rewriter
            .rewrite_tree(&examples, root.path(), false)
            .await
            .unwrap();

        assert_eq!(result.files_changed(), 0);
        assert_eq!(read(&file), original);
    }

    #[tokio::test]
    async fn test_unrelated_lines_pass_through() {
        let (root, examples) = project_tree();
        let file = examples.join("eks/main.tf");
        write(
            &file,
            concat!(
                "# irsa module, see ../modules/irsa for details\n",
                "module \"irsa\" {\n",
                "  source   = \"../modules/irsa\"\n",
                "  role_arn = var.role_arn # unrelated = \"value\"\n",
                "}\n",
            ),
        );

        let rewriter = Rewriter::new(config_with("v5.0.0", true, false));
        rewriter
            .rewrite_tree(&examples, root.path(), false)
            .await
            .unwrap();

        let rewritten = read(&file);
        // The comment does not contain the quoted string, so it survives
        assert!(rewritten.contains("# irsa module, see ../modules/irsa for details"));
        assert!(rewritten.contains("role_arn = var.role_arn # unrelated = \"value\""));
        assert!(rewritten.contains("source   = \"github.com/aws-ia/terraform-aws-eks-blueprints//modules/irsa?ref=v5.0.0\""));
    }

    #[tokio::test]
    async fn test_dry_run_leaves_files_untouched() {
        let (root, examples) = project_tree();
        let file = examples.join("eks/main.tf");
        let original = "  source = \"../modules/irsa\"\n";
        write(&file, original);

        let rewriter = Rewriter::new(config_with("v5.0.0", true, false));
        let result = rewriter
            .rewrite_tree(&examples, root.path(), true)
            .await
            .unwrap();

        assert_eq!(result.files_changed(), 1);
        assert_eq!(result.substitution_count(), 1);
        assert_eq!(read(&file), original);
    }

    #[tokio::test]
    async fn test_terraform_directories_are_never_rewritten() {
        let (root, examples) = project_tree();
        let cached = examples.join("eks/.terraform/modules/irsa/main.tf");
        let original = "  source = \"../modules/irsa\"\n";
        write(&cached, original);
        write(&examples.join("eks/main.tf"), original);

        let rewriter = Rewriter::new(config_with("v5.0.0", true, false));
        let result = rewriter
            .rewrite_tree(&examples, root.path(), false)
            .await
            .unwrap();

        assert_eq!(result.files_scanned(), 1);
        assert_eq!(read(&cached), original);
        assert!(read(&examples.join("eks/main.tf")).contains("?ref=v5.0.0"));
    }

    #[tokio::test]
    async fn test_missing_examples_directory_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("examples");

        let rewriter = Rewriter::new(config_with("v5.0.0", true, false));
        let result = rewriter
            .rewrite_tree(&missing, dir.path(), false)
            .await
            .unwrap();

        assert_eq!(result.files_scanned(), 0);
    }

    #[tokio::test]
    async fn test_conflicting_modes_are_rejected() {
        let (root, examples) = project_tree();

        let rewriter = Rewriter::new(config_with("v5.0.0", true, true));
        let result = rewriter.rewrite_tree(&examples, root.path(), false).await;

        assert!(matches!(result, Err(TfShiftError::ModeConflict { .. })));
    }

    #[tokio::test]
    async fn test_multiple_sources_in_one_file() {
        let (root, examples) = project_tree();
        let file = examples.join("complete/main.tf");
        write(
            &file,
            concat!(
                "  source = \"../modules/irsa\"\n",
                "  source = \"../modules/vpc/endpoints\"\n",
                "  source = \"terraform-aws-modules/eks/aws\"\n",
            ),
        );

        let rewriter = Rewriter::new(config_with("v5.0.0", true, false));
        let result = rewriter
            .rewrite_tree(&examples, root.path(), false)
            .await
            .unwrap();

        assert_eq!(result.substitution_count(), 2);
        let rewritten = read(&file);
        assert!(rewritten.contains("//modules/irsa?ref=v5.0.0"));
        assert!(rewritten.contains("//modules/vpc/endpoints?ref=v5.0.0"));
        // Registry sources are not rewrite candidates
        assert!(rewritten.contains("\"terraform-aws-modules/eks/aws\""));
    }
}

mod reporter_tests {
    use super::*;
    use tfshift::reporter::Reporter;

    #[tokio::test]
    async fn test_json_report() {
        let (root, examples) = project_tree();
        write(
            &examples.join("eks/main.tf"),
            "  source = \"../modules/irsa\"\n",
        );

        let config = config_with("v5.0.0", true, false);
        let rewriter = Rewriter::new(config.clone());
        let result = rewriter
            .rewrite_tree(&examples, root.path(), true)
            .await
            .unwrap();

        let json = Reporter::new(&config)
            .generate(&result, ReportFormat::Json)
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed["metadata"]["version"].is_string());
        assert_eq!(parsed["metadata"]["dry_run"], true);
        assert_eq!(parsed["summary"]["files_scanned"], 1);
        assert_eq!(parsed["summary"]["total_substitutions"], 1);
    }

    #[tokio::test]
    async fn test_text_report() {
        let (root, examples) = project_tree();
        write(
            &examples.join("eks/main.tf"),
            "  source = \"../modules/irsa\"\n",
        );

        let mut config = config_with("v5.0.0", true, false);
        config.output.colored = false;
        let rewriter = Rewriter::new(config.clone());
        let result = rewriter
            .rewrite_tree(&examples, root.path(), true)
            .await
            .unwrap();

        let text = Reporter::new(&config)
            .generate(&result, ReportFormat::Text)
            .unwrap();

        assert!(text.contains("tfshift"));
        assert!(text.contains("to-github"));
        assert!(text.contains("?ref=v5.0.0"));
    }
}
