//! Produces the markdown stored in `generated_content`.

use crate::diff::DiffStat;
use crate::models::ChangelogInput;

/// Turns submitted changelog fields into publishable markdown.
pub trait ContentGenerator: Send + Sync {
    fn generate(&self, input: &ChangelogInput) -> String;
}

/// Deterministic markdown built from the input fields and a diff summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateGenerator;

/// Cap on the per-file lines listed under "Files changed".
const MAX_LISTED_FILES: usize = 10;

impl ContentGenerator for TemplateGenerator {
    fn generate(&self, input: &ChangelogInput) -> String {
        let mut out = format!("# {} (v{})\n", input.title.trim(), input.version.trim());

        if let Some(description) = input.description_text() {
            out.push('\n');
            out.push_str(description.trim());
            out.push('\n');
        }

        if let Some(git_diff) = input.git_diff_text() {
            let stat = DiffStat::parse(git_diff);
            if !stat.is_empty() {
                out.push_str("\n## Files changed\n\n");
                for file in stat.files.iter().take(MAX_LISTED_FILES) {
                    out.push_str(&format!(
                        "- `{}` (+{} -{})\n",
                        file.path, file.insertions, file.deletions
                    ));
                }
                if stat.files.len() > MAX_LISTED_FILES {
                    out.push_str(&format!(
                        "- and {} more\n",
                        stat.files.len() - MAX_LISTED_FILES
                    ));
                }
                out.push_str(&format!(
                    "\n{} file(s) changed, {} insertion(s), {} deletion(s)\n",
                    stat.files.len(),
                    stat.insertions(),
                    stat.deletions()
                ));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_version_heading() {
        let content = TemplateGenerator.generate(&ChangelogInput::new(" 1.0.0 ", "Launch"));

        assert_eq!(content, "# Launch (v1.0.0)\n");
    }

    #[test]
    fn test_description_included() {
        let input = ChangelogInput::new("1.0", "Launch").with_description("Our first release.");
        let content = TemplateGenerator.generate(&input);

        assert!(content.contains("\nOur first release.\n"));
        assert!(!content.contains("Files changed"));
    }

    #[test]
    fn test_diff_summary_section() {
        let input = ChangelogInput::new("1.1", "Fixes")
            .with_git_diff("diff --git a/a.rs b/a.rs\n--- a/a.rs\n+++ b/a.rs\n@@ -1 +1 @@\n-x\n+y\n");
        let content = TemplateGenerator.generate(&input);

        assert!(content.contains("## Files changed"));
        assert!(content.contains("- `a.rs` (+1 -1)"));
        assert!(content.contains("1 file(s) changed, 1 insertion(s), 1 deletion(s)"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let input = ChangelogInput::new("2.0", "Again").with_description("same");

        assert_eq!(
            TemplateGenerator.generate(&input),
            TemplateGenerator.generate(&input)
        );
    }
}
