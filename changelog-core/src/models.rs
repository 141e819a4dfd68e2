use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Server-assigned changelog identifier.
pub type ChangelogId = Uuid;

/// A versioned release note. Field names are the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changelog {
    pub id: ChangelogId,
    pub version: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub raw_git_diff: Option<String>,
    pub generated_content: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

impl Changelog {
    /// Build a fresh draft from submitted input. Only the server side calls this.
    pub fn new(input: ChangelogInput, generated_content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: input.version,
            title: input.title,
            description: input.description,
            raw_git_diff: input.git_diff,
            generated_content,
            published: false,
            created_at: Utc::now(),
        }
    }

    /// Full-field update; `id`, `published` and `created_at` are untouched.
    pub fn apply_input(&mut self, input: ChangelogInput, generated_content: String) {
        self.version = input.version;
        self.title = input.title;
        self.description = input.description;
        self.raw_git_diff = input.git_diff;
        self.generated_content = generated_content;
    }

    pub fn with_published(mut self, published: bool) -> Self {
        self.published = published;
        self
    }

    pub fn is_draft(&self) -> bool {
        !self.published
    }

    /// The form contents that would resubmit this entry unchanged.
    pub fn to_input(&self) -> ChangelogInput {
        ChangelogInput {
            version: self.version.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            git_diff: self.raw_git_diff.clone(),
        }
    }
}

/// Body of `POST /api/changelogs/` and `PUT /api/changelogs/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogInput {
    pub version: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub git_diff: Option<String>,
}

impl ChangelogInput {
    pub fn new(version: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            title: title.into(),
            description: None,
            git_diff: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_git_diff(mut self, git_diff: impl Into<String>) -> Self {
        self.git_diff = Some(git_diff.into());
        self
    }

    /// Description with empty strings treated as absent.
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn git_diff_text(&self) -> Option<&str> {
        self.git_diff.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Body of `PATCH /api/changelogs/{id}/publish`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishRequest {
    pub published: bool,
}

/// Which slice of the collection a viewer sees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogFilter {
    #[serde(default)]
    pub published_only: bool,
}

impl ChangelogFilter {
    pub fn all() -> Self {
        Self {
            published_only: false,
        }
    }

    pub fn published_only() -> Self {
        Self {
            published_only: true,
        }
    }

    pub fn matches(&self, changelog: &Changelog) -> bool {
        !self.published_only || changelog.published
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changelog_creation() {
        let input = ChangelogInput::new("1.0.0", "Launch").with_description("First release");
        let changelog = Changelog::new(input, "# Launch".to_string());

        assert_eq!(changelog.version, "1.0.0");
        assert_eq!(changelog.title, "Launch");
        assert_eq!(changelog.description.as_deref(), Some("First release"));
        assert!(changelog.is_draft());
    }

    #[test]
    fn test_apply_input_keeps_identity() {
        let mut changelog = Changelog::new(ChangelogInput::new("1.0.0", "Launch"), String::new())
            .with_published(true);
        let id = changelog.id;
        let created_at = changelog.created_at;

        changelog.apply_input(
            ChangelogInput::new("1.0.1", "Patch").with_git_diff("diff --git a/x b/x"),
            "# Patch".to_string(),
        );

        assert_eq!(changelog.id, id);
        assert_eq!(changelog.created_at, created_at);
        assert!(changelog.published);
        assert_eq!(changelog.version, "1.0.1");
        assert_eq!(changelog.raw_git_diff.as_deref(), Some("diff --git a/x b/x"));
        assert_eq!(changelog.generated_content, "# Patch");
    }

    #[test]
    fn test_wire_field_names() {
        let changelog = Changelog::new(ChangelogInput::new("2.0", "Big"), "body".to_string());
        let value = serde_json::to_value(&changelog).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();

        assert_eq!(
            keys,
            vec![
                "created_at",
                "description",
                "generated_content",
                "id",
                "published",
                "raw_git_diff",
                "title",
                "version"
            ]
        );
    }

    #[test]
    fn test_input_accepts_missing_optionals() {
        let input: ChangelogInput =
            serde_json::from_str(r#"{"version":"1.0","title":"t"}"#).unwrap();

        assert_eq!(input.description, None);
        assert_eq!(input.git_diff, None);
    }

    #[test]
    fn test_filter_matches() {
        let draft = Changelog::new(ChangelogInput::new("1", "a"), String::new());
        let published = draft.clone().with_published(true);

        assert!(ChangelogFilter::all().matches(&draft));
        assert!(!ChangelogFilter::published_only().matches(&draft));
        assert!(ChangelogFilter::published_only().matches(&published));
    }
}
