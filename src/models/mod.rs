use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const DEFAULT_TITLE: &str = "Untitled Note";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated title and content, ready to be written to a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    /// Returns `None` when `content` is absent or empty. An absent or empty
    /// title falls back to [`DEFAULT_TITLE`].
    pub fn new(title: Option<String>, content: Option<String>) -> Option<Self> {
        let content = content.filter(|c| !c.is_empty())?;
        let title = title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        Some(Self { title, content })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_requires_content() {
        assert_eq!(NoteDraft::new(Some("Title".into()), None), None);
        assert_eq!(NoteDraft::new(Some("Title".into()), Some(String::new())), None);
    }

    #[test]
    fn draft_defaults_missing_or_empty_title() {
        let draft = NoteDraft::new(None, Some("buy milk".into())).unwrap();
        assert_eq!(draft.title, DEFAULT_TITLE);

        let draft = NoteDraft::new(Some(String::new()), Some("buy milk".into())).unwrap();
        assert_eq!(draft.title, DEFAULT_TITLE);
    }

    #[test]
    fn draft_keeps_given_title() {
        let draft = NoteDraft::new(Some("Shopping".into()), Some("buy eggs".into())).unwrap();
        assert_eq!(draft.title, "Shopping");
        assert_eq!(draft.content, "buy eggs");
    }
}
