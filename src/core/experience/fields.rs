//! Two-phase comma-separated list fields.
//!
//! Free-text list inputs (question topics, resources used) are edited as a
//! single comma-separated string. Splitting on every keystroke would destroy
//! partially-typed input such as a trailing comma, so the raw text is held
//! verbatim while the field is being edited and only parsed into the
//! committed list when the field loses focus.

use serde::{Deserialize, Serialize};

/// An explicit draft/committed pair for a comma-separated list input.
///
/// `draft_text` is whatever the user has typed; `committed` is the parsed
/// list as of the last [`commit`](Self::commit). Commit is an explicit
/// transition fired on blur, never an implicit read-time conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommaListField {
    pub draft_text: String,
    pub committed: Vec<String>,
}

impl CommaListField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a field whose draft text matches an already-committed list.
    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let committed: Vec<String> = items.into_iter().map(Into::into).collect();
        Self {
            draft_text: committed.join(", "),
            committed,
        }
    }

    /// Replace the raw text without committing (the on-change path).
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.draft_text = text.into();
    }

    /// Parse the raw text into the committed list (the on-blur path).
    pub fn commit(&mut self) {
        self.committed = Self::parse(&self.draft_text);
    }

    /// Split on commas, trim entries, and drop empties.
    pub fn parse(text: &str) -> Vec<String> {
        text.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn items(&self) -> &[String] {
        &self.committed
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }
}
