//! Sources of commit messages.

use serde::{Deserialize, Serialize};

use crate::headers::HeaderSet;
use crate::sections::{self, SectionMap};

/// Anything that carries a raw commit message.
pub trait Changeset {
    fn message(&self) -> &str;
}

impl Changeset for str {
    fn message(&self) -> &str {
        self
    }
}

impl Changeset for String {
    fn message(&self) -> &str {
        self
    }
}

/// A commit message with an optional identifier (usually a revision hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitMessage {
    #[serde(default)]
    pub id: Option<String>,

    pub message: String,
}

impl CommitMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            id: None,
            message: message.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Replace the message with the rendered form of `sections`.
    pub fn set_sections(&mut self, sections: &SectionMap) {
        self.message = sections.to_string();
    }
}

impl Changeset for CommitMessage {
    fn message(&self) -> &str {
        &self.message
    }
}

/// Parse the sections of a changeset's message.
pub fn sections_of<C: Changeset + ?Sized>(
    changeset: &C,
    valid_sections: Option<&HeaderSet>,
) -> SectionMap {
    sections::parse(changeset.message(), valid_sections)
}
