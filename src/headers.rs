//! Header vocabularies.
//!
//! A vocabulary is the set of header names [`parse`](crate::parse) treats as
//! section boundaries. It is plain data: embedders can extend the default set
//! or load their own from TOML without touching the parser.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sections::{NO_HEADER, SectionMap};

/// Header names commonly found in Phabricator and ShipIt commit messages.
pub mod known {
    pub const SUMMARY: &str = "summary";
    pub const FACEBOOK: &str = "facebook";
    pub const GITHUB_AUTHOR: &str = "github author";
    pub const GITHUB_PR_SYNC: &str = "github pr sync";
    pub const TEST_PLAN: &str = "test plan";
    /// Phabricator alias for [`TEST_PLAN`].
    pub const TESTS: &str = "tests";
    pub const REVIEWERS: &str = "reviewers";
    pub const REVIEWED_BY: &str = "reviewed by";
    pub const DIFFERENTIAL_REVISION: &str = "differential revision";
    pub const BLAME_REVISION: &str = "blame revision";
    pub const TAGS: &str = "tags";
    pub const TASK_ID: &str = "task id";
    pub const TASKS: &str = "tasks";
    pub const SUBSCRIBERS: &str = "subscribers";
    /// Phabricator alias for [`SUBSCRIBERS`].
    pub const CC: &str = "cc";
    pub const SIGNATURE: &str = "signature";
    pub const COMMITTER: &str = "committer";
    pub const PULLED_BY: &str = "pulled by";
    pub const PULL_REQUEST_RESOLVED: &str = "pull request resolved";

    pub(crate) const ALL: &[&str] = &[
        SUMMARY,
        FACEBOOK,
        GITHUB_AUTHOR,
        GITHUB_PR_SYNC,
        TEST_PLAN,
        TESTS,
        REVIEWERS,
        REVIEWED_BY,
        DIFFERENTIAL_REVISION,
        BLAME_REVISION,
        TAGS,
        TASK_ID,
        TASKS,
        SUBSCRIBERS,
        CC,
        SIGNATURE,
        COMMITTER,
        PULLED_BY,
        PULL_REQUEST_RESOLVED,
    ];
}

/// An ordered set of lowercase header names.
///
/// Aliases such as `tests` and `test plan` are distinct entries; mapping one
/// onto the other is left to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderSet {
    headers: IndexSet<String>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The vocabulary used by Phabricator-style review tools.
    pub fn phabricator() -> Self {
        known::ALL.iter().collect()
    }

    /// The headers of an existing section map, without the preamble key.
    ///
    /// Parsing the built form of `sections` with this vocabulary splits it
    /// along the same boundaries.
    pub fn from_sections(sections: &SectionMap) -> Self {
        sections.headers().filter(|h| *h != NO_HEADER).collect()
    }

    /// Add a header, returning `false` if it was already present.
    pub fn insert(&mut self, header: &str) -> bool {
        self.headers.insert(header.to_ascii_lowercase())
    }

    /// Check membership, ignoring ASCII case.
    pub fn contains(&self, header: &str) -> bool {
        if header.bytes().any(|b| b.is_ascii_uppercase()) {
            self.headers.contains(&header.to_ascii_lowercase())
        } else {
            self.headers.contains(header)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.headers.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Parse a vocabulary document such as `headers = ["summary", "test plan"]`.
    pub fn from_toml(content: &str) -> Result<Self, Error> {
        let raw: HeaderSet = toml::from_str(content)?;
        // Normalise case of hand-written entries.
        Ok(raw.iter().collect())
    }

    /// Serialize the vocabulary back to TOML.
    pub fn to_toml(&self) -> Result<String, Error> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl<S: AsRef<str>> FromIterator<S> for HeaderSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<S: AsRef<str>> Extend<S> for HeaderSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for header in iter {
            self.insert(header.as_ref());
        }
    }
}

/// Errors converting vocabularies to and from TOML.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse header vocabulary")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize header vocabulary")]
    Serialize(#[from] toml::ser::Error),
}
