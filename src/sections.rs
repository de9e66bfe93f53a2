//! Splitting commit messages into sections and putting them back together.
//!
//! Review tools such as Phabricator produce messages shaped like:
//!
//! ```text
//! Free-form preamble
//!
//! Summary:
//!   Foo bar
//! Test Plan:
//!   Baz
//! ```
//!
//! [`parse`] turns such a message into an ordered [`SectionMap`] keyed by the
//! lowercase header name, and [`build`] renders a map back into a message.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::headers::HeaderSet;

/// Key holding whatever text appears before the first recognized header.
pub const NO_HEADER: &str = "";

/// Ordered mapping from lowercase header name to section content.
///
/// Iteration order is insertion order, which is also the order [`build`]
/// renders sections in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionMap {
    entries: IndexMap<String, String>,
}

impl SectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a section, keeping the position of an existing key.
    pub fn insert(
        &mut self,
        header: impl Into<String>,
        content: impl Into<String>,
    ) -> Option<String> {
        self.entries.insert(header.into(), content.into())
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.entries.get(header).map(String::as_str)
    }

    pub fn contains(&self, header: &str) -> bool {
        self.entries.contains_key(header)
    }

    /// Remove a section, preserving the order of the remaining ones.
    pub fn remove(&mut self, header: &str) -> Option<String> {
        self.entries.shift_remove(header)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Text that preceded the first header, if there was any.
    pub fn preamble(&self) -> Option<&str> {
        self.get(NO_HEADER)
    }

    /// Parse a section map from a TOML document of string keys and values.
    pub fn from_toml(content: &str) -> Result<Self, Error> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize the map to TOML, one key per section in map order.
    pub fn to_toml(&self) -> Result<String, Error> {
        Ok(toml::to_string(self)?)
    }

    fn append(&mut self, header: &str, text: &str) {
        match self.entries.get_mut(header) {
            Some(content) => content.push_str(text),
            None => {
                self.entries.insert(header.to_string(), text.to_string());
            }
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SectionMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for SectionMap {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Display for SectionMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&build(self))
    }
}

/// Split a line of the form `Header: value` into its lowercase header and
/// trimmed value.
///
/// The header must start the line and consist only of ASCII letters and
/// spaces, immediately followed by a colon.
fn split_header(line: &str) -> Option<(String, &str)> {
    let len = line
        .bytes()
        .take_while(|b| b.is_ascii_alphabetic() || *b == b' ')
        .count();
    if len == 0 || line.as_bytes().get(len) != Some(&b':') {
        return None;
    }
    let header = line[..len].to_ascii_lowercase();
    Some((header, trim(&line[len + 1..])))
}

/// Parse a commit message into its sections.
///
/// If `valid_sections` is given, header-like lines whose header is not in the
/// set are kept as content of the current section. If it is `None`, every
/// line matching `^[a-zA-Z ]+:` starts a new section.
///
/// With a vocabulary, a header whose value is itself a known header is
/// unwrapped: `Summary: FBOnly: bar` is treated as `FBOnly: bar`.
pub fn parse(message: &str, valid_sections: Option<&HeaderSet>) -> SectionMap {
    let mut sections = SectionMap::new();
    sections.insert(NO_HEADER, "");
    let mut current = NO_HEADER.to_string();

    for line in message.split('\n') {
        let line = line.trim_end_matches(TRIMMED);

        if let Some((mut header, mut value)) = split_header(line) {
            let accepted = valid_sections.is_none_or(|valid| valid.contains(&header));
            if accepted {
                if let Some(valid) = valid_sections
                    && let Some((nested, rest)) = split_header(value)
                    && valid.contains(&nested)
                {
                    tracing::debug!(outer = %header, inner = %nested, "unwrapping nested header");
                    header = nested;
                    value = rest;
                }

                if sections.contains(&header) {
                    tracing::debug!(%header, "header repeated, appending inline value");
                }
                tracing::trace!(%header, "section boundary");
                sections.append(&header, value);
                current = header;
                continue;
            }
            tracing::debug!(%header, "header not in vocabulary, treating as content");
        }

        sections.append(&current, "\n");
        sections.append(&current, line);
    }

    if sections.preamble() == Some("") {
        sections.remove(NO_HEADER);
    }

    let sections: SectionMap = sections
        .into_iter()
        .map(|(header, content)| (header, trim(&content).to_string()))
        .collect();
    tracing::debug!(count = sections.len(), "parsed commit message sections");
    sections
}

/// Render a section map back into a commit message.
///
/// Blank sections are skipped. Content with more than one non-blank line
/// starts on the line after its header; anything shorter stays inline.
pub fn build(sections: &SectionMap) -> String {
    let mut out = String::new();

    for (header, content) in sections.iter() {
        if is_blank(content) {
            continue;
        }
        let content = trim(content);

        out.push_str(&capitalize_words(header));
        out.push(':');
        out.push(if has_multiple_lines(content) { '\n' } else { ' ' });
        out.push_str(content);
        out.push_str("\n\n");
    }

    let len = out.trim_end_matches(TRIMMED).len();
    out.truncate(len);
    tracing::debug!(sections = sections.len(), bytes = out.len(), "built commit message");
    out
}

/// Characters stripped when trimming lines and section content.
///
/// ASCII only: a non-breaking space is content.
const TRIMMED: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

fn trim(text: &str) -> &str {
    text.trim_matches(TRIMMED)
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

fn is_blank(text: &str) -> bool {
    text.chars().all(is_space)
}

fn has_multiple_lines(text: &str) -> bool {
    text.split('\n').filter(|line| !is_blank(line)).nth(1).is_some()
}

/// Uppercase the first letter of every whitespace-delimited word.
fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = is_space(c);
    }
    out
}

/// Errors converting section maps to and from TOML.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse section map")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize section map")]
    Serialize(#[from] toml::ser::Error),
}
