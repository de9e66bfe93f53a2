//! commit-sections: split commit messages into `Header: content` sections.
//!
//! Review tools such as Phabricator write commit messages as a free-form
//! preamble followed by blocks like `Summary:`, `Test Plan:` and
//! `Reviewed By:`. This crate turns such a message into an ordered map of
//! sections and renders a map back into a canonical message.
//!
//! # Architecture
//!
//! - **Sections**: [`parse`] and [`build`] over a [`SectionMap`]
//! - **Headers**: the [`HeaderSet`] vocabulary deciding what counts as a header
//! - **Changeset**: the [`Changeset`] trait for things that carry a message
//!
//! ```
//! use commit_sections::{HeaderSet, build, parse};
//!
//! let vocab: HeaderSet = ["summary", "test plan"].into_iter().collect();
//! let sections = parse("Summary: foo\nTest Plan:\n  one\n  two", Some(&vocab));
//! assert_eq!(sections.get("summary"), Some("foo"));
//! assert_eq!(build(&sections), "Summary: foo\n\nTest Plan:\none\n  two");
//! ```

mod changeset;
pub mod headers;
pub mod sections;

pub use changeset::{Changeset, CommitMessage, sections_of};
pub use headers::{HeaderSet, known};
pub use sections::{NO_HEADER, SectionMap, build, parse};
