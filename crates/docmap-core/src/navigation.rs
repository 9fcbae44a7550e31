//! Navigation file parser.
//!
//! Recovers the site title and the ordered chapter/topic structure from the
//! simplified YAML that documentation site generators use for navigation
//! (`mkdocs.yml` / `readthedocs.yml`). Only three shapes are recognized:
//!
//! ```yaml
//! site_name: My Guide
//! pages:
//!   - index.md
//!   - Guide:
//!     - Intro: intro.md
//! ```
//!
//! Everything else is ignored. This is not a YAML parser.

use serde::Serialize;

use crate::text::normalize;

/// Title of the synthetic first chapter holding the abstract topic.
pub const ABSTRACT_CHAPTER_TITLE: &str = "Abstract";

const SITE_NAME_KEY: &str = "site_name:";
const PAGES_KEY: &str = "pages:";

/// A leaf navigation entry pointing at a content file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Topic {
    /// Display title (may be empty for bare `- file.md` entries).
    pub title: String,
    /// Relative path to the content file. Never empty.
    pub href: String,
}

impl Topic {
    /// Create a new topic.
    #[must_use]
    pub fn new(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
        }
    }
}

/// A navigation group with its topics in source order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Chapter {
    /// Navigation title, rendered as the chapter's `<navtitle>`.
    pub title: String,
    /// Topics in source order.
    pub topics: Vec<Topic>,
}

impl Chapter {
    /// Create a chapter with no topics.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            topics: Vec::new(),
        }
    }
}

/// Parsed navigation file.
///
/// The first chapter is always the synthetic [`ABSTRACT_CHAPTER_TITLE`]
/// chapter; entries listed before the first chapter header land there. Only
/// its first topic is the abstract, the renderer drops the rest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavigationDocument {
    /// Site title from `site_name:`, empty if absent.
    title: String,
    chapters: Vec<Chapter>,
}

impl NavigationDocument {
    /// Create an empty document holding only the abstract chapter.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            chapters: vec![Chapter::new(ABSTRACT_CHAPTER_TITLE)],
        }
    }

    /// Build a document from an abstract chapter and the real chapters.
    ///
    /// The abstract chapter is retitled so the first-chapter invariant holds.
    #[must_use]
    pub fn from_parts(
        title: impl Into<String>,
        abstract_topics: Vec<Topic>,
        chapters: impl IntoIterator<Item = Chapter>,
    ) -> Self {
        let mut doc = Self::new(title);
        doc.chapters[0].topics = abstract_topics;
        doc.chapters.extend(chapters);
        doc
    }

    /// Site title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// All chapters, starting with the abstract chapter.
    #[must_use]
    pub fn all_chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// The synthetic abstract chapter.
    #[must_use]
    pub fn abstract_chapter(&self) -> &Chapter {
        &self.chapters[0]
    }

    /// The first topic of the abstract chapter, if any.
    #[must_use]
    pub fn abstract_topic(&self) -> Option<&Topic> {
        self.abstract_chapter().topics.first()
    }

    /// Real book chapters (everything after the abstract chapter).
    #[must_use]
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters[1..]
    }

    /// Total number of topics across all chapters.
    #[must_use]
    pub fn topic_count(&self) -> usize {
        self.chapters.iter().map(|c| c.topics.len()).sum()
    }
}

/// Parse a navigation file.
///
/// Never fails: unknown keys, blank lines and malformed entries are skipped.
/// The `pages:` block ends at the next top-level key, i.e. a key line
/// indented no deeper than `pages:` itself.
///
/// # Example
///
/// ```
/// use docmap_core::parse;
///
/// let doc = parse("site_name: Sample\npages:\n  - index.md\n  - Guide:\n    - Intro: intro.md\n");
/// assert_eq!(doc.title(), "Sample");
/// assert_eq!(doc.abstract_topic().unwrap().href, "index.md");
/// assert_eq!(doc.chapters()[0].topics[0].title, "Intro");
/// ```
#[must_use]
pub fn parse(text: &str) -> NavigationDocument {
    let mut doc = NavigationDocument::new("");
    let mut current = 0;
    let mut pages_indent: Option<usize> = None;

    for raw in text.lines() {
        let line = raw.trim();
        let indent = raw.len() - raw.trim_start().len();

        if let Some(block_indent) = pages_indent
            && is_top_level_key(line, indent, block_indent)
        {
            tracing::trace!(line, "pages block ended");
            pages_indent = None;
        }

        if line.starts_with(SITE_NAME_KEY) {
            doc.title = normalize(line, SITE_NAME_KEY);
        } else if line.starts_with(PAGES_KEY) {
            pages_indent = Some(indent);
        } else if pages_indent.is_some() {
            let Some(entry) = line.strip_prefix('-') else {
                continue;
            };

            if let Some(header) = line.strip_suffix(':') {
                doc.chapters.push(Chapter::new(normalize(header, "-")));
                current += 1;
            } else if let Some(topic) = parse_topic(entry) {
                doc.chapters[current].topics.push(topic);
            } else {
                tracing::warn!(line, "Skipping navigation entry without a file reference");
            }
        }
    }

    doc
}

/// Parse a topic entry (the text after the leading `-`).
///
/// `Title: file.md` splits on the first colon; a bare `file.md` has an empty
/// title. Returns `None` if the href is empty.
fn parse_topic(entry: &str) -> Option<Topic> {
    let (title, href) = match entry.split_once(':') {
        Some((title, href)) => (normalize(title, ""), normalize(href, "")),
        None => (String::new(), normalize(entry, "")),
    };

    (!href.is_empty()).then_some(Topic { title, href })
}

/// Whether a line is a mapping key at or above the `pages:` indentation.
fn is_top_level_key(line: &str, indent: usize, pages_indent: usize) -> bool {
    indent <= pages_indent
        && !line.starts_with('-')
        && !line.starts_with('#')
        && line.contains(':')
}
