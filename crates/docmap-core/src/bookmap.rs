//! DITA `BookMap` renderer.
//!
//! Serializes a [`NavigationDocument`] into a `BookMap`: the abstract topic goes
//! to `<frontmatter>`, every other chapter becomes a `<chapter>` with one
//! `<topicref>` per topic, in source order.

use std::fmt::{self, Write};
use std::path::{Path, PathBuf};

use quick_xml::escape::escape;

use crate::navigation::{Chapter, NavigationDocument};

/// Abstract file name that gets renamed before rendering.
pub const INDEX_FILE: &str = "index.md";

/// Name the abstract file is renamed to.
pub const ABSTRACT_FILE: &str = "abstract.md";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const BOOKMAP_DOCTYPE: &str =
    "<!DOCTYPE bookmap\n  PUBLIC \"-//OASIS//DTD DITA BookMap//EN\" \"bookmap.dtd\">";

/// Error returned by the renderer.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The abstract chapter has no topics.
    #[error("abstract topic missing")]
    MissingAbstract,
}

/// A file move the caller must perform before writing the rendered map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rename {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Result of rendering a navigation document.
#[derive(Debug, PartialEq, Eq)]
pub struct Rendered {
    /// Complete `BookMap` document.
    pub xml: String,
    /// Pending rename of the abstract file, if its name changed.
    pub rename: Option<Rename>,
    /// Topics referenced by the map, abstract included.
    pub topics: usize,
}

/// Render a navigation document as a `BookMap`.
///
/// If the abstract topic points at `index.md`, the map references
/// `abstract.md` instead and [`Rendered::rename`] asks for
/// `{base_dir}/index.md` to be moved accordingly.
///
/// Only the first topic of the abstract chapter is rendered; any further
/// topics listed before the first chapter header are dropped with a warning.
///
/// # Errors
///
/// Returns [`RenderError::MissingAbstract`] if the document has no abstract topic.
pub fn render(doc: &NavigationDocument, base_dir: &Path) -> Result<Rendered, RenderError> {
    let abstract_href = doc
        .abstract_topic()
        .map(|topic| topic.href.as_str())
        .ok_or(RenderError::MissingAbstract)?;

    let (abstract_href, rename) = if abstract_href == INDEX_FILE {
        let rename = Rename {
            from: base_dir.join(INDEX_FILE),
            to: base_dir.join(ABSTRACT_FILE),
        };
        (ABSTRACT_FILE, Some(rename))
    } else {
        (abstract_href, None)
    };

    for topic in doc.abstract_chapter().topics.iter().skip(1) {
        tracing::warn!(
            href = %topic.href,
            "Dropping topic listed before the first chapter; only the abstract is kept"
        );
    }

    let xml = BookMap {
        title: doc.title(),
        abstract_href,
        chapters: doc.chapters(),
    }
    .to_string();
    let topics = 1 + doc
        .chapters()
        .iter()
        .map(|chapter| chapter.topics.len())
        .sum::<usize>();

    Ok(Rendered {
        xml,
        rename,
        topics,
    })
}

/// `BookMap` view over a navigation document.
struct BookMap<'a> {
    title: &'a str,
    abstract_href: &'a str,
    chapters: &'a [Chapter],
}

impl fmt::Display for BookMap<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{XML_DECLARATION}")?;
        writeln!(f, "{BOOKMAP_DOCTYPE}")?;
        writeln!(f, "<bookmap>")?;
        writeln!(f, "  <title>{}</title>", escape(self.title))?;
        writeln!(f, "  <frontmatter>")?;
        writeln!(
            f,
            r#"    <bookabstract format="md" href="{}"/>"#,
            escape(self.abstract_href)
        )?;
        writeln!(f, "    <booklists>")?;
        writeln!(f, "      <toc/>")?;
        writeln!(f, "    </booklists>")?;
        writeln!(f, "  </frontmatter>")?;
        for chapter in self.chapters {
            write_chapter(f, chapter)?;
        }
        writeln!(f, "</bookmap>")
    }
}

fn write_chapter(out: &mut impl Write, chapter: &Chapter) -> fmt::Result {
    writeln!(out, "  <chapter>")?;
    writeln!(out, "    <topicmeta>")?;
    writeln!(out, "      <navtitle>{}</navtitle>", escape(&chapter.title))?;
    writeln!(out, "    </topicmeta>")?;
    for topic in &chapter.topics {
        writeln!(
            out,
            r#"    <topicref format="md" href="{}"/>"#,
            escape(&topic.href)
        )?;
    }
    writeln!(out, "  </chapter>")
}
