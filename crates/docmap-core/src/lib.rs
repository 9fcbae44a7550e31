//! Navigation YAML to DITA `BookMap` conversion.
//!
//! Turns the `pages:` navigation of a `ReadTheDocs` / `MkDocs` site description
//! into a DITA `BookMap` so the same Markdown sources can be published through
//! a DITA toolchain.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`normalize`] for cleaning up navigation values
//! - [`parse`] producing a [`NavigationDocument`]
//! - [`render`] producing the `BookMap` XML and an optional abstract [`Rename`]
//! - [`Converter`] running the whole pipeline over a [`FileSystem`]
//! - [`MockFileSystem`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```no_run
//! use docmap_core::{ConvertRequest, Converter, StdFileSystem};
//!
//! let converter = Converter::new(StdFileSystem);
//! let report = converter.convert(&ConvertRequest::new("mkdocs.yml", "docs"))?;
//! println!("wrote {}", report.output.display());
//! # Ok::<(), docmap_core::ConvertError>(())
//! ```

mod bookmap;
mod convert;
mod fs;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod navigation;
mod text;

pub use bookmap::{ABSTRACT_FILE, INDEX_FILE, RenderError, Rename, Rendered, render};
pub use convert::{ConvertError, ConvertReport, ConvertRequest, Converter, OUTPUT_FILE};
pub use fs::{FileSystem, StdFileSystem};
#[cfg(any(test, feature = "mock"))]
pub use mock::{FsOp, MockFileSystem};
pub use navigation::{ABSTRACT_CHAPTER_TITLE, Chapter, NavigationDocument, Topic, parse};
pub use text::normalize;
