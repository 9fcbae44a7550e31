//! Conversion pipeline: read, parse, render, rename, write.

use std::io;
use std::path::{Path, PathBuf};

use crate::bookmap::{RenderError, Rename, render};
use crate::fs::FileSystem;
use crate::navigation::{NavigationDocument, parse};

/// Name of the generated map inside the target directory.
pub const OUTPUT_FILE: &str = "document.ditamap";

/// Parameters of a single conversion.
///
/// Both fields are required for a conversion; they are optional here so a
/// missing one is reported as [`ConvertError::MissingParameter`] instead of
/// failing earlier. [`Converter::load`] only needs `file`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConvertRequest {
    /// Navigation file to read.
    pub file: Option<PathBuf>,
    /// Directory holding the content files; receives the map.
    pub dir: Option<PathBuf>,
}

impl ConvertRequest {
    /// Create a request with both parameters set.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, dir: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(file.into()),
            dir: Some(dir.into()),
        }
    }

    /// Check that both parameters are present.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::MissingParameter`] naming `dir` first, then `file`.
    pub fn validate(&self) -> Result<(&Path, &Path), ConvertError> {
        let dir = self
            .dir
            .as_deref()
            .ok_or(ConvertError::MissingParameter("dir"))?;
        let file = self
            .file
            .as_deref()
            .ok_or(ConvertError::MissingParameter("file"))?;
        Ok((file, dir))
    }

    /// Check only the navigation file, for callers that never write.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::MissingParameter`] if `file` is not set.
    pub fn source(&self) -> Result<&Path, ConvertError> {
        self.file
            .as_deref()
            .ok_or(ConvertError::MissingParameter("file"))
    }
}

/// Summary of a finished conversion.
#[derive(Debug, PartialEq, Eq)]
pub struct ConvertReport {
    /// Path of the written map.
    pub output: PathBuf,
    /// Rename performed on the abstract file, if any.
    pub renamed: Option<Rename>,
    /// Number of book chapters (abstract excluded).
    pub chapters: usize,
    /// Number of topics referenced by the map, abstract included.
    pub topics: usize,
}

/// Error returned by the converter.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// A required parameter was not supplied.
    #[error("You must supply a {0}")]
    MissingParameter(&'static str),

    /// The navigation file could not be read.
    #[error("Unable to read file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The navigation file has no usable structure.
    #[error("Unable to convert {}", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    /// The abstract file could not be renamed.
    #[error("Unable to rename {} to {}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The map could not be written.
    #[error("Unable to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Converts navigation files to `BookMap`s through a [`FileSystem`].
pub struct Converter<F> {
    fs: F,
}

impl<F: FileSystem> Converter<F> {
    /// Create a converter using the given file system.
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    /// Borrow the underlying file system.
    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Read and parse the navigation file without rendering.
    ///
    /// # Errors
    ///
    /// Returns an error if `file` is missing or cannot be read.
    pub fn load(&self, request: &ConvertRequest) -> Result<NavigationDocument, ConvertError> {
        self.read(request.source()?)
    }

    /// Run a full conversion.
    ///
    /// Steps run strictly in order and the first failure aborts: nothing is
    /// renamed or written after a read or render error, and the map is not
    /// written if the rename fails.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError`] for a missing parameter, an unreadable
    /// navigation file, a missing abstract topic, or a failed rename/write.
    pub fn convert(&self, request: &ConvertRequest) -> Result<ConvertReport, ConvertError> {
        let (file, dir) = request.validate()?;

        let doc = self.read(file)?;
        let rendered = render(&doc, dir).map_err(|source| ConvertError::Render {
            path: file.to_path_buf(),
            source,
        })?;

        if let Some(rename) = &rendered.rename {
            tracing::debug!(
                from = %rename.from.display(),
                to = %rename.to.display(),
                "Renaming abstract file"
            );
            self.fs
                .rename(&rename.from, &rename.to)
                .map_err(|source| ConvertError::Rename {
                    from: rename.from.clone(),
                    to: rename.to.clone(),
                    source,
                })?;
        }

        let output = dir.join(OUTPUT_FILE);
        self.fs
            .write(&output, &rendered.xml)
            .map_err(|source| ConvertError::Write {
                path: output.clone(),
                source,
            })?;

        let report = ConvertReport {
            output,
            renamed: rendered.rename,
            chapters: doc.chapters().len(),
            topics: rendered.topics,
        };
        tracing::info!(
            output = %report.output.display(),
            chapters = report.chapters,
            topics = report.topics,
            "Wrote BookMap"
        );
        Ok(report)
    }

    fn read(&self, file: &Path) -> Result<NavigationDocument, ConvertError> {
        let text = self
            .fs
            .read_to_string(file)
            .map_err(|source| ConvertError::Read {
                path: file.to_path_buf(),
                source,
            })?;
        Ok(parse(&text))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fs::StdFileSystem;
    use crate::mock::{FsOp, MockFileSystem};

    const NAV: &str = "\
site_name: Sample
pages:
  - index.md
  - Guide:
    - Intro: intro.md
    - Setup: setup.md
";

    fn converter_with_nav(nav: &str) -> Converter<MockFileSystem> {
        Converter::new(
            MockFileSystem::new()
                .with_file("/project/mkdocs.yml", nav)
                .with_file("/project/docs/index.md", "# Welcome"),
        )
    }

    fn request() -> ConvertRequest {
        ConvertRequest::new("/project/mkdocs.yml", "/project/docs")
    }

    #[test]
    fn test_validate_missing_dir() {
        let request = ConvertRequest {
            file: Some(PathBuf::from("mkdocs.yml")),
            dir: None,
        };

        let err = request.validate().unwrap_err();

        assert!(matches!(err, ConvertError::MissingParameter("dir")));
        assert_eq!(err.to_string(), "You must supply a dir");
    }

    #[test]
    fn test_validate_missing_file() {
        let request = ConvertRequest {
            file: None,
            dir: Some(PathBuf::from("docs")),
        };

        let err = request.validate().unwrap_err();

        assert_eq!(err.to_string(), "You must supply a file");
    }

    #[test]
    fn test_validate_reports_dir_before_file() {
        let err = ConvertRequest::default().validate().unwrap_err();

        assert!(matches!(err, ConvertError::MissingParameter("dir")));
    }

    #[test]
    fn test_missing_parameter_performs_no_io() {
        let converter = converter_with_nav(NAV);
        let request = ConvertRequest {
            file: Some(PathBuf::from("/project/mkdocs.yml")),
            dir: None,
        };

        let result = converter.convert(&request);

        assert!(result.is_err());
        assert!(converter.fs().ops().is_empty());
    }

    #[test]
    fn test_convert_renames_then_writes() {
        let converter = converter_with_nav(NAV);

        let report = converter.convert(&request()).unwrap();

        assert_eq!(
            converter.fs().ops(),
            vec![
                FsOp::Rename {
                    from: PathBuf::from("/project/docs/index.md"),
                    to: PathBuf::from("/project/docs/abstract.md"),
                },
                FsOp::Write {
                    path: PathBuf::from("/project/docs/document.ditamap"),
                },
            ]
        );
        assert_eq!(report.output, PathBuf::from("/project/docs/document.ditamap"));
        assert_eq!(report.chapters, 1);
        assert_eq!(report.topics, 3);
        assert!(report.renamed.is_some());

        let fs = converter.fs();
        assert!(!fs.exists("/project/docs/index.md"));
        assert_eq!(
            fs.file("/project/docs/abstract.md"),
            Some("# Welcome".to_owned())
        );
        let map = fs.file("/project/docs/document.ditamap").unwrap();
        assert!(map.contains(r#"<bookabstract format="md" href="abstract.md"/>"#));
        assert!(map.contains(r#"<topicref format="md" href="setup.md"/>"#));
    }

    #[test]
    fn test_convert_without_index_skips_rename() {
        let converter =
            converter_with_nav("site_name: Sample\npages:\n  - Home: home.md\n  - Guide:\n");

        let report = converter.convert(&request()).unwrap();

        assert!(report.renamed.is_none());
        assert_eq!(
            converter.fs().ops(),
            vec![FsOp::Write {
                path: PathBuf::from("/project/docs/document.ditamap"),
            }]
        );
        assert!(converter.fs().exists("/project/docs/index.md"));
    }

    #[test]
    fn test_convert_overwrites_existing_map() {
        let converter = Converter::new(
            MockFileSystem::new()
                .with_file("/project/mkdocs.yml", "pages:\n  - home.md\n")
                .with_file("/project/docs/document.ditamap", "stale"),
        );

        converter.convert(&request()).unwrap();

        let map = converter.fs().file("/project/docs/document.ditamap").unwrap();
        assert!(map.starts_with("<?xml"));
    }

    #[test]
    fn test_convert_read_failure_keeps_cause() {
        let converter = Converter::new(MockFileSystem::new());

        let err = converter.convert(&request()).unwrap_err();

        assert!(matches!(err, ConvertError::Read { .. }));
        assert_eq!(err.to_string(), "Unable to read file /project/mkdocs.yml");
        let source = err.source().unwrap().downcast_ref::<io::Error>().unwrap();
        assert_eq!(source.kind(), io::ErrorKind::NotFound);
        assert!(converter.fs().ops().is_empty());
    }

    #[test]
    fn test_convert_missing_abstract_writes_nothing() {
        let converter = converter_with_nav("site_name: Sample\npages:\n  - Guide:\n    - a.md\n");

        let err = converter.convert(&request()).unwrap_err();

        assert!(matches!(
            err,
            ConvertError::Render {
                source: RenderError::MissingAbstract,
                ..
            }
        ));
        assert!(converter.fs().ops().is_empty());
    }

    #[test]
    fn test_convert_rename_failure_skips_write() {
        let converter = Converter::new(
            MockFileSystem::new().with_file("/project/mkdocs.yml", NAV),
        );

        let err = converter.convert(&request()).unwrap_err();

        assert!(matches!(err, ConvertError::Rename { .. }));
        assert!(!converter.fs().exists("/project/docs/document.ditamap"));
    }

    #[test]
    fn test_convert_write_failure() {
        let converter = Converter::new(
            MockFileSystem::new()
                .with_file("/project/mkdocs.yml", "pages:\n  - home.md\n")
                .with_read_only("/project/docs/document.ditamap"),
        );

        let err = converter.convert(&request()).unwrap_err();

        assert!(matches!(err, ConvertError::Write { .. }));
        assert!(err.to_string().contains("document.ditamap"));
    }

    #[test]
    fn test_load_returns_document() {
        let converter = converter_with_nav(NAV);

        let doc = converter.load(&request()).unwrap();

        assert_eq!(doc.title(), "Sample");
        assert!(converter.fs().ops().is_empty());
    }

    #[test]
    fn test_load_without_dir() {
        let converter = converter_with_nav(NAV);
        let request = ConvertRequest {
            file: Some(PathBuf::from("/project/mkdocs.yml")),
            dir: None,
        };

        let doc = converter.load(&request).unwrap();

        assert_eq!(doc.chapters().len(), 1);
        assert!(converter.fs().ops().is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let converter = converter_with_nav(NAV);
        let request = ConvertRequest {
            file: None,
            dir: Some(PathBuf::from("/project/docs")),
        };

        let err = converter.load(&request).unwrap_err();

        assert!(matches!(err, ConvertError::MissingParameter("file")));
    }

    #[test]
    fn test_convert_report_excludes_dropped_topics() {
        let converter = converter_with_nav(
            "pages:\n- Home: home.md\n- About: about.md\n- G:\n  - a: a.md\n",
        );

        let report = converter.convert(&request()).unwrap();

        assert_eq!(report.topics, 2);
        let map = converter.fs().file("/project/docs/document.ditamap").unwrap();
        assert!(!map.contains("about.md"));
    }

    #[test]
    fn test_convert_on_disk() {
        let temp = tempfile::tempdir().unwrap();
        let nav = temp.path().join("mkdocs.yml");
        let docs = temp.path().join("docs");
        std::fs::create_dir(&docs).unwrap();
        std::fs::write(&nav, NAV).unwrap();
        std::fs::write(docs.join("index.md"), "# Welcome").unwrap();

        let converter = Converter::new(StdFileSystem);
        converter.convert(&ConvertRequest::new(&nav, &docs)).unwrap();

        assert!(!docs.join("index.md").exists());
        assert!(docs.join("abstract.md").exists());
        let map = std::fs::read_to_string(docs.join(OUTPUT_FILE)).unwrap();
        assert!(map.contains("<navtitle>Guide</navtitle>"));
    }
}
