//! Pluggable property sources.

use std::fs;
use std::io;
use std::path::PathBuf;

use include_dir::Dir;

use super::parse::parse_properties;

/// A location that logical property files can be loaded from.
///
/// Implementations return parsed key/value entries so that a source backed by
/// a different on-disk format can be substituted without touching the
/// overlay/precedence algorithm in [`super::Configuration`].
pub trait PropertySource {
    /// Human-readable description used in load diagnostics.
    fn describe(&self) -> String;

    /// Load the named logical file, returning its entries in file order.
    ///
    /// `Ok(None)` means the source has no such file, which is never an error.
    fn load(&self, filename: &str) -> io::Result<Option<Vec<(String, String)>>>;
}

/// Properties bundled into the binary via [`include_dir`].
pub struct EmbeddedSource {
    dir: &'static Dir<'static>,
}

impl EmbeddedSource {
    pub fn new(dir: &'static Dir<'static>) -> Self {
        Self { dir }
    }
}

impl PropertySource for EmbeddedSource {
    fn describe(&self) -> String {
        "embedded resources".to_string()
    }

    fn load(&self, filename: &str) -> io::Result<Option<Vec<(String, String)>>> {
        let Some(file) = self.dir.get_file(filename) else {
            return Ok(None);
        };

        let content = file.contents_utf8().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("embedded resource {} is not valid UTF-8", filename),
            )
        })?;

        Ok(Some(parse_properties(content)))
    }
}

/// Properties files located in a directory, by default the working directory.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Source over the process's working directory.
    pub fn working_dir() -> Self {
        Self { root: PathBuf::from(".") }
    }
}

impl PropertySource for DirSource {
    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }

    fn load(&self, filename: &str) -> io::Result<Option<Vec<(String, String)>>> {
        match fs::read_to_string(self.root.join(filename)) {
            Ok(content) => Ok(Some(parse_properties(&content))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn dir_source_reads_existing_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.properties"), "a=1\n").unwrap();

        let source = DirSource::new(dir.path());
        let entries = source.load("app.properties").unwrap().unwrap();

        assert_eq!(entries, vec![("a".to_string(), "1".to_string())]);
    }

    #[test]
    fn dir_source_missing_file_is_none() {
        let dir = TempDir::new().unwrap();

        let source = DirSource::new(dir.path());

        assert!(source.load("app.properties").unwrap().is_none());
    }

    #[test]
    fn dir_source_missing_directory_is_none() {
        let source = DirSource::new("/definitely/not/a/real/path");

        assert!(source.load("app.properties").unwrap().is_none());
    }
}
