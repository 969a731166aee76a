//! File helpers for documents
//!
//! Input is read completely before parsing; output is rendered completely
//! before the file is created, so a rejected document never leaves a
//! truncated file behind.

use super::Document;
use crate::{utils::CoreError, Result};
use std::{fs, path::Path};

impl Document {
    /// Read and parse a script file
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if `path` is not a regular file,
    /// [`CoreError::Io`] if it cannot be read or is not UTF-8, and any
    /// parse error from [`Document::parse`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(CoreError::not_found(format!(
                "file not found: {}",
                path.display()
            )));
        }

        log::debug!("reading script {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Serialize and write to `path`, replacing any existing file
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Format`] for a document without Script Info and
    /// [`CoreError::Io`] when writing fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = self.serialize()?;
        log::debug!("writing script {} ({} bytes)", path.display(), text.len());
        fs::write(path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SectionKind;

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = Document::from_path(dir.path().join("absent.ass"));
        assert!(matches!(result, Err(CoreError::NotFound(_))));

        let result = Document::from_path(dir.path());
        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.ass");

        let mut document = Document::new(true);
        document.add_line(SectionKind::ScriptInfo, "Title", " saved");
        document.save(&path).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(crate::utils::bom::has_bom(&bytes));

        let loaded = Document::from_path(&path).unwrap();
        assert_eq!(loaded, document);
    }

    #[test]
    fn rejected_document_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never.ass");

        let document = Document::new(false);
        assert!(document.save(&path).is_err());
        assert!(!path.exists());
    }
}
