//! File type detection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileType {
    PlainText,
    Pdf,
    WordDocument,
    Unsupported,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "txt" => FileType::PlainText,
            "pdf" => FileType::Pdf,
            "docx" => FileType::WordDocument,
            _ => FileType::Unsupported,
        }
    }

    /// Files without an extension are unsupported.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Unsupported)
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, FileType::Unsupported)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileType::PlainText => "TXT",
            FileType::Pdf => "PDF",
            FileType::WordDocument => "DOCX",
            FileType::Unsupported => "unsupported",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_detection() {
        assert_eq!(FileType::from_extension("txt"), FileType::PlainText);
        assert_eq!(FileType::from_extension("PDF"), FileType::Pdf);
        assert_eq!(FileType::from_extension("Docx"), FileType::WordDocument);
        assert_eq!(FileType::from_extension("rtf"), FileType::Unsupported);
        assert_eq!(FileType::from_extension("doc"), FileType::Unsupported);
    }

    #[test]
    fn test_path_detection() {
        assert_eq!(FileType::from_path(Path::new("reviews/stay.TXT")), FileType::PlainText);
        assert_eq!(FileType::from_path(Path::new("notes.rtf")), FileType::Unsupported);
        assert_eq!(FileType::from_path(Path::new("README")), FileType::Unsupported);
        assert!(!FileType::from_path(Path::new("archive.tar.gz")).is_supported());
    }
}
