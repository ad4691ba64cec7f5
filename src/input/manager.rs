//! Input manager for handling uploaded review files

use crate::error::{Result, SentimentError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor;
use log::info;
use std::path::Path;
use tokio::fs;

#[derive(Debug, Default)]
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    /// Read a review file and return its text.
    ///
    /// The extension is checked before the file is opened, so unsupported
    /// uploads are rejected without any I/O.
    pub async fn extract_file(&self, path: &Path) -> Result<String> {
        let file_type = FileType::from_path(path);
        if !file_type.is_supported() {
            return Err(SentimentError::UnsupportedFormat(format!(
                "'{}'",
                display_name(path)
            )));
        }

        if !path.is_file() {
            return Err(SentimentError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let bytes = fs::read(path).await?;
        info!("Extracting {} text from: {} ({} bytes)", file_type, path.display(), bytes.len());

        let text = text_extractor::extract(&bytes, file_type)?;
        info!("Extracted {} characters", text.chars().count());
        Ok(text)
    }
}

/// File name without its directory, for user-facing messages.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
