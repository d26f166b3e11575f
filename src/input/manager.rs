//! Document loading and extraction dispatch

use crate::error::{Result, ResumeRankerError};
use crate::input::file_detector::FileType;
use crate::input::markdown;
use crate::input::pdf::{self, ExtractedText};
use log::info;
use std::path::Path;
use tokio::fs;

/// A document as the caller hands it over: opaque bytes plus a filename.
/// Owned by the request that supplied it and dropped after processing.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub kind: FileType,
}

impl SourceDocument {
    pub fn new(filename: String, bytes: Vec<u8>, kind: FileType) -> Self {
        Self {
            filename,
            bytes,
            kind,
        }
    }

    /// Run the extractor matching the document's type. Unknown extensions are
    /// given one chance via content sniffing before being rejected.
    pub fn extract(&self) -> Result<ExtractedText> {
        match self.kind {
            FileType::Pdf => pdf::extract_pdf(&self.bytes),
            FileType::Text => Ok(ExtractedText::from_text(
                String::from_utf8_lossy(&self.bytes).into_owned(),
            )),
            FileType::Markdown => Ok(markdown::extract(&String::from_utf8_lossy(&self.bytes))),
            FileType::Unknown => {
                if FileType::from_bytes(&self.bytes) == FileType::Pdf {
                    pdf::extract_pdf(&self.bytes)
                } else {
                    Err(ResumeRankerError::UnsupportedFormat(format!(
                        "cannot determine document type for: {}",
                        self.filename
                    )))
                }
            }
        }
    }
}

/// Loads documents from disk for the CLI front end.
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    pub async fn load(&self, path: &Path) -> Result<SourceDocument> {
        if !path.exists() {
            return Err(ResumeRankerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let kind = FileType::from_path(path);
        if kind == FileType::Unknown {
            return Err(ResumeRankerError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                path.display()
            )));
        }

        info!("Loading document: {}", path.display());
        let bytes = fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        Ok(SourceDocument::new(filename, bytes, kind))
    }

    pub async fn load_batch(&self, paths: &[std::path::PathBuf]) -> Result<Vec<SourceDocument>> {
        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            documents.push(self.load(path).await?);
        }
        Ok(documents)
    }

    /// Read a job description file as plain text.
    pub async fn load_text(&self, path: &Path) -> Result<String> {
        let document = self.load(path).await?;
        Ok(document.extract()?.text())
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
