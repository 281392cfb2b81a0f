//! File content categories derived from filename extensions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Content category of a stored file.
///
/// Stored in the metadata document's `type` attribute and used by the
/// type filter and the usage aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Text and office documents.
    Document,
    /// Raster and vector images.
    Image,
    /// Video files.
    Video,
    /// Audio files.
    Audio,
    /// Everything without a recognized extension.
    Other,
}

impl FileKind {
    /// All categories, in the order the usage summary reports them.
    pub const ALL: [FileKind; 5] = [
        FileKind::Document,
        FileKind::Image,
        FileKind::Video,
        FileKind::Audio,
        FileKind::Other,
    ];

    /// The stored attribute value for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Other => "other",
        }
    }

    /// Classify a filename into a category plus its lowercased extension.
    ///
    /// A name without an extension classifies as [`FileKind::Other`] with an
    /// empty extension string.
    pub fn classify(file_name: &str) -> (FileKind, String) {
        let extension = file_name
            .rsplit_once('.')
            .filter(|(stem, _)| !stem.is_empty())
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();

        if extension.is_empty() {
            return (FileKind::Other, extension);
        }

        let kind = match extension.as_str() {
            "pdf" | "doc" | "docx" | "txt" | "xls" | "xlsx" | "csv" | "rtf" | "ods" | "ppt"
            | "odp" | "md" | "html" | "htm" | "epub" | "pages" | "fig" | "psd" | "ai" | "indd"
            | "xd" | "sketch" => FileKind::Document,
            "jpg" | "jpeg" | "png" | "gif" | "bmp" | "svg" | "webp" | "heic" => FileKind::Image,
            "mp4" | "avi" | "mov" | "mkv" | "webm" => FileKind::Video,
            "mp3" | "wav" | "ogg" | "flac" | "aac" | "m4a" => FileKind::Audio,
            _ => FileKind::Other,
        };

        (kind, extension)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "document" => Ok(Self::Document),
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            "audio" => Ok(Self::Audio),
            "other" => Ok(Self::Other),
            _ => Err(AppError::validation(format!("Unknown file type '{s}'"))),
        }
    }
}
