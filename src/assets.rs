//! Image uploads embedded in documents as standard base64 text.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use tracing::warn;

/// A file part received in a form.
#[derive(Debug, Clone)]
pub enum Upload {
    Received(Bytes),
    /// The part was announced but its bytes could not be read.
    Failed(String),
}

/// Result of turning an optional upload into a stored asset value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetOutcome {
    Absent,
    Encoded(String),
    Failed,
}

impl AssetOutcome {
    /// Value to write into the asset field, or `None` to leave it untouched.
    ///
    /// A failed upload is stored as null.
    pub fn into_stored(self) -> Option<Option<String>> {
        match self {
            AssetOutcome::Absent => None,
            AssetOutcome::Encoded(s) => Some(Some(s)),
            AssetOutcome::Failed => Some(None),
        }
    }
}

pub fn encode_upload(part: &str, upload: Option<&Upload>) -> AssetOutcome {
    match upload {
        None => AssetOutcome::Absent,
        Some(Upload::Received(bytes)) => AssetOutcome::Encoded(STANDARD.encode(bytes)),
        Some(Upload::Failed(reason)) => {
            warn!(part, %reason, "asset upload could not be processed; storing null");
            AssetOutcome::Failed
        }
    }
}

#[cfg(test)]
pub fn decode_asset(encoded: &str) -> anyhow::Result<Vec<u8>> {
    Ok(STANDARD.decode(encoded)?)
}
