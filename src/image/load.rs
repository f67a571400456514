//! Image loading utilities.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::ImageReader;

use crate::error::{Error, Result};

/// Raw bytes of an image file, exactly as they were read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl ImagePayload {
    /// Wrap bytes that did not come from [`load_payload`].
    #[must_use]
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            bytes,
        }
    }

    /// Path the payload was read from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Guess the MIME type from the leading magic bytes.
    ///
    /// Returns `None` for anything the `image` crate does not recognise,
    /// including empty payloads.
    #[must_use]
    pub fn sniff_mime(&self) -> Option<&'static str> {
        image::guess_format(&self.bytes)
            .ok()
            .map(|format| format.to_mime_type())
    }

    /// Pixel dimensions read from the image header, if it can be decoded.
    #[must_use]
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        ImageReader::new(Cursor::new(&self.bytes))
            .with_guessed_format()
            .ok()?
            .into_dimensions()
            .ok()
    }
}

/// Read an image file into memory.
///
/// No size or format validation is performed; any readable file is a valid
/// payload.
///
/// # Errors
///
/// Returns [`Error::ImageRead`] if the file is missing or unreadable.
pub fn load_payload<P: AsRef<Path>>(path: P) -> Result<ImagePayload> {
    let path = path.as_ref();

    let bytes = std::fs::read(path).map_err(|source| Error::ImageRead {
        path: path.to_path_buf(),
        source,
    })?;

    let payload = ImagePayload::from_bytes(path, bytes);

    match payload.dimensions() {
        Some((width, height)) => tracing::debug!(
            "Read {} bytes from {} ({width}x{height})",
            payload.len(),
            path.display()
        ),
        None => tracing::debug!("Read {} bytes from {}", payload.len(), path.display()),
    }

    Ok(payload)
}
