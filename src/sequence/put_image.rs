//! notty put-image sequences with base64 attachments.
//!
//! `ESC "_[" code ";" args ("#" base64)* ST`, where ST is U+009C. The first
//! attachment is the MIME type and the second is the image data.

use base64::{engine::general_purpose::STANDARD, Engine};

use super::args::{join, Argument, Coords, MediaPosition};
use super::ESC;

/// Put an image at the cursor.
pub const PUT_IMAGE: u32 = 0x14;

/// Put an image at explicit coordinates.
pub const PUT_IMAGE_AT: u32 = 0x15;

/// String terminator, written as a UTF-8 encoded character.
pub const ST: char = '\u{9c}';

/// Parameters of a put-image command. Width and height are in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PutImage {
    pub width: u32,
    pub height: u32,
    pub position: Option<MediaPosition>,
    pub at: Option<Coords>,
}

impl PutImage {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            position: None,
            at: None,
        }
    }

    #[must_use]
    pub const fn with_position(mut self, position: MediaPosition) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub const fn at(mut self, coords: Coords) -> Self {
        self.at = Some(coords);
        self
    }

    /// Command code and arguments, e.g. `14;32;8;4`.
    #[must_use]
    pub fn header(&self) -> String {
        let mut args = Vec::with_capacity(5);
        match self.at {
            Some(coords) => {
                args.push(PUT_IMAGE_AT.encode());
                args.push(coords.encode());
            }
            None => args.push(PUT_IMAGE.encode()),
        }
        args.push(self.width.encode());
        args.push(self.height.encode());
        if let Some(position) = self.position {
            args.push(position.encode());
        }
        join(&args)
    }

    /// Encode the full sequence for `data` of type `mime`.
    #[must_use]
    pub fn encode(&self, mime: &str, data: &[u8]) -> Vec<u8> {
        let mut out = String::with_capacity(16 + mime.len() * 2 + data.len().div_ceil(3) * 4);
        out.push(char::from(ESC));
        out.push_str("_[");
        out.push_str(&self.header());
        out.push('#');
        STANDARD.encode_string(mime, &mut out);
        out.push('#');
        STANDARD.encode_string(data, &mut out);
        out.push(ST);
        out.into_bytes()
    }
}

/// Split an encoded sequence into its header and decoded attachments.
///
/// Returns `None` if the framing is wrong or an attachment is not valid
/// base64.
#[must_use]
pub fn decode(seq: &[u8]) -> Option<(String, Vec<Vec<u8>>)> {
    let text = std::str::from_utf8(seq).ok()?;
    let body = text.strip_prefix("\x1b_[")?.strip_suffix(ST)?;
    let mut parts = body.split('#');
    let header = parts.next()?.to_string();
    let attachments = parts
        .map(|part| STANDARD.decode(part).ok())
        .collect::<Option<Vec<_>>>()?;
    Some((header, attachments))
}
