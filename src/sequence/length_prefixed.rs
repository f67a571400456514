//! Length-prefixed escape sequences (natty format).
//!
//! A sequence is `ESC "{" args`, then one `"{" hex(len) ";" bytes` group per
//! attachment, closed by `"}"`. Attachments carry raw binary; the hex length
//! is what lets the terminal skip over them.

use std::fmt;

use super::args::hex;
use super::ESC;

/// Bytes after the body that are not part of the prefix or hex length: the
/// `;` before the body and the closing `}`.
pub const OVERHEAD: usize = 2;

/// Arguments of the natty put-image fixture.
pub const NATTY_IMAGE_ARGS: &str = "4;36;12";

/// Builder for a length-prefixed sequence whose last attachment is the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthPrefixed {
    args: String,
    header: Vec<Vec<u8>>,
}

impl LengthPrefixed {
    #[must_use]
    pub fn new(args: impl Into<String>) -> Self {
        Self {
            args: args.into(),
            header: Vec::new(),
        }
    }

    /// The natty put-image sequence announcing `mime`.
    #[must_use]
    pub fn image(mime: &str) -> Self {
        Self::new(NATTY_IMAGE_ARGS).attach(mime.as_bytes())
    }

    /// Add an attachment that precedes the body.
    #[must_use]
    pub fn attach(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.header.push(data.into());
        self
    }

    /// Everything up to the body's length field.
    #[must_use]
    pub fn prefix(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.prefix_len());
        out.push(ESC);
        out.push(b'{');
        out.extend_from_slice(self.args.as_bytes());
        for data in &self.header {
            out.push(b'{');
            out.extend_from_slice(hex(data.len()).as_bytes());
            out.push(b';');
            out.extend_from_slice(data);
        }
        out.push(b'{');
        out
    }

    fn prefix_len(&self) -> usize {
        let header: usize = self
            .header
            .iter()
            .map(|data| 2 + hex(data.len()).len() + data.len())
            .sum();
        3 + self.args.len() + header
    }

    /// Encode the full sequence with `body` as the final attachment.
    #[must_use]
    pub fn encode(&self, body: &[u8]) -> Vec<u8> {
        let len = hex(body.len());
        let mut out = self.prefix();
        out.reserve(len.len() + body.len() + OVERHEAD);
        out.extend_from_slice(len.as_bytes());
        out.push(b';');
        out.extend_from_slice(body);
        out.push(b'}');
        out
    }

    /// Length accounting for the sequence [`encode`](Self::encode) would produce.
    #[must_use]
    pub fn diagnostic(&self, body: &[u8]) -> Diagnostic {
        let image_len = body.len();
        let prefix_len = self.prefix_len();
        let hex_len = hex(image_len).len();
        Diagnostic {
            total: image_len + prefix_len + hex_len + OVERHEAD,
            image_len,
            prefix_len,
            hex_len,
            overhead: OVERHEAD,
        }
    }

    /// Recover the body from a sequence produced by this builder.
    ///
    /// Returns `None` if the prefix, length field or terminator do not match.
    #[must_use]
    pub fn decode_body<'a>(&self, seq: &'a [u8]) -> Option<&'a [u8]> {
        let rest = seq.strip_prefix(self.prefix().as_slice())?;
        let semi = rest.iter().position(|&b| b == b';')?;
        let len = parse_hex_len(std::str::from_utf8(&rest[..semi]).ok()?)?;
        let end = (semi + 1).checked_add(len)?;
        let body = rest.get(semi + 1..end)?;
        match &rest[end..] {
            b"}" => Some(body),
            _ => None,
        }
    }
}

/// Parse a length field written by [`hex`].
#[must_use]
pub fn parse_hex_len(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)) {
        return None;
    }
    usize::from_str_radix(s, 16).ok()
}

/// Sanity-check equation printed instead of the raw sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostic {
    pub total: usize,
    pub image_len: usize,
    pub prefix_len: usize,
    pub hex_len: usize,
    pub overhead: usize,
}

impl Diagnostic {
    /// Whether the left-hand total equals the right-hand sum.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.total == self.image_len + self.prefix_len + self.hex_len + self.overhead
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} + {} + {} + {}",
            self.total, self.image_len, self.prefix_len, self.hex_len, self.overhead
        )
    }
}
