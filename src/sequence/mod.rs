//! Byte-exact encoders for inline image escape sequences.

pub mod args;
mod length_prefixed;
mod put_image;

pub use args::{Argument, Coords, MediaAlignment, MediaPosition, PositionArg};
pub use length_prefixed::{parse_hex_len, Diagnostic, LengthPrefixed, NATTY_IMAGE_ARGS, OVERHEAD};
pub use put_image::{decode as decode_put_image, PutImage, PUT_IMAGE, PUT_IMAGE_AT, ST};

/// The escape control character that opens every sequence.
pub const ESC: u8 = 0x1b;
