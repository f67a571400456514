//! Image payload loading and inspection.

mod load;

pub use load::{load_payload, ImagePayload};

/// Image file read when no input path is given.
pub const DEFAULT_IMAGE_PATH: &str = "./test.png";

/// MIME type announced to the terminal unless told otherwise.
pub const DEFAULT_MIME: &str = "image/png";
