//! Render one fixture for one image and write it to an output stream.

use std::io::Write;
use std::path::PathBuf;

use clap::ValueEnum;

use crate::error::{Error, Result};
use crate::image::{self, ImagePayload};
use crate::sequence::{Coords, Diagnostic, LengthPrefixed, MediaPosition, PutImage};

/// The escape-sequence experiments this tool can reproduce.
///
/// Each fixture is independent; they do not describe one protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Fixture {
    /// Length-prefixed raw bytes, only sent when the gate variable matches.
    #[default]
    #[value(name = "natty")]
    Natty,
    /// Base64 put-image, 0x32 x 8 cells, stretched.
    #[value(name = "notty-32x8")]
    Notty32x8,
    /// Base64 put-image, 0x80 x 0x16 cells, stretched.
    #[value(name = "notty-80x16")]
    Notty80x16,
    /// Base64 put-image, 0x12 x 8 cells, default position.
    #[value(name = "notty-12x8")]
    Notty12x8,
}

impl Fixture {
    /// Put-image parameters for the base64 fixtures, `None` for natty.
    #[must_use]
    pub const fn put_image(self) -> Option<PutImage> {
        match self {
            Self::Natty => None,
            Self::Notty32x8 => Some(PutImage::new(0x32, 8).with_position(MediaPosition::Stretch)),
            Self::Notty80x16 => {
                Some(PutImage::new(0x80, 0x16).with_position(MediaPosition::Stretch))
            }
            Self::Notty12x8 => Some(PutImage::new(0x12, 8)),
        }
    }
}

/// Configuration for a single emitter run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Which sequence to produce.
    pub fixture: Fixture,

    /// Image file to embed.
    pub image_path: PathBuf,

    /// MIME type announced to the terminal.
    pub mime: String,

    /// Sniff the MIME type from the file contents, falling back to `mime`.
    pub detect_mime: bool,

    /// Environment variable that gates the natty sequence.
    pub gate_var: String,

    /// Value the gate variable must equal exactly.
    pub gate_value: String,

    /// Send the natty sequence regardless of the gate.
    pub force: bool,

    /// Width override in cells (put-image fixtures).
    pub width: Option<u32>,

    /// Height override in cells (put-image fixtures).
    pub height: Option<u32>,

    /// Media position override (put-image fixtures).
    pub position: Option<MediaPosition>,

    /// Place the image at these coordinates instead of the cursor.
    pub at: Option<Coords>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fixture: Fixture::default(),
            image_path: PathBuf::from(image::DEFAULT_IMAGE_PATH),
            mime: image::DEFAULT_MIME.to_string(),
            detect_mime: false,
            gate_var: "TERM".to_string(),
            gate_value: "natty".to_string(),
            force: false,
            width: None,
            height: None,
            position: None,
            at: None,
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if self.mime.is_empty() || !self.mime.contains('/') {
            return Err(Error::InvalidParameter {
                name: "mime".to_string(),
                reason: format!("expected type/subtype, got {:?}", self.mime),
            });
        }

        if self.gate_var.is_empty() || self.gate_var.contains(['=', '\0']) {
            return Err(Error::InvalidParameter {
                name: "gate_var".to_string(),
                reason: "must be a non-empty name without '=' or NUL".to_string(),
            });
        }

        for (name, value) in [("width", self.width), ("height", self.height)] {
            if value == Some(0) {
                return Err(Error::InvalidParameter {
                    name: name.to_string(),
                    reason: "must be greater than 0".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Fixture parameters with any overrides applied.
    fn put_image(&self) -> Option<PutImage> {
        let mut put = self.fixture.put_image()?;
        if let Some(width) = self.width {
            put.width = width;
        }
        if let Some(height) = self.height {
            put.height = height;
        }
        if self.position.is_some() {
            put.position = self.position;
        }
        if self.at.is_some() {
            put.at = self.at;
        }
        Some(put)
    }
}

/// What an emitter run wrote to its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// A complete escape sequence.
    Sequence(Vec<u8>),
    /// The length equation printed when the natty gate is closed.
    Diagnostic(Diagnostic),
}

impl Output {
    /// Write the output followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        match self {
            Self::Sequence(bytes) => {
                out.write_all(bytes)?;
                out.write_all(b"\n")
            }
            Self::Diagnostic(diag) => writeln!(out, "{diag}"),
        }
    }
}

/// Produces the configured fixture for an image.
pub struct Emitter {
    config: Config,
}

impl Emitter {
    /// Create a new emitter with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        if config.fixture == Fixture::Natty
            && (config.width.is_some()
                || config.height.is_some()
                || config.position.is_some()
                || config.at.is_some())
        {
            tracing::warn!("Size and position overrides are ignored by the natty fixture");
        }

        tracing::debug!("Emitter config: {config:?}");

        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The MIME type announced for `payload`.
    #[must_use]
    pub fn mime_for<'a>(&'a self, payload: &ImagePayload) -> &'a str {
        if self.config.detect_mime {
            if let Some(mime) = payload.sniff_mime() {
                return mime;
            }
            tracing::debug!(
                "Could not detect MIME type of {}, using {}",
                payload.path().display(),
                self.config.mime
            );
        }
        &self.config.mime
    }

    /// Build the output for `payload` without doing any I/O.
    ///
    /// `gate` is the current value of the gate variable, if set.
    #[must_use]
    pub fn render(&self, payload: &ImagePayload, gate: Option<&str>) -> Output {
        let mime = self.mime_for(payload);

        match self.config.put_image() {
            Some(put) => {
                tracing::info!("Emitting put-image sequence {}", put.header());
                Output::Sequence(put.encode(mime, payload.as_bytes()))
            }
            None => {
                let seq = LengthPrefixed::image(mime);
                if self.config.force || gate == Some(self.config.gate_value.as_str()) {
                    tracing::info!("Emitting length-prefixed sequence");
                    Output::Sequence(seq.encode(payload.as_bytes()))
                } else {
                    tracing::debug!(
                        "{} is {gate:?}, not {:?}; printing diagnostic",
                        self.config.gate_var,
                        self.config.gate_value
                    );
                    Output::Diagnostic(seq.diagnostic(payload.as_bytes()))
                }
            }
        }
    }

    /// Read the image, render the fixture and write it to `out`.
    ///
    /// Nothing is written if the image cannot be read.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be read or `out` fails.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<Output> {
        let payload = image::load_payload(&self.config.image_path)?;
        let gate = std::env::var(&self.config.gate_var).ok();

        let output = self.render(&payload, gate.as_deref());
        output.write_to(out)?;
        out.flush()?;

        Ok(output)
    }
}
