//! # imagetest
//!
//! Emit inline-image escape sequences so terminal image rendering can be
//! checked by eye.
//!
//! Two unrelated sequence families are supported:
//!
//! - **natty**: `ESC {4;36;12{9;image/png{<hex len>;<raw bytes>}`, sent only
//!   when `TERM=natty`. Any other terminal gets a length equation instead,
//!   since the raw bytes would be printed as garbage.
//! - **notty put-image**: `ESC _[14;<w>;<h>[;<pos>]#<base64 mime>#<base64 data>`
//!   terminated by U+009C.
//!
//! ## Example
//!
//! ```no_run
//! use imagetest::{Config, Emitter, Fixture};
//!
//! # fn main() -> imagetest::Result<()> {
//! let config = Config {
//!     fixture: Fixture::Notty32x8,
//!     ..Config::default()
//! };
//! let emitter = Emitter::new(config)?;
//!
//! emitter.run(&mut std::io::stdout().lock())?;
//! # Ok(())
//! # }
//! ```

pub mod emit;
pub mod error;
pub mod image;
pub mod sequence;

pub use emit::{Config, Emitter, Fixture, Output};
pub use error::{Error, Result};
