//! Numeric argument encoding for notty escape codes.
//!
//! Every number is written as lowercase hexadecimal. Compound arguments join
//! their parts with `.` and arguments are separated by `;`.

use clap::ValueEnum;

/// Encode a value as a single escape-code argument.
pub trait Argument {
    fn encode(&self) -> String;
}

/// Lowercase hexadecimal, no prefix and no padding.
#[must_use]
pub fn hex(n: usize) -> String {
    format!("{n:x}")
}

impl Argument for u32 {
    fn encode(&self) -> String {
        format!("{self:x}")
    }
}

/// A cell position on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coords {
    pub x: u32,
    pub y: u32,
}

impl Argument for Coords {
    fn encode(&self) -> String {
        format!("{:x}.{:x}", self.x, self.y)
    }
}

/// Alignment of media smaller than its cell area, per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaAlignment {
    LeftTop,
    #[default]
    Center,
    RightBottom,
}

impl Argument for MediaAlignment {
    fn encode(&self) -> String {
        match self {
            Self::LeftTop => String::from("1"),
            Self::Center => String::from("2"),
            Self::RightBottom => String::from("3"),
        }
    }
}

/// How media is laid out within the cells it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaPosition {
    /// Natural size, aligned horizontally then vertically.
    Display(MediaAlignment, MediaAlignment),
    #[default]
    Fill,
    Fit,
    Stretch,
    Tile,
}

impl Argument for MediaPosition {
    fn encode(&self) -> String {
        match self {
            Self::Display(x, y) => format!("1.{}.{}", x.encode(), y.encode()),
            Self::Fill => String::from("2"),
            Self::Fit => String::from("3"),
            Self::Stretch => String::from("4"),
            Self::Tile => String::from("5"),
        }
    }
}

/// Command-line spelling of [`MediaPosition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PositionArg {
    Display,
    Fill,
    Fit,
    Stretch,
    Tile,
}

impl From<PositionArg> for MediaPosition {
    fn from(arg: PositionArg) -> Self {
        match arg {
            PositionArg::Display => Self::Display(MediaAlignment::Center, MediaAlignment::Center),
            PositionArg::Fill => Self::Fill,
            PositionArg::Fit => Self::Fit,
            PositionArg::Stretch => Self::Stretch,
            PositionArg::Tile => Self::Tile,
        }
    }
}

/// Join encoded arguments with `;`.
#[must_use]
pub fn join(args: &[String]) -> String {
    args.join(";")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(hex(0), "0");
        assert_eq!(hex(4), "4");
        assert_eq!(hex(255), "ff");
        assert_eq!(hex(4096), "1000");
    }

    #[test]
    fn test_coords() {
        assert_eq!(Coords { x: 10, y: 3 }.encode(), "a.3");
    }

    #[test]
    fn test_media_position() {
        assert_eq!(MediaPosition::default().encode(), "2");
        assert_eq!(MediaPosition::Stretch.encode(), "4");
        assert_eq!(
            MediaPosition::Display(MediaAlignment::LeftTop, MediaAlignment::RightBottom).encode(),
            "1.1.3"
        );
        assert_eq!(MediaPosition::from(PositionArg::Display).encode(), "1.2.2");
    }

    #[test]
    fn test_join() {
        assert_eq!(join(&[0x32_u32.encode(), 8_u32.encode()]), "32;8");
        assert_eq!(join(&[]), "");
    }
}
