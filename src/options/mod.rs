//! Query-string configuration for the scan guide and the stream.
//!
//! Parses strings like `circle_radius=300&centerhorizontal=true&facing=back`
//! into [`Options`], which resolve to a [`GuideOptions`] for the overlay and
//! a [`StreamOptions`] for stream planning.
//!
//! # Example
//!
//! ```
//! use scanframe::{Facing, Size, options};
//!
//! let result = options::parse("circle_radius=300&facing=back&preview=720x960");
//! assert!(result.warnings.is_empty());
//!
//! let guide = result.options.guide();
//! assert_eq!(guide.radius, 300.0);
//!
//! let stream = result.options.stream();
//! assert_eq!(stream.facing, Facing::Back);
//! assert_eq!(stream.preview_target, Size::new(720, 960));
//! ```
//!
//! # Non-geometry keys
//!
//! Text and image keys the overlay does not lay out (`hint_text`,
//! `title_text`, `unit_scan_img`) are kept in [`Options::extras()`] without
//! warnings. Only unknown keys produce [`ParseWarning::KeyNotRecognized`].
//!
//! [`GuideOptions`]: crate::overlay::GuideOptions

mod color;
mod parse;
pub mod settings;

pub use color::parse_color;
pub use settings::{Options, StreamOptions};

use alloc::string::String;
use alloc::vec::Vec;

/// Result of parsing a configuration string.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub options: Options,
    /// Non-fatal parse warnings.
    pub warnings: Vec<ParseWarning>,
}

/// Non-fatal warning from configuration parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A key appeared more than once (last value wins).
    DuplicateKey { key: String, value: String },
    /// A key is neither a layout key nor a known non-geometry key.
    KeyNotRecognized { key: String, value: String },
    /// A key was recognized but its value could not be parsed.
    ValueInvalid {
        key: String,
        value: String,
        reason: &'static str,
    },
}

/// Parse a configuration string (with or without leading `?`).
pub fn parse(query: &str) -> ParseResult {
    let (options, warnings) = parse::parse_query(query);
    ParseResult { options, warnings }
}
