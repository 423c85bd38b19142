//! Query string tokenizer and value parsers.
//!
//! Minimal percent-decoding and key-value extraction without external dependencies.

use alloc::string::String;
use alloc::vec::Vec;

use super::ParseWarning;
use super::color::{hex_byte, parse_color};
use super::settings::Options;
use crate::detection::FaceDetectMode;
use crate::geometry::Size;
use crate::orientation::Facing;

/// Known non-geometry keys that are preserved in `extras` without warnings.
/// Sorted for binary search.
const KNOWN_EXTRAS: &[&str] = &["hint_text", "title_text", "unit_scan_img"];

/// Parse a configuration string into Options + warnings.
pub(crate) fn parse_query(query: &str) -> (Options, Vec<ParseWarning>) {
    let mut opts = Options::new();
    let mut warnings = Vec::new();

    for (raw_key, raw_value) in pairs(query) {
        let key = percent_decode(raw_key);
        let value = percent_decode(raw_value);
        let key_lower = key.to_ascii_lowercase();

        dispatch_key(&key_lower, &value, &mut opts, &mut warnings);
    }

    (opts, warnings)
}

fn dispatch_key(key: &str, value: &str, opts: &mut Options, warnings: &mut Vec<ParseWarning>) {
    match key {
        // Guide circle
        "circle_radius" => {
            let parsed = parse_length(value).filter(|&r| r > 0.0);
            set_or_invalid(
                &mut opts.radius,
                parsed,
                key,
                value,
                "expected a positive length",
                warnings,
            );
        }
        "circle_center_horizontal" | "centerhorizontal" => {
            set_or_invalid(
                &mut opts.center_horizontal,
                parse_bool(value),
                key,
                value,
                BOOL_REASON,
                warnings,
            );
        }
        "circle_center_vertical" | "centervertical" => {
            set_or_invalid(
                &mut opts.center_vertical,
                parse_bool(value),
                key,
                value,
                BOOL_REASON,
                warnings,
            );
        }
        "circle_margin_top" => {
            set_or_invalid(
                &mut opts.margin_top,
                parse_length(value),
                key,
                value,
                LENGTH_REASON,
                warnings,
            );
        }
        "circle_margin_left" => {
            set_or_invalid(
                &mut opts.margin_left,
                parse_length(value),
                key,
                value,
                LENGTH_REASON,
                warnings,
            );
        }
        "circle_margin_right" => {
            set_or_invalid(
                &mut opts.margin_right,
                parse_length(value),
                key,
                value,
                LENGTH_REASON,
                warnings,
            );
        }
        "circle_margin_bottom" => {
            set_or_invalid(
                &mut opts.margin_bottom,
                parse_length(value),
                key,
                value,
                LENGTH_REASON,
                warnings,
            );
        }
        "inner_circle_color" => {
            set_or_invalid(
                &mut opts.ring_color,
                parse_color(value),
                key,
                value,
                "expected #RGB, #RRGGBB, #AARRGGBB or a color name",
                warnings,
            );
        }
        "anim_duration" => {
            let parsed = value.trim().parse::<u32>().ok().filter(|&ms| ms > 0);
            set_or_invalid(
                &mut opts.sweep_duration_ms,
                parsed,
                key,
                value,
                "expected a positive duration in milliseconds",
                warnings,
            );
        }

        // Stream
        "preview" => {
            set_or_invalid(
                &mut opts.preview,
                parse_size(value),
                key,
                value,
                "expected WxH",
                warnings,
            );
        }
        "preview_width" => {
            set_or_invalid(
                &mut opts.preview_width,
                parse_dimension(value),
                key,
                value,
                DIMENSION_REASON,
                warnings,
            );
        }
        "preview_height" => {
            set_or_invalid(
                &mut opts.preview_height,
                parse_dimension(value),
                key,
                value,
                DIMENSION_REASON,
                warnings,
            );
        }
        "facing" => {
            set_or_invalid(
                &mut opts.facing,
                parse_facing(value),
                key,
                value,
                "expected front|back",
                warnings,
            );
        }
        "face_detect" => {
            set_or_invalid(
                &mut opts.face_detect,
                parse_face_detect(value),
                key,
                value,
                "expected off|simple|full",
                warnings,
            );
        }

        _ => {
            if KNOWN_EXTRAS.binary_search(&key).is_ok() {
                if opts.extras.insert(String::from(key), String::from(value)).is_some() {
                    warnings.push(ParseWarning::DuplicateKey {
                        key: String::from(key),
                        value: String::from(value),
                    });
                }
            } else {
                warnings.push(ParseWarning::KeyNotRecognized {
                    key: String::from(key),
                    value: String::from(value),
                });
            }
        }
    }
}

const BOOL_REASON: &str = "expected true|false|1|0|yes|no|on|off";
const LENGTH_REASON: &str = "expected a non-negative length";
const DIMENSION_REASON: &str = "expected a positive integer";

/// Set a field, warning on duplicate; warn and leave it alone when the
/// value did not parse.
fn set_or_invalid<T>(
    field: &mut Option<T>,
    parsed: Option<T>,
    key: &str,
    value: &str,
    reason: &'static str,
    warnings: &mut Vec<ParseWarning>,
) {
    match parsed {
        Some(v) => {
            if field.is_some() {
                warnings.push(ParseWarning::DuplicateKey {
                    key: String::from(key),
                    value: String::from(value),
                });
            }
            *field = Some(v);
        }
        None => warnings.push(ParseWarning::ValueInvalid {
            key: String::from(key),
            value: String::from(value),
            reason,
        }),
    }
}

// ---- Value parsers ----

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Non-negative pixel length, optional `px` suffix.
fn parse_length(s: &str) -> Option<f32> {
    let s = s.trim();
    let s = s.strip_suffix("px").unwrap_or(s);
    s.trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

fn parse_dimension(s: &str) -> Option<u32> {
    s.trim().parse::<u32>().ok().filter(|&v| v > 0)
}

/// `WxH` (or `W,H`), both positive.
fn parse_size(s: &str) -> Option<Size> {
    let s = s.trim();
    let (w, h) = s
        .split_once(['x', 'X'])
        .or_else(|| s.split_once(','))?;
    Some(Size::new(parse_dimension(w)?, parse_dimension(h)?))
}

fn parse_facing(s: &str) -> Option<Facing> {
    match s.trim().to_ascii_lowercase().as_str() {
        "front" => Some(Facing::Front),
        "back" | "rear" => Some(Facing::Back),
        _ => None,
    }
}

fn parse_face_detect(s: &str) -> Option<FaceDetectMode> {
    match s.trim().to_ascii_lowercase().as_str() {
        "off" | "none" => Some(FaceDetectMode::Off),
        "simple" => Some(FaceDetectMode::Simple),
        "full" => Some(FaceDetectMode::Full),
        _ => None,
    }
}

// ---- Tokenizer ----

/// `key=value` pairs of a query, split on '&' and the first '='. A leading
/// '?' and empty segments are skipped.
fn pairs(query: &str) -> impl Iterator<Item = (&str, &str)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
}

/// Percent-decode a URL component. Also handles '+' as space. Decoded
/// bytes that are not valid UTF-8 are replaced.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while let Some(&b) = bytes.get(i) {
        let escaped = match (b, bytes.get(i + 1..i + 3)) {
            (b'%', Some(&[hi, lo])) => hex_byte(hi, lo),
            _ => None,
        };
        match escaped {
            Some(decoded) => {
                out.push(decoded);
                i += 3;
            }
            None => {
                out.push(if b == b'+' { b' ' } else { b });
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}
