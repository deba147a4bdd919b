// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Colour token handling
//!
//! Converts between hex colour tokens, spreadsheet ARGB fills, and the
//! normalized [0, 1] RGB channels stored on surface styles.

use thiserror::Error;

/// A colour token that could not be decoded
#[derive(Error, Debug)]
#[error("malformed colour token {0:?}")]
pub struct ColourError(pub String);

/// Convert a hex colour token to normalized RGB channels
///
/// Accepts 6 or 8 hex digits with an optional leading `#`; an 8-digit token
/// carries the RGB channels in its first 6 digits.
pub fn hex_to_rgb(hex: &str) -> Result<[f64; 3], ColourError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !matches!(digits.len(), 6 | 8) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColourError(hex.to_string()));
    }

    let mut rgb = [0.0; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        let byte = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16)
            .map_err(|_| ColourError(hex.to_string()))?;
        *channel = byte as f64 / 255.0;
    }
    Ok(rgb)
}

/// Format normalized RGB channels as an uppercase `#RRGGBB` token
pub fn rgb_to_hex(rgb: [f64; 3]) -> String {
    let byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("#{:02X}{:02X}{:02X}", byte(rgb[0]), byte(rgb[1]), byte(rgb[2]))
}

/// Extract an explicit hex colour token from a cell value
///
/// Returns the `#RRGGBB` form when the trimmed cell text is a full hex token
/// (6 or 8 digits, optional leading `#`), `None` otherwise.
pub fn cell_hex_token(text: &str) -> Option<String> {
    let trimmed = text.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if matches!(digits.len(), 6 | 8) && digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        Some(format!("#{}", &digits[..6].to_ascii_uppercase()))
    } else {
        None
    }
}

/// Decode a spreadsheet background fill as alpha + RGB
///
/// Fills are 8 hex digits `AARRGGBB`. Returns the `#RRGGBB` token and the
/// alpha fraction (1.0 = opaque).
pub fn fill_argb(fill: &str) -> Option<(String, f64)> {
    if fill.len() != 8 || !fill.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let alpha = u8::from_str_radix(&fill[0..2], 16).ok()? as f64 / 255.0;
    Some((format!("#{}", fill[2..8].to_ascii_uppercase()), alpha))
}

/// Map a transparency percentage to a fraction, clamping to [0, 1]
#[inline]
pub fn percentage_to_fraction(pct: f64) -> f64 {
    (pct / 100.0).clamp(0.0, 1.0)
}
