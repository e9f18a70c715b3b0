// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placeholder glyph normalization.

use alloc::string::String;

/// Maximum number of characters shown as a placeholder glyph.
pub const MAX_PLACEHOLDER_CHARS: usize = 2;

/// Normalize raw placeholder text into the glyph drawn when no image is set.
///
/// Surrounding whitespace is trimmed, the first characters are upper-cased
/// with the locale-independent Unicode mapping, and the result is cut to at
/// most [`MAX_PLACEHOLDER_CHARS`] characters. Empty or whitespace-only input
/// yields `None`.
///
/// The function is idempotent.
///
/// ```
/// use understory_avatar::format_placeholder_text;
///
/// assert_eq!(format_placeholder_text("  jane doe ").as_deref(), Some("JA"));
/// assert_eq!(format_placeholder_text("   "), None);
/// ```
pub fn format_placeholder_text(raw: &str) -> Option<String> {
    // Upper-casing may expand a character (`ß` becomes `SS`), so cut after
    // mapping rather than before.
    let glyph: String = raw
        .trim()
        .chars()
        .flat_map(char::to_uppercase)
        .take(MAX_PLACEHOLDER_CHARS)
        .collect();
    let glyph = glyph.trim_end();
    if glyph.is_empty() {
        None
    } else {
        Some(String::from(glyph))
    }
}
