// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Avatar configuration: the resolved attribute set and the live config.

use alloc::string::String;
use peniko::Color;

/// Default border color (opaque white).
pub const DEFAULT_BORDER_COLOR: u32 = 0xFFFF_FFFF;
/// Default placeholder background color.
pub const DEFAULT_BACKGROUND_COLOR: u32 = 0xFFDD_DDDD;
/// Default placeholder text color.
pub const DEFAULT_TEXT_COLOR: u32 = 0xFF00_0000;
/// Default background color of the checked state.
pub const DEFAULT_CHECKED_BACKGROUND_COLOR: u32 = 0xFFBB_BBBB;
/// Default checkmark stroke color.
pub const DEFAULT_CHECK_STROKE_COLOR: u32 = 0xFFFF_FFFF;
/// Default shadow color.
pub const DEFAULT_SHADOW_COLOR: u32 = 0xFF66_6666;
/// Default checkmark stroke width in density-independent pixels.
pub const DEFAULT_CHECK_STROKE_WIDTH_DIP: f32 = 3.0;

/// Convert a packed `0xAARRGGBB` word into a [`Color`].
pub fn argb(word: u32) -> Color {
    let [a, r, g, b] = word.to_be_bytes();
    Color::from_rgba8(r, g, b, a)
}

/// Pre-resolved attribute set handed over by the host's style system.
///
/// All sizes are already in device pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct AvatarAttributes {
    /// Border stroke width.
    pub border_width_px: u32,
    /// Border color.
    pub border_color: Color,
    /// Background drawn behind the placeholder glyph.
    pub placeholder_background_color: Color,
    /// Raw placeholder text; it is normalized on construction.
    pub placeholder_text: Option<String>,
    /// Placeholder glyph color.
    pub placeholder_text_color: Color,
    /// Placeholder glyph size. Zero disables the glyph.
    pub placeholder_text_size_px: u32,
    /// Initial checked state.
    pub checked: bool,
    /// Background color of the checked state.
    pub checked_background_color: Color,
    /// Shadow blur radius. Zero disables the shadow; negative values are
    /// clamped to zero.
    pub shadow_radius: f32,
    /// Shadow color.
    pub shadow_color: Color,
}

impl Default for AvatarAttributes {
    fn default() -> Self {
        Self {
            border_width_px: 0,
            border_color: argb(DEFAULT_BORDER_COLOR),
            placeholder_background_color: argb(DEFAULT_BACKGROUND_COLOR),
            placeholder_text: None,
            placeholder_text_color: argb(DEFAULT_TEXT_COLOR),
            placeholder_text_size_px: 0,
            checked: false,
            checked_background_color: argb(DEFAULT_CHECKED_BACKGROUND_COLOR),
            shadow_radius: 0.0,
            shadow_color: argb(DEFAULT_SHADOW_COLOR),
        }
    }
}

/// Live visual configuration of an avatar.
///
/// This is owned by [`CircularAvatar`](crate::CircularAvatar) and only
/// mutated through its setters, which decide whether a change needs new
/// paints, a new image transform, or just a redraw.
#[derive(Clone, Debug, PartialEq)]
pub struct AvatarConfig {
    /// Border stroke width in device pixels.
    pub border_width_px: u32,
    /// Border color.
    pub border_color: Color,
    /// Placeholder background color.
    pub background_color: Color,
    /// Background color of the checked state.
    pub checked_background_color: Color,
    /// Shadow color.
    pub shadow_color: Color,
    /// Placeholder glyph color.
    pub text_color: Color,
    /// Shadow blur radius in device pixels; zero disables the shadow.
    pub shadow_radius: f32,
    /// Normalized placeholder glyph: one or two upper-case characters.
    pub placeholder_text: Option<String>,
    /// Placeholder glyph size in device pixels.
    pub text_size_px: u32,
    /// Whether the checked presentation is shown.
    pub checked: bool,
    /// Whether check changes run the shrink/grow animation.
    pub allow_check_animation: bool,
    /// Whether the checked background casts the shadow too.
    pub allow_check_shadow: bool,
    /// Global alpha applied to every paint.
    pub alpha: u8,
}

impl AvatarConfig {
    /// Build a config from resolved attributes.
    ///
    /// `placeholder_text` must already be normalized; see
    /// [`format_placeholder_text`](crate::format_placeholder_text).
    pub fn from_attributes(attrs: &AvatarAttributes, placeholder_text: Option<String>) -> Self {
        Self {
            border_width_px: attrs.border_width_px,
            border_color: attrs.border_color,
            background_color: attrs.placeholder_background_color,
            checked_background_color: attrs.checked_background_color,
            shadow_color: attrs.shadow_color,
            text_color: attrs.placeholder_text_color,
            shadow_radius: attrs.shadow_radius.max(0.0),
            placeholder_text,
            text_size_px: attrs.placeholder_text_size_px,
            checked: attrs.checked,
            allow_check_animation: true,
            allow_check_shadow: false,
            alpha: 0xFF,
        }
    }

    /// Returns `true` when the placeholder glyph has something to draw.
    pub fn has_placeholder_glyph(&self) -> bool {
        self.text_size_px > 0 && self.placeholder_text.as_deref().is_some_and(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn argb_unpacks_channels() {
        let c = argb(0x80FF_4020).to_rgba8();
        assert_eq!((c.r, c.g, c.b, c.a), (0xFF, 0x40, 0x20, 0x80));
    }

    #[test]
    fn negative_attribute_shadow_is_clamped() {
        let attrs = AvatarAttributes {
            shadow_radius: -3.0,
            ..AvatarAttributes::default()
        };
        let config = AvatarConfig::from_attributes(&attrs, None);
        assert_eq!(config.shadow_radius, 0.0);
        assert_eq!(config.alpha, 0xFF);
        assert!(config.allow_check_animation);
        assert!(!config.allow_check_shadow);
    }

    #[test]
    fn glyph_needs_text_and_size() {
        let attrs = AvatarAttributes::default();
        let mut config = AvatarConfig::from_attributes(&attrs, Some("AB".to_string()));
        assert!(!config.has_placeholder_glyph());
        config.text_size_px = 12;
        assert!(config.has_placeholder_glyph());
        config.placeholder_text = None;
        assert!(!config.has_placeholder_glyph());
    }
}
