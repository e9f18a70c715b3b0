// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the avatar setters.

use core::fmt;

/// Error returned by setters that reject their input.
///
/// A rejected call leaves the avatar exactly as it was: no configuration
/// change, no paint rebuild, and no redraw request.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AvatarError {
    /// A size, width, or radius was negative or not a number.
    InvalidArgument {
        /// Which quantity was rejected, e.g. `"border width"`.
        what: &'static str,
        /// The rejected magnitude, before any unit conversion.
        value: f32,
    },
}

impl AvatarError {
    pub(crate) fn check_non_negative(what: &'static str, value: f32) -> Result<(), Self> {
        if value.is_nan() || value < 0.0 {
            return Err(Self::InvalidArgument { what, value });
        }
        Ok(())
    }
}

impl fmt::Display for AvatarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { what, value } => {
                write!(f, "{what} cannot be less than zero (got {value})")
            }
        }
    }
}

impl core::error::Error for AvatarError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn negative_and_nan_are_rejected() {
        assert!(AvatarError::check_non_negative("border width", 0.0).is_ok());
        assert!(AvatarError::check_non_negative("border width", 4.5).is_ok());
        assert_eq!(
            AvatarError::check_non_negative("border width", -1.0),
            Err(AvatarError::InvalidArgument {
                what: "border width",
                value: -1.0
            })
        );
        assert!(AvatarError::check_non_negative("text size", f32::NAN).is_err());
    }

    #[test]
    fn display_names_the_quantity() {
        let err = AvatarError::InvalidArgument {
            what: "text size",
            value: -2.0,
        };
        assert_eq!(err.to_string(), "text size cannot be less than zero (got -2)");
    }
}
