//! RGBA color type used by colorschemes.
//!
//! Colors are stored as floating-point components so a renderer can convert
//! them to whatever the terminal supports (true color, 256 or 16 colors).
//!
//! # Examples
//!
//! ```
//! use qedit_core::Rgba;
//!
//! assert_eq!(Rgba::OLIVE, Rgba::from_rgb_u8(128, 128, 0));
//! assert_eq!(Rgba::WHITE.b, 1.0);
//! ```

/// A color with straight (non-premultiplied) alpha, components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);

    // The classic 16-color palette names used by terminal colorschemes.
    pub const GRAY: Self = Self::from_rgb_u8(128, 128, 128);
    pub const LIGHT_GRAY: Self = Self::from_rgb_u8(192, 192, 192);
    pub const OLIVE: Self = Self::from_rgb_u8(128, 128, 0);
    pub const NAVY: Self = Self::from_rgb_u8(0, 0, 128);
    pub const PURPLE: Self = Self::from_rgb_u8(128, 0, 128);
    pub const FUCHSIA: Self = Self::from_rgb_u8(255, 0, 255);

    /// Opaque color from float components.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque color from byte components.
    #[must_use]
    pub const fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }
}
