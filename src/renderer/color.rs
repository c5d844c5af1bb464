//! RGBA colors for 2D drawing

use serde::{Deserialize, Serialize};

/// 8-bit RGB with a float alpha, matching CSS `rgba()`
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS color string, e.g. `rgba(168, 85, 247, 0.7)`
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Fixed colors
pub mod colors {
    use super::Rgba;

    /// Connection lines (alpha is set per line)
    pub const LINK: Rgba = Rgba::new(255, 255, 255, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_string() {
        assert_eq!(Rgba::new(168, 85, 247, 0.7).to_css(), "rgba(168, 85, 247, 0.7)");
        assert_eq!(colors::LINK.with_alpha(0.2).to_css(), "rgba(255, 255, 255, 0.2)");
    }
}
