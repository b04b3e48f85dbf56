//! Colors for game elements

use serde::{Deserialize, Serialize};

/// Linear RGBA in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba(pub [f32; 4]);

impl Rgba {
    pub const WHITE: Rgba = Rgba([1.0, 1.0, 1.0, 1.0]);

    /// From 0xRRGGBB
    pub const fn from_hex(hex: u32) -> Self {
        Rgba([
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
            1.0,
        ])
    }

    /// From CSS-style HSL (hue in degrees, saturation/lightness in [0, 1])
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = lightness - c / 2.0;
        Rgba([r + m, g + m, b + m, 1.0])
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        let [r, g, b, _] = self.0;
        Rgba([r, g, b, alpha.clamp(0.0, 1.0)])
    }

    pub fn alpha(&self) -> f32 {
        self.0[3]
    }

    /// `rgba(r, g, b, a)` for 2D canvas styles
    pub fn to_css(&self) -> String {
        let [r, g, b, a] = self.0;
        format!(
            "rgba({}, {}, {}, {})",
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
            a
        )
    }
}

pub const BACKGROUND: Rgba = Rgba::from_hex(0x1a1a2e);
pub const PEG: Rgba = Rgba::from_hex(0xff6348);
pub const PEG_LIT: Rgba = Rgba::from_hex(0xffeb3b);
pub const PEG_GLOW: Rgba = Rgba([1.0, 1.0, 100.0 / 255.0, 1.0]);
pub const BALL_OUTLINE: Rgba = Rgba([1.0, 1.0, 1.0, 0.5]);

/// Ball fill: hsl(hue, 70%, 60%)
pub fn ball_fill(hue: f32) -> Rgba {
    Rgba::from_hsl(hue, 0.7, 0.6)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Rgba, b: [f32; 4]) -> bool {
        a.0.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-3)
    }

    #[test]
    fn test_from_hex() {
        assert!(close(Rgba::from_hex(0xff0000), [1.0, 0.0, 0.0, 1.0]));
        assert_eq!(BACKGROUND.to_css(), "rgba(26, 26, 46, 1)");
    }

    #[test]
    fn test_from_hsl_primaries() {
        assert!(close(Rgba::from_hsl(0.0, 1.0, 0.5), [1.0, 0.0, 0.0, 1.0]));
        assert!(close(Rgba::from_hsl(120.0, 1.0, 0.5), [0.0, 1.0, 0.0, 1.0]));
        assert!(close(Rgba::from_hsl(240.0, 1.0, 0.5), [0.0, 0.0, 1.0, 1.0]));
        assert!(close(Rgba::from_hsl(360.0, 1.0, 0.5), [1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_ball_fill_matches_css_hsl() {
        // hsl(0, 70%, 60%) = rgb(224, 82, 82)
        assert_eq!(ball_fill(0.0).to_css(), "rgba(224, 82, 82, 1)");
    }

    #[test]
    fn test_with_alpha_clamps() {
        assert_eq!(Rgba::WHITE.with_alpha(2.0).alpha(), 1.0);
        assert_eq!(Rgba::WHITE.with_alpha(0.25).to_css(), "rgba(255, 255, 255, 0.25)");
    }
}
