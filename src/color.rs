// Simple color struct, created from an unsigned 32 representing RRGGBBAA
// or from explicit channels with a fractional alpha

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Color {
        Color { r, g, b, a }
    }

    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = (num & 0xff) as f64 / 255.0;

        Color { r, g, b, a }
    }

    pub fn with_alpha(self, a: f64) -> Color {
        Color {
            a: a.max(0.0).min(1.0),
            ..self
        }
    }

    // CSS color string understood by fillStyle/strokeStyle
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_u32_splits_channels() {
        let c = Color::from_u32(0x00f3ffff);
        assert_eq!((c.r, c.g, c.b), (0, 243, 255));
        assert!((c.a - 1.0).abs() < 1e-12);
    }

    #[test]
    fn css_string_keeps_fractional_alpha() {
        assert_eq!(Color::rgba(0, 243, 255, 0.9).to_css(), "rgba(0, 243, 255, 0.9)");
        assert_eq!(Color::from_u32(0x000000ff).to_css(), "rgba(0, 0, 0, 1)");
    }

    #[test]
    fn with_alpha_is_clamped() {
        let c = Color::rgba(1, 2, 3, 1.0);
        assert_eq!(c.with_alpha(1.5).a, 1.0);
        assert_eq!(c.with_alpha(-0.2).a, 0.0);
        assert_eq!(c.with_alpha(0.25), Color::rgba(1, 2, 3, 0.25));
    }
}
