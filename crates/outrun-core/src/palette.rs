//! Segment colour themes

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// Pack as 0xAARRGGBB
    pub fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Blend towards `other`; `amount` 0.0 keeps self, 1.0 gives other.
    pub fn mix(self, other: Color, amount: f32) -> Color {
        let t = amount.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color {
            r: ch(self.r, other.r),
            g: ch(self.g, other.g),
            b: ch(self.b, other.b),
            a: 0xFF,
        }
    }
}

pub const SKY: Color = Color::rgb(0x72, 0xD7, 0xEE);
pub const TREE: Color = Color::rgb(0x00, 0x51, 0x08);
pub const FOG: Color = Color::rgb(0x00, 0x51, 0x08);

/// Colours used to draw one road segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSet {
    pub road: Color,
    pub grass: Color,
    pub rumble: Color,
    /// Lane marker colour; bands without one draw no markers
    pub lane: Option<Color>,
}

/// Named colour theme of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Dark,
    Light,
    /// Start banner
    Start,
    /// Finish banner
    Finish,
}

impl Palette {
    /// Alternating rumble band for segment `index`
    pub fn rumble_band(index: usize, rumble_length: usize) -> Self {
        if (index / rumble_length.max(1)) % 2 == 0 {
            Palette::Dark
        } else {
            Palette::Light
        }
    }

    pub fn colors(self) -> ColorSet {
        match self {
            Palette::Light => ColorSet {
                road: Color::rgb(0x6B, 0x6B, 0x6B),
                grass: Color::rgb(0x10, 0xAA, 0x10),
                rumble: Color::rgb(0x55, 0x55, 0x55),
                lane: Some(Color::rgb(0xCC, 0xCC, 0xCC)),
            },
            Palette::Dark => ColorSet {
                road: Color::rgb(0x69, 0x69, 0x69),
                grass: Color::rgb(0x00, 0x9A, 0x00),
                rumble: Color::rgb(0xBB, 0xBB, 0xBB),
                lane: None,
            },
            Palette::Start => ColorSet {
                road: Color::rgb(0xFF, 0xFF, 0xFF),
                grass: Color::rgb(0xFF, 0xFF, 0xFF),
                rumble: Color::rgb(0xFF, 0xFF, 0xFF),
                lane: None,
            },
            Palette::Finish => ColorSet {
                road: Color::rgb(0, 0, 0),
                grass: Color::rgb(0, 0, 0),
                rumble: Color::rgb(0, 0, 0),
                lane: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_alternate_every_rumble_length() {
        let bands: Vec<Palette> = (0..9).map(|i| Palette::rumble_band(i, 3)).collect();
        assert_eq!(bands[0..3], [Palette::Dark; 3]);
        assert_eq!(bands[3..6], [Palette::Light; 3]);
        assert_eq!(bands[6..9], [Palette::Dark; 3]);
    }

    #[test]
    fn only_light_band_has_lanes() {
        assert!(Palette::Light.colors().lane.is_some());
        assert!(Palette::Dark.colors().lane.is_none());
    }

    #[test]
    fn mix_and_pack() {
        assert_eq!(SKY.to_argb(), 0xFF72D7EE);
        assert_eq!(Color::rgb(0, 0, 0).mix(Color::rgb(200, 100, 50), 0.5), Color::rgb(100, 50, 25));
    }
}
