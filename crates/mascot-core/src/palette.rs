//! Immutable color triples used to parameterize the halftone shader.
//!
//! A `Palette` is a value object: bodies copy it into their own uniform
//! block, so rotating the palette of one body never affects another.

/// Linear RGB color with components in \[0, 1\].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse a packed `0xRRGGBB` color.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Pack as a vec4 with alpha 1, the layout the shaders expect.
    pub fn to_vec4(self) -> [f32; 4] {
        [self.r, self.g, self.b, 1.0]
    }
}

/// Ordered triple {primary, secondary, dark} driving the three tone bands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub dark: Rgb,
}

impl Palette {
    pub fn from_hex(primary: u32, secondary: u32, dark: u32) -> Self {
        Self {
            primary: Rgb::from_hex(primary),
            secondary: Rgb::from_hex(secondary),
            dark: Rgb::from_hex(dark),
        }
    }
}

/// The stock palette list: orange/blue ink, mustard, inverted, ember.
pub fn default_palettes() -> Vec<Palette> {
    vec![
        Palette::from_hex(0xff4719, 0x00a8ff, 0x1a1a1a),
        Palette::from_hex(0xe6b31e, 0x00a8ff, 0x0d0d0d),
        Palette::from_hex(0x00a8ff, 0xff4719, 0x0f0f0f),
        Palette::from_hex(0xff7a00, 0x00d0ff, 0x111111),
    ]
}

/// Page background behind the widget; the native preview clears to this.
pub const PAGE_BG: u32 = 0xf0f0e6;
