//! Mii color lookup tables
//!
//! Fixed palettes mapping small integer indices to display colors.
//! Schema authors reference these when building Choice-Color features;
//! the indices are the values written into the character record.

use serde::{Deserialize, Serialize};

/// One entry of a color table.
///
/// Most palettes are flat swatches; a few (favorite color, lip color)
/// render as a paired top/bottom swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorEntry {
    /// Single display color, 0xRRGGBB
    Solid(u32),
    /// Two-tone swatch, 0xRRGGBB each
    Paired { top: u32, bottom: u32 },
}

impl ColorEntry {
    /// The color used when only one swatch can be shown (the top one for pairs).
    pub fn primary(&self) -> u32 {
        match *self {
            ColorEntry::Solid(c) => c,
            ColorEntry::Paired { top, .. } => top,
        }
    }

    /// CSS-style hex string of the primary color, e.g. `#d21e14`
    pub fn hex(&self) -> String {
        format!("#{:06x}", self.primary())
    }
}

/// Favorite (shirt) colors: red, orange, yellow, light green, dark green,
/// dark blue, light blue, pink, purple, brown, white, black.
pub const FAVORITE_COLORS: [ColorEntry; 12] = [
    ColorEntry::Paired { top: 0xd21e14, bottom: 0x630e09 },
    ColorEntry::Paired { top: 0xff6e19, bottom: 0x78340c },
    ColorEntry::Paired { top: 0xffd820, bottom: 0x78660f },
    ColorEntry::Paired { top: 0x78d220, bottom: 0x38630f },
    ColorEntry::Paired { top: 0x007830, bottom: 0x003817 },
    ColorEntry::Paired { top: 0x0a48bc, bottom: 0x052258 },
    ColorEntry::Paired { top: 0x3caade, bottom: 0x1c5068 },
    ColorEntry::Paired { top: 0xf55a7d, bottom: 0x732a3b },
    ColorEntry::Paired { top: 0x7328ad, bottom: 0x361351 },
    ColorEntry::Paired { top: 0x483818, bottom: 0x221a0b },
    ColorEntry::Paired { top: 0xe0e0e0, bottom: 0x696969 },
    ColorEntry::Paired { top: 0x181814, bottom: 0x0b0b09 },
];

/// Skin tones, light to dark
pub const SKIN_COLORS: [ColorEntry; 6] = [
    ColorEntry::Solid(0xffd3ad),
    ColorEntry::Solid(0xfeb66b),
    ColorEntry::Solid(0xde7942),
    ColorEntry::Solid(0xffaa8c),
    ColorEntry::Solid(0xad5129),
    ColorEntry::Solid(0x632c18),
];

pub const HAIR_COLORS: [ColorEntry; 8] = [
    ColorEntry::Solid(0x000000),
    ColorEntry::Solid(0x402010),
    ColorEntry::Solid(0x5c180a),
    ColorEntry::Solid(0x7c3a14),
    ColorEntry::Solid(0x787880),
    ColorEntry::Solid(0x4e3e11),
    ColorEntry::Solid(0x875917),
    ColorEntry::Solid(0xd0a049),
];

pub const EYE_COLORS: [ColorEntry; 6] = [
    ColorEntry::Solid(0x000000),
    ColorEntry::Solid(0x717372),
    ColorEntry::Solid(0x663c2c),
    ColorEntry::Solid(0x686537),
    ColorEntry::Solid(0x4b58a8),
    ColorEntry::Solid(0x387059),
];

pub const MOUTH_COLORS: [ColorEntry; 5] = [
    ColorEntry::Solid(0xd04401),
    ColorEntry::Solid(0xf30100),
    ColorEntry::Solid(0xfd393a),
    ColorEntry::Solid(0xf58862),
    ColorEntry::Solid(0x1f1d1d),
];

/// Lipstick variants of the mouth colors (upper/lower lip pair)
pub const LIP_COLORS: [ColorEntry; 5] = [
    ColorEntry::Paired { top: 0x823018, bottom: 0xd85209 },
    ColorEntry::Paired { top: 0x780c0d, bottom: 0xf00c09 },
    ColorEntry::Paired { top: 0x882028, bottom: 0xf54849 },
    ColorEntry::Paired { top: 0xdc7751, bottom: 0xf09a74 },
    ColorEntry::Paired { top: 0x461e0a, bottom: 0x8c503f },
];

pub const GLASSES_COLORS: [ColorEntry; 6] = [
    ColorEntry::Solid(0x000000),
    ColorEntry::Solid(0x5d391a),
    ColorEntry::Solid(0xa01612),
    ColorEntry::Solid(0x2e3969),
    ColorEntry::Solid(0xa4601e),
    ColorEntry::Solid(0x766f67),
];
