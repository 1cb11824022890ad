use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 32-bit stroke color, stored as alpha, red, green, blue.
#[derive(Eq, PartialEq, Copy, Clone, Default, Hash, Serialize, Deserialize)]
#[serde(try_from = "ArgbRepr", into = "String")]
pub struct Argb(pub u8, pub u8, pub u8, pub u8);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseArgbError {
    #[error("empty color string")]
    Empty,
    #[error("expected 6 or 8 hex digits after '#', got {0}")]
    HexLength(usize),
    #[error("invalid hex digit in color {0:?}")]
    HexDigit(String),
    #[error("unknown color name {0:?}")]
    UnknownName(String),
}

/// Accepted serialized forms: a packed `0xAARRGGBB` integer or a color string.
#[derive(Deserialize)]
#[serde(untagged)]
enum ArgbRepr {
    Packed(u32),
    Text(String),
}

impl TryFrom<ArgbRepr> for Argb {
    type Error = ParseArgbError;

    fn try_from(value: ArgbRepr) -> Result<Self, Self::Error> {
        match value {
            ArgbRepr::Packed(packed) => Ok(Argb::from(packed)),
            ArgbRepr::Text(text) => text.parse(),
        }
    }
}

impl Argb {
    pub const fn from_u32(packed: u32) -> Self {
        let [a, r, g, b] = packed.to_be_bytes();
        Argb(a, r, g, b)
    }

    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes([self.0, self.1, self.2, self.3])
    }

    pub const fn is_opaque(self) -> bool {
        self.0 == u8::MAX
    }

    /// Same color with another alpha.
    #[must_use]
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Argb(alpha, self.1, self.2, self.3)
    }
}

#[allow(missing_docs)]
impl Argb {
    pub const BLACK: Argb = Argb::from_u32(0xff00_0000);
    pub const DARK_GRAY: Argb = Argb::from_u32(0xff44_4444);
    pub const GRAY: Argb = Argb::from_u32(0xff88_8888);
    pub const LIGHT_GRAY: Argb = Argb::from_u32(0xffcc_cccc);
    pub const WHITE: Argb = Argb::from_u32(0xffff_ffff);
    pub const RED: Argb = Argb::from_u32(0xffff_0000);
    pub const GREEN: Argb = Argb::from_u32(0xff00_ff00);
    pub const BLUE: Argb = Argb::from_u32(0xff00_00ff);
    pub const YELLOW: Argb = Argb::from_u32(0xffff_ff00);
    pub const CYAN: Argb = Argb::from_u32(0xff00_ffff);
    pub const MAGENTA: Argb = Argb::from_u32(0xffff_00ff);
}

// Names understood by the host's color parser, lowercase.
const NAMED_COLORS: &[(&str, Argb)] = &[
    ("black", Argb::BLACK),
    ("darkgray", Argb::DARK_GRAY),
    ("darkgrey", Argb::DARK_GRAY),
    ("gray", Argb::GRAY),
    ("grey", Argb::GRAY),
    ("lightgray", Argb::LIGHT_GRAY),
    ("lightgrey", Argb::LIGHT_GRAY),
    ("white", Argb::WHITE),
    ("red", Argb::RED),
    ("green", Argb::GREEN),
    ("blue", Argb::BLUE),
    ("yellow", Argb::YELLOW),
    ("cyan", Argb::CYAN),
    ("magenta", Argb::MAGENTA),
    ("aqua", Argb::CYAN),
    ("fuchsia", Argb::MAGENTA),
    ("lime", Argb::GREEN),
    ("maroon", Argb::from_u32(0xff80_0000)),
    ("navy", Argb::from_u32(0xff00_0080)),
    ("olive", Argb::from_u32(0xff80_8000)),
    ("purple", Argb::from_u32(0xff80_0080)),
    ("silver", Argb::from_u32(0xffc0_c0c0)),
    ("teal", Argb::from_u32(0xff00_8080)),
];

impl FromStr for Argb {
    type Err = ParseArgbError;

    /// `#RRGGBB` (opaque), `#AARRGGBB`, or a color name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseArgbError::Empty);
        }
        if let Some(hex) = s.strip_prefix('#') {
            let packed = u32::from_str_radix(hex, 16)
                .ok()
                .filter(|_| hex.bytes().all(|b| b.is_ascii_hexdigit()))
                .ok_or_else(|| ParseArgbError::HexDigit(s.to_owned()));
            return match hex.len() {
                6 => Ok(Argb::from(packed? | 0xff00_0000)),
                8 => Ok(Argb::from(packed?)),
                len => Err(ParseArgbError::HexLength(len)),
            };
        }
        NAMED_COLORS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|&(_, color)| color)
            .ok_or_else(|| ParseArgbError::UnknownName(s.to_owned()))
    }
}

impl From<u32> for Argb {
    fn from(packed: u32) -> Self {
        Argb::from_u32(packed)
    }
}

impl From<Argb> for u32 {
    fn from(color: Argb) -> Self {
        color.to_u32()
    }
}

impl From<Argb> for String {
    fn from(color: Argb) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.to_u32())
    }
}

impl fmt::Debug for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Argb({self})")
    }
}
