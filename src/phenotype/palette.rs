//! Palette — tagged colour entries and their fixed RGB rendering
//!
//! The B and D loci remap one tag to another (`browned`, `diluted`). They never
//! touch RGB numbers, so repeated remaps cannot drift. `rgb()` is a pure
//! function of the tag.

use serde::{Deserialize, Serialize};

/// Linear RGB, components in 0..=1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Move `fraction` of the way toward `target`
    pub fn blend(self, target: Rgb, fraction: f64) -> Rgb {
        let keep = 1.0 - fraction;
        Rgb {
            r: keep * self.r + fraction * target.r,
            g: keep * self.g + fraction * target.g,
            b: keep * self.b + fraction * target.b,
        }
    }

    /// "#rrggbb"
    pub fn hex(&self) -> String {
        let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", channel(self.r), channel(self.g), channel(self.b))
    }
}

pub const BLACK: Rgb = Rgb::new(0.05, 0.05, 0.05);
pub const BROWN: Rgb = Rgb::new(0.45, 0.25, 0.07);
pub const BLUE: Rgb = Rgb::new(0.35, 0.40, 0.50);
pub const ISABELLA: Rgb = Rgb::new(0.55, 0.45, 0.40);
pub const GOLDEN: Rgb = Rgb::new(0.92, 0.70, 0.20);
pub const CREAM: Rgb = Rgb::new(0.96, 0.85, 0.60);
pub const GRAY: Rgb = Rgb::new(0.60, 0.60, 0.65);
pub const TAN: Rgb = Rgb::new(0.94, 0.79, 0.45);
pub const FAWN: Rgb = Rgb::new(0.85, 0.65, 0.35);
pub const WHITE: Rgb = Rgb::new(0.95, 0.95, 0.95);
/// Reference "light" colour that long coats blend legs and ears toward
pub const WHEAT: Rgb = Rgb::new(0.96, 0.87, 0.70);

/// Black-based pigment and its B/D variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Eumelanin {
    Black,
    Brown,
    Blue,
    Isabella,
}

impl Eumelanin {
    pub fn browned(self) -> Self {
        match self {
            Eumelanin::Black => Eumelanin::Brown,
            Eumelanin::Blue => Eumelanin::Isabella,
            other => other,
        }
    }

    pub fn diluted(self) -> Self {
        match self {
            Eumelanin::Black => Eumelanin::Blue,
            Eumelanin::Brown => Eumelanin::Isabella,
            other => other,
        }
    }

    pub fn rgb(self) -> Rgb {
        match self {
            Eumelanin::Black => BLACK,
            Eumelanin::Brown => BROWN,
            Eumelanin::Blue => BLUE,
            Eumelanin::Isabella => ISABELLA,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Eumelanin::Black => "black",
            Eumelanin::Brown => "brown/liver",
            Eumelanin::Blue => "blue/gray",
            Eumelanin::Isabella => "isabella/lilac",
        }
    }
}

/// Red-based pigment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phaeomelanin {
    Red,
    Cream,
}

/// One palette entry. Coat entries carry their pigment; point tones do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shade {
    RecessiveRed(Phaeomelanin),
    Solid(Eumelanin),
    Brindle(Eumelanin),
    Sable(Eumelanin),
    WolfSable(Eumelanin),
    TanPoint(Eumelanin),
    RecessiveBlack(Eumelanin),
    Fawn,
    Grizzle,
    Tan,
}

impl Shade {
    fn map_pigment(self, f: impl Fn(Eumelanin) -> Eumelanin) -> Self {
        match self {
            Shade::Solid(e) => Shade::Solid(f(e)),
            Shade::Brindle(e) => Shade::Brindle(f(e)),
            Shade::Sable(e) => Shade::Sable(f(e)),
            Shade::WolfSable(e) => Shade::WolfSable(f(e)),
            Shade::TanPoint(e) => Shade::TanPoint(f(e)),
            Shade::RecessiveBlack(e) => Shade::RecessiveBlack(f(e)),
            other => other,
        }
    }

    /// B locus remap: black pigment becomes brown
    pub fn browned(self) -> Self {
        self.map_pigment(Eumelanin::browned)
    }

    /// D locus remap: black to blue, brown to isabella, red to cream
    pub fn diluted(self) -> Self {
        match self {
            Shade::RecessiveRed(Phaeomelanin::Red) => Shade::RecessiveRed(Phaeomelanin::Cream),
            other => other.map_pigment(Eumelanin::diluted),
        }
    }

    pub fn rgb(self) -> Rgb {
        match self {
            Shade::RecessiveRed(Phaeomelanin::Red) => GOLDEN,
            Shade::RecessiveRed(Phaeomelanin::Cream) => CREAM,
            Shade::Solid(e) | Shade::RecessiveBlack(e) => e.rgb(),
            Shade::Brindle(e) => e.rgb().blend(GOLDEN, 0.5),
            Shade::Sable(e) => GOLDEN.blend(e.rgb(), 0.3),
            Shade::WolfSable(e) => GRAY.blend(e.rgb(), 0.4),
            Shade::TanPoint(e) => e.rgb().blend(TAN, 0.15),
            Shade::Fawn => FAWN,
            Shade::Grizzle => GRAY,
            Shade::Tan => TAN,
        }
    }

    /// Colour phrase used in descriptions, e.g. "brindle (black stripes)"
    pub fn describe(self) -> String {
        match self {
            Shade::RecessiveRed(Phaeomelanin::Red) => "golden/red".to_string(),
            Shade::RecessiveRed(Phaeomelanin::Cream) => "cream".to_string(),
            Shade::Solid(e) => format!("solid {}", e.name()),
            Shade::Brindle(e) => format!("brindle ({} stripes)", e.name()),
            Shade::Sable(e) => format!("sable/fawn ({} tips)", e.name()),
            Shade::WolfSable(e) => format!("wolf sable ({} banding)", e.name()),
            Shade::TanPoint(e) => format!("{} with tan points", e.name()),
            Shade::RecessiveBlack(e) => format!("recessive {}", e.name()),
            Shade::Fawn => "fawn".to_string(),
            Shade::Grizzle => "grizzle".to_string(),
            Shade::Tan => "tan".to_string(),
        }
    }
}
