//! Typed scene configuration.
//!
//! The settings panel and any persistence live outside the engine;
//! what arrives here is a plain record of numbers and palette names.
//! Out-of-range values are sanitized by `clamped()` rather than
//! rejected, so a malformed scene degrades to fewer or no instances
//! instead of refusing to render.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;

/// Palette families a feature color may name. Resolution to an actual
/// display color is the host's lookup; the engine only carries the
/// name/shade pair through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteName {
    Gray,
    Red,
    Pink,
    Grape,
    Violet,
    Indigo,
    Blue,
    Cyan,
    Teal,
    Green,
    Lime,
    Yellow,
    Orange,
}

impl PaletteName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gray => "gray",
            Self::Red => "red",
            Self::Pink => "pink",
            Self::Grape => "grape",
            Self::Violet => "violet",
            Self::Indigo => "indigo",
            Self::Blue => "blue",
            Self::Cyan => "cyan",
            Self::Teal => "teal",
            Self::Green => "green",
            Self::Lime => "lime",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
        }
    }
}

impl FromStr for PaletteName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gray" => Ok(Self::Gray),
            "red" => Ok(Self::Red),
            "pink" => Ok(Self::Pink),
            "grape" => Ok(Self::Grape),
            "violet" => Ok(Self::Violet),
            "indigo" => Ok(Self::Indigo),
            "blue" => Ok(Self::Blue),
            "cyan" => Ok(Self::Cyan),
            "teal" => Ok(Self::Teal),
            "green" => Ok(Self::Green),
            "lime" => Ok(Self::Lime),
            "yellow" => Ok(Self::Yellow),
            "orange" => Ok(Self::Orange),
            other => Err(Error::Config(format!("unknown palette name: {other}"))),
        }
    }
}

/// A palette family plus a shade index, 0 (lightest) through 9.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteColor {
    pub name: PaletteName,
    pub shade: u8,
}

impl PaletteColor {
    pub fn new(name: PaletteName, shade: u8) -> Self {
        Self {
            name,
            shade: shade.min(9),
        }
    }

    /// Parse a "name/shade" pair, e.g. `blue/7`.
    pub fn parse(s: &str) -> Result<Self> {
        let (name, shade) = s
            .split_once('/')
            .ok_or_else(|| Error::Config(format!("expected name/shade, got: {s}")))?;
        let shade: u8 = shade
            .parse()
            .map_err(|_| Error::Config(format!("bad shade in: {s}")))?;
        if shade > 9 {
            return Err(Error::Config(format!("shade out of range 0-9: {s}")));
        }
        Ok(Self {
            name: name.parse()?,
            shade,
        })
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name.as_str(), self.shade)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Root of all deterministic randomness in the scene.
    pub seed: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub size: f32,
    pub segments: u32,
    pub floor_y: f32,
    pub thickness: f32,
    pub color: PaletteColor,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            size: 4.0,
            segments: 12,
            floor_y: -0.9,
            thickness: 0.5,
            color: PaletteColor::new(PaletteName::Yellow, 2),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterConfig {
    pub level: f32,
    pub segments: u32,
    pub color: PaletteColor,
    pub opacity: f32,
    pub brightness: f32,
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            level: 0.8,
            segments: 12,
            color: PaletteColor::new(PaletteName::Blue, 7),
            opacity: 0.6,
            brightness: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RockConfig {
    pub count: i32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub color: PaletteColor,
}

impl Default for RockConfig {
    fn default() -> Self {
        Self {
            count: 12,
            min_scale: 0.05,
            max_scale: 0.18,
            color: PaletteColor::new(PaletteName::Gray, 6),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeaweedConfig {
    pub count: i32,
    pub min_height: f32,
    pub max_height: f32,
    pub color: PaletteColor,
}

impl Default for SeaweedConfig {
    fn default() -> Self {
        Self {
            count: 20,
            min_height: 0.5,
            max_height: 1.1,
            color: PaletteColor::new(PaletteName::Green, 7),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BubbleConfig {
    pub count: i32,
    pub min_size: f32,
    pub max_size: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub opacity: f32,
    pub color: PaletteColor,
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self {
            count: 40,
            min_size: 0.01,
            max_size: 0.04,
            min_speed: 0.1,
            max_speed: 0.3,
            opacity: 0.5,
            color: PaletteColor::new(PaletteName::Cyan, 1),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatureConfig {
    pub starfish_count: i32,
    pub starfish_color: PaletteColor,
}

impl Default for CreatureConfig {
    fn default() -> Self {
        Self {
            starfish_count: 6,
            starfish_color: PaletteColor::new(PaletteName::Orange, 5),
        }
    }
}

/// Complete scene configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub world: WorldConfig,
    pub terrain: TerrainConfig,
    pub water: WaterConfig,
    pub rocks: RockConfig,
    pub seaweed: SeaweedConfig,
    pub bubbles: BubbleConfig,
    pub creatures: CreatureConfig,
}

impl SceneConfig {
    /// Sanitize out-of-range values: counts below zero become zero,
    /// inverted min/max ranges are swapped, grid resolutions stay at
    /// least 1, shades stay within the palette.
    pub fn clamped(mut self) -> Self {
        self.terrain.segments = self.terrain.segments.max(1);
        self.terrain.size = self.terrain.size.max(0.1);
        self.terrain.thickness = self.terrain.thickness.max(0.0);
        self.water.segments = self.water.segments.max(1);
        self.water.opacity = self.water.opacity.clamp(0.0, 1.0);
        self.bubbles.opacity = self.bubbles.opacity.clamp(0.0, 1.0);

        self.rocks.count = self.rocks.count.max(0);
        self.seaweed.count = self.seaweed.count.max(0);
        self.bubbles.count = self.bubbles.count.max(0);
        self.creatures.starfish_count = self.creatures.starfish_count.max(0);

        sort_pair(&mut self.rocks.min_scale, &mut self.rocks.max_scale);
        sort_pair(&mut self.seaweed.min_height, &mut self.seaweed.max_height);
        sort_pair(&mut self.bubbles.min_size, &mut self.bubbles.max_size);
        sort_pair(&mut self.bubbles.min_speed, &mut self.bubbles.max_speed);

        for color in [
            &mut self.terrain.color,
            &mut self.water.color,
            &mut self.rocks.color,
            &mut self.seaweed.color,
            &mut self.bubbles.color,
            &mut self.creatures.starfish_color,
        ] {
            color.shade = color.shade.min(9);
        }
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

fn sort_pair(min: &mut f32, max: &mut f32) {
    if min > max {
        std::mem::swap(min, max);
    }
}
