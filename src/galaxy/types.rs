use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Category of star at the centre of a system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StarType {
    MainSequence,
    RedGiant,
    WhiteDwarf,
    BlueGiant,
}

impl StarType {
    /// All star types, in sampling-table order
    pub fn all() -> &'static [Self] {
        &[Self::MainSequence, Self::RedGiant, Self::WhiteDwarf, Self::BlueGiant]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::MainSequence => "Main Sequence Star",
            Self::RedGiant => "Red Giant",
            Self::WhiteDwarf => "White Dwarf",
            Self::BlueGiant => "Blue Giant",
        }
    }
}

impl std::fmt::Display for StarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Category of planet, drives size range, colour and resource affinity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanetType {
    Terrestrial,
    GasGiant,
    IceWorld,
    Desert,
    Volcanic,
    Oceanic,
}

impl PlanetType {
    pub fn all() -> &'static [Self] {
        &[
            Self::Terrestrial,
            Self::GasGiant,
            Self::IceWorld,
            Self::Desert,
            Self::Volcanic,
            Self::Oceanic,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Terrestrial => "Terrestrial",
            Self::GasGiant => "Gas Giant",
            Self::IceWorld => "Ice World",
            Self::Desert => "Desert",
            Self::Volcanic => "Volcanic",
            Self::Oceanic => "Oceanic",
        }
    }
}

impl std::fmt::Display for PlanetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Extractable material found on planets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceType {
    Minerals,
    Crystals,
    Gases,
    Organic,
    Energy,
    Water,
    RareElements,
}

impl ResourceType {
    pub fn all() -> &'static [Self] {
        &[
            Self::Minerals,
            Self::Crystals,
            Self::Gases,
            Self::Organic,
            Self::Energy,
            Self::Water,
            Self::RareElements,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Minerals => "Minerals",
            Self::Crystals => "Crystals",
            Self::Gases => "Gases",
            Self::Organic => "Organic Matter",
            Self::Energy => "Energy Source",
            Self::Water => "Water",
            Self::RareElements => "Rare Elements",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Upper bound of every resource amount.
pub const MAX_RESOURCE_AMOUNT: u8 = 100;

/// Resource amounts keyed by type. Always holds every `ResourceType`.
pub type ResourceMap = BTreeMap<ResourceType, u8>;

/// A point on the logical screen, in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle on the logical screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x.saturating_add(self.width / 2), self.y.saturating_add(self.height / 2))
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// True when the two rectangles share any interior area.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Grow by `dx` on the left and right and `dy` on the top and bottom.
    pub fn inflate(&self, dx: i32, dy: i32) -> Bounds {
        Bounds::new(
            self.x.saturating_sub(dx),
            self.y.saturating_sub(dy),
            self.width.saturating_add(dx.saturating_mul(2)),
            self.height.saturating_add(dy.saturating_mul(2)),
        )
    }
}

/// A single planet, owned by its star system.
#[derive(Clone, Debug, PartialEq)]
pub struct Planet {
    /// "<system name> <orbit>"
    pub name: String,
    pub planet_type: PlanetType,
    pub size: u32,
    /// 1-based orbit index
    pub orbit_number: u32,
    /// Placement angle in the system view (radians)
    pub angle: f64,
    pub resources: ResourceMap,
}

impl Planet {
    pub fn resource(&self, resource: ResourceType) -> u8 {
        self.resources.get(&resource).copied().unwrap_or(0)
    }

    pub fn total_resources(&self) -> u32 {
        self.resources.values().map(|&v| v as u32).sum()
    }

    /// Resource with the highest amount; ties resolve to the earlier type.
    pub fn richest_resource(&self) -> Option<(ResourceType, u8)> {
        self.resources
            .iter()
            .fold(None, |best: Option<(ResourceType, u8)>, (&r, &amount)| match best {
                Some((_, best_amount)) if best_amount >= amount => best,
                _ => Some((r, amount)),
            })
    }
}

/// Gap between the bottom of a star and the top of its name label.
pub const LABEL_GAP: i32 = 15;
/// Height reserved for a system's name label.
pub const LABEL_HEIGHT: i32 = 24;
/// Spacing kept clear around every system during placement.
pub const SYSTEM_PADDING: i32 = 20;

/// A star and its planets.
#[derive(Clone, Debug, PartialEq)]
pub struct StarSystem {
    pub position: Point,
    pub name: String,
    pub star_type: StarType,
    pub size: u32,
    pub planets: Vec<Planet>,
}

impl StarSystem {
    /// Square collision rect centred on the star.
    pub fn rect(&self) -> Bounds {
        let s = i32::try_from(self.size).unwrap_or(i32::MAX);
        Bounds::new(
            self.position.x.saturating_sub(s),
            self.position.y.saturating_sub(s),
            s.saturating_mul(2),
            s.saturating_mul(2),
        )
    }

    /// Star rect padded on every side and extended down to cover the name label.
    pub fn padded_bounds(&self, padding: i32, label_height: i32) -> Bounds {
        let rect = self.rect().inflate(padding, padding);
        Bounds::new(
            rect.x,
            rect.y,
            rect.width,
            rect.height.saturating_add(LABEL_GAP).saturating_add(label_height),
        )
    }

    pub fn collides_with(&self, other: &StarSystem, padding: i32, label_height: i32) -> bool {
        self.padded_bounds(padding, label_height)
            .intersects(&other.padded_bounds(padding, label_height))
    }

    pub fn planet_count(&self) -> usize {
        self.planets.len()
    }
}

/// The full set of star systems in play.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Galaxy {
    pub systems: Vec<StarSystem>,
}

impl Galaxy {
    pub fn new(systems: Vec<StarSystem>) -> Self {
        Self { systems }
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StarSystem> {
        self.systems.get(index)
    }

    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.systems.iter().position(|s| s.name == name)
    }

    pub fn planet_count(&self) -> usize {
        self.systems.iter().map(|s| s.planets.len()).sum()
    }
}
