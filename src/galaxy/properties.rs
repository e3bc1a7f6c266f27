//! Static property tables for star and planet types.

use std::ops::RangeInclusive;

use super::types::{PlanetType, ResourceType, StarType};

/// RGB colour used when drawing a body.
pub type Rgb = (u8, u8, u8);

pub const YELLOW: Rgb = (255, 255, 0);
pub const RED: Rgb = (255, 100, 100);
pub const BLUE: Rgb = (100, 150, 255);
pub const LIGHT_BLUE: Rgb = (173, 216, 230);
pub const GREEN: Rgb = (0, 255, 0);
pub const ORANGE: Rgb = (255, 165, 0);
pub const PURPLE: Rgb = (147, 112, 219);
pub const PINK: Rgb = (255, 192, 203);

/// Per-type generation parameters for stars.
#[derive(Clone, Debug, PartialEq)]
pub struct StarProperties {
    pub color: Rgb,
    pub size: RangeInclusive<u32>,
    pub planets: RangeInclusive<usize>,
    /// Relative sampling weight
    pub probability: f64,
}

impl StarType {
    pub fn properties(&self) -> StarProperties {
        match self {
            StarType::MainSequence => StarProperties {
                color: YELLOW,
                size: 4..=6,
                planets: 2..=5,
                probability: 0.4,
            },
            StarType::RedGiant => StarProperties {
                color: RED,
                size: 8..=12,
                planets: 1..=3,
                probability: 0.3,
            },
            StarType::WhiteDwarf => StarProperties {
                color: LIGHT_BLUE,
                size: 2..=4,
                planets: 0..=2,
                probability: 0.2,
            },
            StarType::BlueGiant => StarProperties {
                color: BLUE,
                size: 6..=10,
                planets: 3..=6,
                probability: 0.1,
            },
        }
    }

    pub fn color(&self) -> Rgb {
        self.properties().color
    }

    pub fn min_size(&self) -> u32 {
        *self.properties().size.start()
    }
}

/// Per-type generation parameters for planets.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanetProperties {
    pub color: Rgb,
    pub size: RangeInclusive<u32>,
    /// Resources that are plentiful on this kind of planet
    pub common_resources: &'static [ResourceType],
}

impl PlanetType {
    pub fn properties(&self) -> PlanetProperties {
        use ResourceType::*;
        match self {
            PlanetType::Terrestrial => PlanetProperties {
                color: GREEN,
                size: 8..=12,
                common_resources: &[Minerals, Water, Organic],
            },
            PlanetType::GasGiant => PlanetProperties {
                color: ORANGE,
                size: 14..=20,
                common_resources: &[Gases, Energy],
            },
            PlanetType::IceWorld => PlanetProperties {
                color: LIGHT_BLUE,
                size: 6..=10,
                common_resources: &[Water, Crystals],
            },
            PlanetType::Desert => PlanetProperties {
                color: YELLOW,
                size: 8..=12,
                common_resources: &[Minerals, RareElements],
            },
            PlanetType::Volcanic => PlanetProperties {
                color: RED,
                size: 8..=14,
                common_resources: &[Minerals, Energy, RareElements],
            },
            PlanetType::Oceanic => PlanetProperties {
                color: BLUE,
                size: 10..=16,
                common_resources: &[Water, Organic, Gases],
            },
        }
    }

    pub fn color(&self) -> Rgb {
        self.properties().color
    }

    pub fn min_size(&self) -> u32 {
        *self.properties().size.start()
    }

    pub fn is_common(&self, resource: ResourceType) -> bool {
        self.properties().common_resources.contains(&resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_probabilities_sum_to_one() {
        let total: f64 = StarType::all().iter().map(|t| t.properties().probability).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_every_planet_type_has_common_resources() {
        for planet_type in PlanetType::all() {
            let props = planet_type.properties();
            assert!(!props.common_resources.is_empty(), "{:?}", planet_type);
            assert!(props.size.start() <= props.size.end());
        }
    }

    #[test]
    fn test_min_sizes() {
        assert_eq!(StarType::RedGiant.min_size(), 8);
        assert_eq!(PlanetType::GasGiant.min_size(), 14);
        assert!(PlanetType::Oceanic.is_common(ResourceType::Water));
        assert!(!PlanetType::GasGiant.is_common(ResourceType::Water));
    }
}
