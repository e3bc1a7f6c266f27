//! On-disk save records and their conversion to and from the galaxy graph.
//!
//! Fields added after the first release are optional on read so older save
//! files stay loadable. Missing values get deterministic defaults.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::galaxy::{
    default_planet_angle, Galaxy, Planet, PlanetType, Point, ResourceMap, ResourceType, StarSystem,
    StarType, MAX_RESOURCE_AMOUNT,
};

use super::PersistenceError;

/// Format version written by this build.
pub const SAVE_VERSION: u32 = 1;

/// Largest coordinate accepted for a system position on load.
pub const MAX_COORDINATE: i32 = 1_000_000;

fn legacy_version() -> u32 {
    1
}

/// Top-level save document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    #[serde(default = "legacy_version")]
    pub version: u32,
    pub star_systems: Vec<SystemRecord>,
    #[serde(default)]
    pub selected_system: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemRecord {
    pub x: i32,
    pub y: i32,
    pub name: String,
    pub star_type: StarType,
    #[serde(default)]
    pub size: Option<u32>,
    /// Informational only; the colour is derived from the star type on load
    #[serde(default)]
    pub color: Option<[u8; 3]>,
    #[serde(default)]
    pub planets: Vec<PlanetRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanetRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub planet_type: PlanetType,
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default)]
    pub orbit_number: Option<u32>,
    #[serde(default)]
    pub angle: Option<f64>,
    #[serde(default)]
    pub resources: ResourceRecord,
}

/// Resources are a `{TYPE: amount}` object; early saves used a list of entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceRecord {
    Map(BTreeMap<ResourceType, u16>),
    List(Vec<ResourceEntry>),
}

impl Default for ResourceRecord {
    fn default() -> Self {
        ResourceRecord::Map(BTreeMap::new())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceEntry {
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub amount: u16,
}

impl ResourceRecord {
    /// Normalise into a full mapping: absent types become 0, amounts are clamped to 100.
    fn into_resource_map(self) -> ResourceMap {
        let mut map: ResourceMap = ResourceType::all().iter().map(|&r| (r, 0)).collect();
        let entries: Vec<(ResourceType, u16)> = match self {
            ResourceRecord::Map(m) => m.into_iter().collect(),
            ResourceRecord::List(list) => list.into_iter().map(|e| (e.resource_type, e.amount)).collect(),
        };
        for (resource, amount) in entries {
            map.insert(resource, amount.min(MAX_RESOURCE_AMOUNT as u16) as u8);
        }
        map
    }
}

/// Result of reading a save file.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedGame {
    pub galaxy: Galaxy,
    pub selected_system: Option<String>,
    pub timestamp: Option<String>,
}

fn planet_record(planet: &Planet) -> PlanetRecord {
    PlanetRecord {
        name: planet.name.clone(),
        planet_type: planet.planet_type,
        size: Some(planet.size),
        orbit_number: Some(planet.orbit_number),
        angle: Some(planet.angle),
        resources: ResourceRecord::Map(
            planet.resources.iter().map(|(&r, &amount)| (r, amount as u16)).collect(),
        ),
    }
}

/// Snapshot the galaxy into a serialisable document.
pub fn create_save_data(galaxy: &Galaxy, selected_system: Option<&str>) -> SaveFile {
    SaveFile {
        version: SAVE_VERSION,
        star_systems: galaxy
            .systems
            .iter()
            .map(|system| {
                let (r, g, b) = system.star_type.color();
                SystemRecord {
                    x: system.position.x,
                    y: system.position.y,
                    name: system.name.clone(),
                    star_type: system.star_type,
                    size: Some(system.size),
                    color: Some([r, g, b]),
                    planets: system.planets.iter().map(planet_record).collect(),
                }
            })
            .collect(),
        selected_system: selected_system.map(str::to_string),
        timestamp: Some(Local::now().to_rfc3339()),
    }
}

/// Missing sizes take the range minimum; hand-edited ones are pulled into the range.
fn clamp_size(size: Option<u32>, range: RangeInclusive<u32>) -> u32 {
    size.map_or(*range.start(), |s| s.clamp(*range.start(), *range.end()))
}

fn restore_planet(record: PlanetRecord, index: usize, planet_count: usize) -> Planet {
    Planet {
        name: record.name,
        planet_type: record.planet_type,
        size: clamp_size(record.size, record.planet_type.properties().size),
        orbit_number: record.orbit_number.unwrap_or(index as u32 + 1),
        angle: record.angle.unwrap_or_else(|| default_planet_angle(index, planet_count)),
        resources: record.resources.into_resource_map(),
    }
}

/// Rebuild the galaxy graph from a parsed document.
pub fn restore_galaxy(save: SaveFile) -> Result<LoadedGame, PersistenceError> {
    if save.version > SAVE_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            found: save.version,
            supported: SAVE_VERSION,
        });
    }

    let systems = save
        .star_systems
        .into_iter()
        .map(|record| {
            if record.x.unsigned_abs() > MAX_COORDINATE as u32 || record.y.unsigned_abs() > MAX_COORDINATE as u32 {
                return Err(PersistenceError::OutOfRange {
                    name: record.name,
                    x: record.x,
                    y: record.y,
                });
            }
            let planet_count = record.planets.len();
            Ok(StarSystem {
                position: Point::new(record.x, record.y),
                size: clamp_size(record.size, record.star_type.properties().size),
                star_type: record.star_type,
                name: record.name,
                planets: record
                    .planets
                    .into_iter()
                    .enumerate()
                    .map(|(i, p)| restore_planet(p, i, planet_count))
                    .collect(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LoadedGame {
        galaxy: Galaxy::new(systems),
        selected_system: save.selected_system,
        timestamp: save.timestamp,
    })
}

/// Parse and restore a save document held in memory.
pub fn parse_save(json: &str) -> Result<LoadedGame, PersistenceError> {
    let save: SaveFile = serde_json::from_str(json)?;
    restore_galaxy(save)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::galaxy::{generate_galaxy, Bounds};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_round_trip_preserves_systems_and_planets() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let galaxy = generate_galaxy(10, Bounds::new(0, 0, 900, 600), 100, &mut rng);
        assert!(galaxy.planet_count() > 0);

        let json = serde_json::to_string_pretty(&create_save_data(&galaxy, Some("anything"))).unwrap();
        let loaded = parse_save(&json).unwrap();

        assert_eq!(loaded.selected_system.as_deref(), Some("anything"));
        assert_eq!(loaded.galaxy.len(), galaxy.len());
        for (before, restored) in galaxy.systems.iter().zip(&loaded.galaxy.systems) {
            assert_eq!(before.name, restored.name);
            assert_eq!(before.star_type, restored.star_type);
            assert_eq!(before.size, restored.size);
            assert_eq!(before.position, restored.position);
            assert_eq!(before.planets.len(), restored.planets.len());
            for (p, q) in before.planets.iter().zip(&restored.planets) {
                assert_eq!(p.name, q.name);
                assert_eq!(p.planet_type, q.planet_type);
                assert_eq!(p.size, q.size);
                assert_eq!(p.orbit_number, q.orbit_number);
                assert_eq!(p.resources, q.resources);
            }
        }
    }

    #[test]
    fn test_legacy_fields_get_defaults() {
        let json = r#"{
            "star_systems": [{
                "x": 120, "y": 240, "name": "Lyra Core", "star_type": "RED_GIANT",
                "planets": [
                    {"name": "Lyra Core 1", "type": "DESERT", "resources": {"MINERALS": 70}},
                    {"name": "Lyra Core 2", "type": "GAS_GIANT"}
                ]
            }],
            "selected_system": null
        }"#;
        let loaded = parse_save(json).unwrap();
        let system = &loaded.galaxy.systems[0];
        assert_eq!(system.size, StarType::RedGiant.min_size());
        assert_eq!(system.planets[0].orbit_number, 1);
        assert_eq!(system.planets[1].orbit_number, 2);
        assert_eq!(system.planets[0].size, PlanetType::Desert.min_size());
        assert_eq!(system.planets[1].size, PlanetType::GasGiant.min_size());
        assert_eq!(system.planets[0].resource(ResourceType::Minerals), 70);
        assert_eq!(system.planets[0].resources.len(), ResourceType::all().len());
        assert_eq!(system.planets[1].total_resources(), 0);
        assert_eq!(system.planets[1].angle, default_planet_angle(1, 2));
        assert!(loaded.timestamp.is_none());
    }

    #[test]
    fn test_legacy_resource_list_and_clamping() {
        let json = r#"{"star_systems": [{"x": 1, "y": 2, "name": "A", "star_type": "BLUE_GIANT", "size": 7,
            "planets": [{"name": "A 1", "type": "OCEANIC", "size": 12, "orbit_number": 1,
                "resources": [{"type": "WATER", "amount": 88}, {"type": "ORGANIC", "amount": 250}]}]}]}"#;
        let loaded = parse_save(json).unwrap();
        let planet = &loaded.galaxy.systems[0].planets[0];
        assert_eq!(planet.resource(ResourceType::Water), 88);
        assert_eq!(planet.resource(ResourceType::Organic), 100);
        assert_eq!(planet.resource(ResourceType::Gases), 0);
    }

    #[test]
    fn test_out_of_range_sizes_are_clamped() {
        let json = r#"{
            "star_systems": [{
                "x": 200, "y": 200, "name": "Huge", "star_type": "WHITE_DWARF", "size": 3000000000,
                "planets": [{"name": "Huge 1", "type": "ICE_WORLD", "size": 0}]
            }]
        }"#;
        let loaded = parse_save(json).unwrap();
        let system = &loaded.galaxy.systems[0];
        assert_eq!(system.size, *StarType::WhiteDwarf.properties().size.end());
        assert_eq!(system.planets[0].size, PlanetType::IceWorld.min_size());
        assert_eq!(system.rect().width, 2 * system.size as i32);
    }

    #[test]
    fn test_far_away_position_is_an_error() {
        let json = r#"{"star_systems": [
            {"x": 2147483647, "y": 10, "name": "Edge", "star_type": "BLUE_GIANT"}
        ]}"#;
        let err = parse_save(json).unwrap_err();
        assert!(matches!(err, PersistenceError::OutOfRange { ref name, .. } if name == "Edge"));
    }

    #[test]
    fn test_unknown_star_type_is_an_error() {
        let json = r#"{"star_systems": [{"x": 1, "y": 2, "name": "A", "star_type": "NEUTRON_STAR", "planets": []}]}"#;
        let err = parse_save(json).unwrap_err();
        assert!(matches!(err, PersistenceError::Parse(_)));
        assert!(err.to_string().contains("NEUTRON_STAR"), "{}", err);
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let json = r#"{"version": 99, "star_systems": []}"#;
        let err = parse_save(json).unwrap_err();
        assert!(matches!(err, PersistenceError::UnsupportedVersion { found: 99, .. }));
    }

    #[test]
    fn test_empty_galaxy_round_trips() {
        let json = serde_json::to_string(&create_save_data(&Galaxy::default(), None)).unwrap();
        let loaded = parse_save(&json).unwrap();
        assert!(loaded.galaxy.is_empty());
        assert!(loaded.selected_system.is_none());
        assert!(loaded.timestamp.is_some());
    }
}
