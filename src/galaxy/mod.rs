//! Procedural galaxy: star systems, planets and their resources.

pub mod generation;
pub mod naming;
pub mod properties;
pub mod resources;
pub mod types;

pub use generation::{
    default_planet_angle, generate_galaxy, generate_galaxy_with, generate_planet,
    generate_star_system, PlacementParams, MAX_PLACEMENT_ATTEMPTS,
};
pub use properties::Rgb;
pub use resources::generate_resources;
pub use types::{
    Bounds, Galaxy, Planet, PlanetType, Point, ResourceMap, ResourceType, StarSystem, StarType,
    LABEL_HEIGHT, MAX_RESOURCE_AMOUNT, SYSTEM_PADDING,
};
