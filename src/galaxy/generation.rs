use std::f64::consts::PI;

use log::{debug, info, warn};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::naming;
use super::resources::generate_resources;
use super::types::{
    Bounds, Galaxy, Planet, PlanetType, Point, StarSystem, StarType, LABEL_HEIGHT, SYSTEM_PADDING,
};

/// Attempts made to place systems before giving up.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Name rerolls tried before accepting a duplicate system name.
const NAME_RETRIES: usize = 8;

/// Parameters for galaxy placement.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementParams {
    /// Number of systems requested
    pub count: usize,
    /// Area the galaxy is laid out in
    pub bounds: Bounds,
    /// Minimum distance of system centres from the edges of `bounds`
    pub margin: i32,
    /// Total attempts across all systems
    pub max_attempts: usize,
    pub padding: i32,
    pub label_height: i32,
}

impl PlacementParams {
    pub fn new(count: usize, bounds: Bounds, margin: i32) -> Self {
        Self {
            count,
            bounds,
            margin,
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
            padding: SYSTEM_PADDING,
            label_height: LABEL_HEIGHT,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

/// Weighted draw over the star type table.
pub fn random_star_type(rng: &mut ChaCha8Rng) -> StarType {
    let total: f64 = StarType::all().iter().map(|t| t.properties().probability).sum();
    let roll = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    for star_type in StarType::all() {
        cumulative += star_type.properties().probability;
        if roll < cumulative {
            return *star_type;
        }
    }
    StarType::MainSequence
}

pub fn random_planet_type(rng: &mut ChaCha8Rng) -> PlanetType {
    let types = PlanetType::all();
    types[rng.gen_range(0..types.len())]
}

/// Evenly spaced placement angle, starting at 45 degrees.
pub fn default_planet_angle(index: usize, planet_count: usize) -> f64 {
    let count = planet_count.max(1) as f64;
    index as f64 * 2.0 * PI / count + PI / 4.0
}

/// Generate one planet at `orbit_number` (1-based) of a system with `planet_count` planets.
pub fn generate_planet(
    system_name: &str,
    orbit_number: u32,
    planet_count: usize,
    rng: &mut ChaCha8Rng,
) -> Planet {
    let planet_type = random_planet_type(rng);
    let size = rng.gen_range(planet_type.properties().size);
    Planet {
        name: naming::planet_name(system_name, orbit_number),
        planet_type,
        size,
        orbit_number,
        angle: default_planet_angle(orbit_number as usize - 1, planet_count),
        resources: generate_resources(planet_type, rng),
    }
}

/// Generate a star system centred on `position`.
pub fn generate_star_system(position: Point, name: String, rng: &mut ChaCha8Rng) -> StarSystem {
    let star_type = random_star_type(rng);
    let props = star_type.properties();
    let size = rng.gen_range(props.size);
    let planet_count = rng.gen_range(props.planets);

    let planets = (1..=planet_count as u32)
        .map(|orbit| generate_planet(&name, orbit, planet_count, rng))
        .collect();

    StarSystem { position, name, star_type, size, planets }
}

fn unused_name(taken: &[StarSystem], rng: &mut ChaCha8Rng) -> String {
    let mut name = naming::system_name(rng);
    for _ in 0..NAME_RETRIES {
        if !taken.iter().any(|s| s.name == name) {
            break;
        }
        name = naming::system_name(rng);
    }
    name
}

/// Place up to `count` non-overlapping systems inside `bounds`.
///
/// Uses the default attempt budget; see [`generate_galaxy_with`].
pub fn generate_galaxy(count: usize, bounds: Bounds, margin: i32, rng: &mut ChaCha8Rng) -> Galaxy {
    generate_galaxy_with(&PlacementParams::new(count, bounds, margin), rng)
}

/// Rejection-sampled placement.
///
/// Each attempt draws a centre inside `bounds` shrunk by `margin` and a fresh
/// system; the candidate is kept only if its padded box (label included) does
/// not intersect any placed system. The attempt budget is shared by all
/// systems, so when it runs out the galaxy holds fewer systems than requested.
pub fn generate_galaxy_with(params: &PlacementParams, rng: &mut ChaCha8Rng) -> Galaxy {
    let mut systems: Vec<StarSystem> = Vec::with_capacity(params.count.min(params.max_attempts));
    if params.count == 0 {
        return Galaxy::new(systems);
    }

    let min_x = params.bounds.x.saturating_add(params.margin);
    let max_x = params.bounds.right().saturating_sub(params.margin);
    let min_y = params.bounds.y.saturating_add(params.margin);
    let max_y = params.bounds.bottom().saturating_sub(params.margin);
    if min_x > max_x || min_y > max_y {
        warn!(
            "Galaxy bounds {:?} leave no room inside a margin of {}",
            params.bounds, params.margin
        );
        return Galaxy::new(systems);
    }

    let mut attempts = 0;
    while systems.len() < params.count && attempts < params.max_attempts {
        attempts += 1;
        let position = Point::new(rng.gen_range(min_x..=max_x), rng.gen_range(min_y..=max_y));
        let name = unused_name(&systems, rng);
        let candidate = generate_star_system(position, name, rng);

        let collides = systems
            .iter()
            .any(|s| candidate.collides_with(s, params.padding, params.label_height));
        if !collides {
            debug!(
                "Created star system: {} at ({}, {})",
                candidate.name, position.x, position.y
            );
            systems.push(candidate);
        }
    }

    info!("Generated {} star systems in {} attempts", systems.len(), attempts);
    if systems.len() < params.count {
        warn!(
            "Placement budget exhausted: placed {} of {} requested systems",
            systems.len(),
            params.count
        );
    }

    Galaxy::new(systems)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn assert_no_overlap(galaxy: &Galaxy) {
        for (i, a) in galaxy.systems.iter().enumerate() {
            for b in galaxy.systems.iter().skip(i + 1) {
                assert!(
                    !a.padded_bounds(SYSTEM_PADDING, LABEL_HEIGHT)
                        .intersects(&b.padded_bounds(SYSTEM_PADDING, LABEL_HEIGHT)),
                    "{} overlaps {}",
                    a.name,
                    b.name
                );
            }
        }
    }

    #[test]
    fn test_no_overlap_across_seeds() {
        let bounds = Bounds::new(0, 0, 900, 800);
        for seed in 0..25 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let galaxy = generate_galaxy(15, bounds, 100, &mut rng);
            assert!(!galaxy.is_empty());
            assert_no_overlap(&galaxy);
        }
    }

    #[test]
    fn test_zero_systems_is_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let galaxy = generate_galaxy(0, Bounds::new(0, 0, 500, 600), 100, &mut rng);
        assert!(galaxy.is_empty());
    }

    #[test]
    fn test_crowded_galaxy_underfills() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let galaxy = generate_galaxy(50, Bounds::new(0, 0, 300, 300), 100, &mut rng);
        assert!(galaxy.len() < 50);
        assert!(!galaxy.is_empty());
        assert_no_overlap(&galaxy);
    }

    #[test]
    fn test_huge_request_underfills_instead_of_allocating() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let params = PlacementParams::new(usize::MAX / 64, Bounds::new(0, 0, 500, 600), 100).with_max_attempts(200);
        let galaxy = generate_galaxy_with(&params, &mut rng);
        assert!(!galaxy.is_empty());
        assert!(galaxy.len() <= 200);
        assert_no_overlap(&galaxy);
    }

    #[test]
    fn test_bounds_smaller_than_margin_yield_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let galaxy = generate_galaxy(5, Bounds::new(0, 0, 150, 150), 100, &mut rng);
        assert!(galaxy.is_empty());
    }

    #[test]
    fn test_centres_respect_margin() {
        let bounds = Bounds::new(0, 0, 900, 600);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let galaxy = generate_galaxy(10, bounds, 100, &mut rng);
        for system in &galaxy.systems {
            assert!(system.position.x >= 100 && system.position.x <= 800);
            assert!(system.position.y >= 100 && system.position.y <= 500);
        }
    }

    #[test]
    fn test_zero_attempt_budget() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let params = PlacementParams::new(10, Bounds::new(0, 0, 900, 600), 100).with_max_attempts(0);
        assert!(generate_galaxy_with(&params, &mut rng).is_empty());
    }

    #[test]
    fn test_system_properties_within_type_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..200 {
            let system = generate_star_system(Point::new(0, 0), "Vega Hub".to_string(), &mut rng);
            let props = system.star_type.properties();
            assert!(props.size.contains(&system.size));
            assert!(props.planets.contains(&system.planets.len()));
            for (i, planet) in system.planets.iter().enumerate() {
                assert_eq!(planet.orbit_number as usize, i + 1);
                assert_eq!(planet.name, format!("Vega Hub {}", i + 1));
                assert!(planet.planet_type.properties().size.contains(&planet.size));
            }
        }
    }

    #[test]
    fn test_star_type_distribution_follows_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let draws = 4000;
        let main_sequence = (0..draws)
            .filter(|_| random_star_type(&mut rng) == StarType::MainSequence)
            .count();
        let share = main_sequence as f64 / draws as f64;
        assert!((share - 0.4).abs() < 0.05, "main sequence share {}", share);
    }

    #[test]
    fn test_generation_is_deterministic_per_seed() {
        let bounds = Bounds::new(0, 0, 900, 600);
        let a = generate_galaxy(10, bounds, 100, &mut ChaCha8Rng::seed_from_u64(77));
        let b = generate_galaxy(10, bounds, 100, &mut ChaCha8Rng::seed_from_u64(77));
        assert_eq!(a, b);
    }
}
