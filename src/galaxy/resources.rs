//! Resource distribution sampling.
//!
//! Every planet carries every resource type. Amounts are drawn from a Beta
//! distribution whose shape depends on whether the resource is common on that
//! planet type, then scaled onto 0-100.

use rand_chacha::ChaCha8Rng;
use rand_distr::{Beta, Distribution};

use super::types::{PlanetType, ResourceMap, ResourceType, MAX_RESOURCE_AMOUNT};

/// Shape parameters of a Beta distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BetaShape {
    pub alpha: f64,
    pub beta: f64,
}

impl BetaShape {
    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    pub fn variance(&self) -> f64 {
        let sum = self.alpha + self.beta;
        (self.alpha * self.beta) / (sum * sum * (sum + 1.0))
    }
}

/// Skewed high: mean ~0.71
pub const COMMON_SHAPE: BetaShape = BetaShape { alpha: 5.0, beta: 2.0 };
/// Skewed low: mean ~0.17
pub const UNCOMMON_SHAPE: BetaShape = BetaShape { alpha: 1.2, beta: 6.0 };

/// Distribution shape used for a resource on a planet type.
pub fn shape_for(planet_type: PlanetType, resource: ResourceType) -> BetaShape {
    if planet_type.is_common(resource) {
        COMMON_SHAPE
    } else {
        UNCOMMON_SHAPE
    }
}

/// Map a unit-interval sample onto a resource amount.
fn scale_amount(fraction: f64) -> u8 {
    let scaled = (fraction * MAX_RESOURCE_AMOUNT as f64).round();
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, MAX_RESOURCE_AMOUNT as f64) as u8
}

fn sample_amount(shape: BetaShape, rng: &mut ChaCha8Rng) -> u8 {
    let fraction = match Beta::new(shape.alpha, shape.beta) {
        Ok(dist) => dist.sample(rng),
        Err(_) => shape.mean(),
    };
    scale_amount(fraction)
}

/// Sample an amount for every resource type.
pub fn generate_resources(planet_type: PlanetType, rng: &mut ChaCha8Rng) -> ResourceMap {
    ResourceType::all()
        .iter()
        .map(|&resource| (resource, sample_amount(shape_for(planet_type, resource), rng)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_all_resource_types_present_and_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for planet_type in PlanetType::all() {
            for _ in 0..200 {
                let resources = generate_resources(*planet_type, &mut rng);
                assert_eq!(resources.len(), ResourceType::all().len());
                for (resource, amount) in &resources {
                    assert!(*amount <= MAX_RESOURCE_AMOUNT, "{:?} = {}", resource, amount);
                }
            }
        }
    }

    #[test]
    fn test_common_resources_are_richer_on_average() {
        let mut rng = ChaCha8Rng::seed_from_u64(1234);
        let samples = 500;
        let mut water_on_oceanic = 0u32;
        let mut water_on_gas_giant = 0u32;
        for _ in 0..samples {
            water_on_oceanic += generate_resources(PlanetType::Oceanic, &mut rng)[&ResourceType::Water] as u32;
            water_on_gas_giant += generate_resources(PlanetType::GasGiant, &mut rng)[&ResourceType::Water] as u32;
        }
        let common_mean = water_on_oceanic as f64 / samples as f64;
        let uncommon_mean = water_on_gas_giant as f64 / samples as f64;
        assert!(common_mean > 55.0, "common mean {}", common_mean);
        assert!(uncommon_mean < 30.0, "uncommon mean {}", uncommon_mean);
    }

    #[test]
    fn test_shapes_differ_in_mean_and_variance() {
        assert!(COMMON_SHAPE.mean() > UNCOMMON_SHAPE.mean());
        assert!(COMMON_SHAPE.variance() != UNCOMMON_SHAPE.variance());
        assert_eq!(shape_for(PlanetType::Volcanic, ResourceType::Energy), COMMON_SHAPE);
        assert_eq!(shape_for(PlanetType::Volcanic, ResourceType::Water), UNCOMMON_SHAPE);
    }

    #[test]
    fn test_scale_amount_clamps() {
        assert_eq!(scale_amount(0.0), 0);
        assert_eq!(scale_amount(1.0), 100);
        assert_eq!(scale_amount(1.7), 100);
        assert_eq!(scale_amount(-0.2), 0);
        assert_eq!(scale_amount(0.456), 46);
        assert_eq!(scale_amount(f64::NAN), 0);
    }
}
