//! Twinkling star field and nebula clouds behind the views.

use std::f64::consts::TAU;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use ratatui::prelude::*;

use crate::galaxy::properties::{BLUE, PINK, PURPLE, RED};
use crate::galaxy::{Point, Rgb};
use crate::layout::Viewport;

pub const PARTICLES_PER_NEBULA: usize = 40;
/// Peak brightness change of a twinkling star
pub const TWINKLE_AMPLITUDE: f64 = 20.0;

const NEBULA_COLORS: [Rgb; 4] = [(RED.0, 0, RED.2), (0, 0, BLUE.2), (PURPLE.0, 0, PURPLE.2), PINK];

#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundStar {
    pub position: Point,
    pub size: u32,
    pub brightness: u8,
    pub twinkle_offset: f64,
}

impl BackgroundStar {
    /// Grey level at `elapsed_secs`, oscillating around the base brightness.
    pub fn brightness_at(&self, elapsed_secs: f64) -> u8 {
        let variation = (elapsed_secs * 2.0 + self.twinkle_offset).sin() * TWINKLE_AMPLITUDE;
        (self.brightness as f64 + variation).clamp(0.0, 255.0) as u8
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NebulaParticle {
    pub x: f64,
    pub y: f64,
    pub size: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Nebula {
    pub center: Point,
    pub radius: u32,
    pub color: Rgb,
    pub particles: Vec<NebulaParticle>,
}

impl Nebula {
    /// Number of particles covering a logical point.
    pub fn density_at(&self, x: f64, y: f64) -> usize {
        self.particles
            .iter()
            .filter(|p| {
                let (dx, dy) = (p.x - x, p.y - y);
                dx * dx + dy * dy <= (p.size * p.size) as f64
            })
            .count()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Background {
    pub stars: Vec<BackgroundStar>,
    pub nebulae: Vec<Nebula>,
}

impl Background {
    pub fn generate(
        width: u32,
        height: u32,
        num_stars: usize,
        num_nebulae: usize,
        rng: &mut ChaCha8Rng,
    ) -> Self {
        let stars = (0..num_stars)
            .map(|_| BackgroundStar {
                position: Point::new(rng.gen_range(0..=width as i32), rng.gen_range(0..=height as i32)),
                size: rng.gen_range(1..=2),
                brightness: rng.gen_range(100..=180),
                twinkle_offset: rng.gen_range(0.0..TAU),
            })
            .collect();

        let nebulae = (0..num_nebulae)
            .map(|_| {
                let center = Point::new(rng.gen_range(0..=width as i32), rng.gen_range(0..=height as i32));
                let radius: u32 = rng.gen_range(100..=200);
                let color = NEBULA_COLORS[rng.gen_range(0..NEBULA_COLORS.len())];
                let particles = (0..PARTICLES_PER_NEBULA)
                    .map(|_| {
                        let angle = rng.gen_range(0.0..TAU);
                        let distance = rng.gen_range(0.0..radius as f64);
                        NebulaParticle {
                            x: center.x as f64 + distance * angle.cos(),
                            y: center.y as f64 + distance * angle.sin(),
                            size: rng.gen_range(20..=35),
                        }
                    })
                    .collect();
                Nebula {
                    center,
                    radius,
                    color,
                    particles,
                }
            })
            .collect();

        Self { stars, nebulae }
    }

    /// Paint nebulae as tinted cell backgrounds. Galaxy view only.
    pub fn render_nebulae(&self, buf: &mut Buffer, viewport: &Viewport) {
        let area = viewport.area();
        for nebula in &self.nebulae {
            for row in area.y..area.y + area.height {
                for col in area.x..area.x + area.width {
                    let (x, y) = viewport.cell_center(col, row);
                    let density = nebula.density_at(x, y);
                    if density == 0 {
                        continue;
                    }
                    let strength = (density as f64 * 0.08).min(0.45);
                    let tint = |c: u8| (c as f64 * strength) as u8;
                    if let Some(cell) = buf.cell_mut((col, row)) {
                        let (r, g, b) = match cell.bg {
                            Color::Rgb(r, g, b) => (r, g, b),
                            _ => (0, 0, 0),
                        };
                        let (nr, ng, nb) = nebula.color;
                        cell.set_bg(Color::Rgb(
                            r.saturating_add(tint(nr)),
                            g.saturating_add(tint(ng)),
                            b.saturating_add(tint(nb)),
                        ));
                    }
                }
            }
        }
    }

    pub fn render_stars(&self, buf: &mut Buffer, viewport: &Viewport, elapsed_secs: f64) {
        for star in &self.stars {
            let Some(pos) = viewport.point_to_cell(star.position) else {
                continue;
            };
            let level = star.brightness_at(elapsed_secs);
            let ch = if star.size > 1 { '+' } else { '.' };
            if let Some(cell) = buf.cell_mut(pos) {
                cell.set_char(ch).set_fg(Color::Rgb(level, level, level));
            }
        }
    }
}
