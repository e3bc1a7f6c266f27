//! Logical screen geometry and its projection onto terminal cells.

use ratatui::layout::Rect;

use crate::galaxy::{Bounds, Planet, Point, StarSystem};

/// Orbit radius of the first planet when there is room for it
pub const BASE_ORBIT_RADIUS: f64 = 100.0;
/// Distance between consecutive orbits when there is room for it
pub const ORBIT_SPACING: f64 = 60.0;
/// Gap kept between the outermost orbit and the edge of the view
pub const ORBIT_MARGIN: f64 = 20.0;

/// Maps the logical screen onto a terminal area.
///
/// Every cell covers `width / area.width` by `height / area.height` logical
/// pixels. Cells are sampled at their centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    area: Rect,
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(area: Rect, width: u32, height: u32) -> Self {
        Self {
            area,
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Logical pixels per column and per row.
    pub fn cell_size(&self) -> (f64, f64) {
        (
            self.width as f64 / self.area.width.max(1) as f64,
            self.height as f64 / self.area.height.max(1) as f64,
        )
    }

    /// Half the larger cell dimension, for hit tests on shapes smaller than a cell.
    pub fn pick_slop(&self) -> i32 {
        let (cw, ch) = self.cell_size();
        (cw.max(ch) / 2.0).ceil() as i32
    }

    /// Logical point at the centre of a cell.
    pub fn cell_center(&self, column: u16, row: u16) -> (f64, f64) {
        let (cw, ch) = self.cell_size();
        (
            (column.saturating_sub(self.area.x) as f64 + 0.5) * cw,
            (row.saturating_sub(self.area.y) as f64 + 0.5) * ch,
        )
    }

    /// Map a terminal cell to a logical point. `None` outside the area.
    pub fn to_logical(&self, column: u16, row: u16) -> Option<Point> {
        if !self.area.contains(ratatui::layout::Position::new(column, row)) {
            return None;
        }
        let (x, y) = self.cell_center(column, row);
        Some(Point::new(x.floor() as i32, y.floor() as i32))
    }

    /// Map a logical point to the cell containing it. `None` off screen.
    pub fn to_cell(&self, x: f64, y: f64) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 || x >= self.width as f64 || y >= self.height as f64 {
            return None;
        }
        let (cw, ch) = self.cell_size();
        let column = (x / cw).floor() as u16;
        let row = (y / ch).floor() as u16;
        if column >= self.area.width || row >= self.area.height {
            return None;
        }
        Some((self.area.x + column, self.area.y + row))
    }

    pub fn point_to_cell(&self, p: Point) -> Option<(u16, u16)> {
        self.to_cell(p.x as f64, p.y as f64)
    }

    /// Smallest cell rectangle covering a logical rectangle, clipped to the area.
    pub fn project(&self, bounds: Bounds) -> Rect {
        let (cw, ch) = self.cell_size();
        let left = (bounds.x.max(0) as f64 / cw).floor() as u16;
        let top = (bounds.y.max(0) as f64 / ch).floor() as u16;
        let right = ((bounds.right().max(0) as f64 / cw).ceil() as u16).min(self.area.width);
        let bottom = ((bounds.bottom().max(0) as f64 / ch).ceil() as u16).min(self.area.height);
        let left = left.min(right);
        let top = top.min(bottom);
        Rect::new(self.area.x + left, self.area.y + top, right - left, bottom - top)
    }

    /// Cells whose centre lies within `radius` of the logical point `(cx, cy)`.
    ///
    /// The cell containing the centre is always included so that discs
    /// smaller than a cell stay visible.
    pub fn disc_cells(&self, cx: f64, cy: f64, radius: f64) -> Vec<(u16, u16)> {
        let mut cells = Vec::new();
        let (cw, ch) = self.cell_size();
        let min_col = ((cx - radius) / cw).floor().max(0.0) as u16;
        let max_col = (((cx + radius) / cw).ceil().max(0.0) as u16).min(self.area.width);
        let min_row = ((cy - radius) / ch).floor().max(0.0) as u16;
        let max_row = (((cy + radius) / ch).ceil().max(0.0) as u16).min(self.area.height);
        for row in min_row..max_row {
            for col in min_col..max_col {
                let px = (col as f64 + 0.5) * cw;
                let py = (row as f64 + 0.5) * ch;
                let (dx, dy) = (px - cx, py - cy);
                if dx * dx + dy * dy <= radius * radius {
                    cells.push((self.area.x + col, self.area.y + row));
                }
            }
        }
        if cells.is_empty() {
            if let Some(cell) = self.to_cell(cx, cy) {
                cells.push(cell);
            }
        }
        cells
    }

    /// Cells crossed by a circle outline of `radius` around `(cx, cy)`.
    pub fn ring_cells(&self, cx: f64, cy: f64, radius: f64) -> Vec<(u16, u16)> {
        let (cw, ch) = self.cell_size();
        let step = cw.min(ch) / radius.max(1.0) / 2.0;
        let steps = ((std::f64::consts::TAU / step).ceil() as usize).max(8);
        let mut cells: Vec<(u16, u16)> = (0..steps)
            .filter_map(|i| {
                let angle = i as f64 * std::f64::consts::TAU / steps as f64;
                self.to_cell(cx + radius * angle.cos(), cy + radius * angle.sin())
            })
            .collect();
        cells.sort_unstable();
        cells.dedup();
        cells
    }
}

/// Orbit geometry of the system view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitLayout {
    pub center: Point,
    pub inner_radius: f64,
    pub spacing: f64,
}

impl OrbitLayout {
    /// Fit `orbit_count` orbits into `area`.
    ///
    /// Uses the fixed base radius and spacing when they fit, otherwise shrinks
    /// both so the outermost orbit stays inside the area.
    pub fn fit(area: Bounds, orbit_count: u32) -> Self {
        let center = area.center();
        let available = (area.width.min(area.height) as f64 / 2.0 - ORBIT_MARGIN).max(1.0);
        let n = orbit_count.max(1) as f64;
        if BASE_ORBIT_RADIUS + n * ORBIT_SPACING <= available {
            return Self {
                center,
                inner_radius: BASE_ORBIT_RADIUS,
                spacing: ORBIT_SPACING,
            };
        }
        let inner_radius = (available * 0.3).min(BASE_ORBIT_RADIUS);
        Self {
            center,
            inner_radius,
            spacing: (available - inner_radius) / n,
        }
    }

    pub fn for_system(area: Bounds, system: &StarSystem) -> Self {
        let orbits = system.planets.iter().map(|p| p.orbit_number).max().unwrap_or(0);
        Self::fit(area, orbits)
    }

    pub fn radius(&self, orbit_number: u32) -> f64 {
        self.inner_radius + orbit_number as f64 * self.spacing
    }

    /// Display radius of the central star; never reaches the first orbit.
    pub fn star_radius(&self, system: &StarSystem) -> f64 {
        (system.size as f64 * 2.0).min(self.radius(1) * 0.6)
    }

    pub fn planet_center(&self, planet: &Planet) -> (f64, f64) {
        let r = self.radius(planet.orbit_number);
        (
            self.center.x as f64 + r * planet.angle.cos(),
            self.center.y as f64 + r * planet.angle.sin(),
        )
    }

    pub fn planet_position(&self, planet: &Planet) -> Point {
        let (x, y) = self.planet_center(planet);
        Point::new(x.round() as i32, y.round() as i32)
    }
}
