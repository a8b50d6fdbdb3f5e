use super::input::InputSnapshot;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction, or `None` for a zero-length vector.
    pub fn normalized(self) -> Option<Vec2> {
        let length = self.length();
        if length <= f32::EPSILON {
            return None;
        }
        Some(Vec2 {
            x: self.x / length,
            y: self.y / length,
        })
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, factor: f32) -> Vec2 {
        Vec2 {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

/// Tile coordinate convention:
/// - Tile `(x, y)` is centered on the integer world position `(x, y)`.
/// - Its corners sit at offsets of `±0.5` from that center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

const TILE_CORNER_OFFSETS: [(f32, f32); 4] = [(-0.5, -0.5), (0.5, -0.5), (-0.5, 0.5), (0.5, 0.5)];

/// Lists the tiles a circular body overlaps.
///
/// Scans the square of tiles within `ceil(radius)` of `floor(center)` and
/// keeps a candidate when either:
/// - it shares the center's tile-row or tile-column and the center lies
///   within `radius + 0.5` of the tile center along the other axis, or
/// - all four of its corners fall within `radius` of the center.
///
/// The corner test under-approximates true circle-box overlap for radii
/// comparable to the tile size. Gameplay content depends on that exact
/// behavior, so it is kept as-is rather than replaced with an exact
/// intersection test.
pub fn circle_tile_cover(center: Vec2, radius: f32) -> Vec<TileCoord> {
    let radius = radius.max(0.0);
    let base = TileCoord::new(center.x.floor() as i32, center.y.floor() as i32);
    let scan = radius.ceil() as i32;

    let mut cover = Vec::new();
    for row_offset in -scan..=scan {
        for column_offset in -scan..=scan {
            let tile = TileCoord::new(base.x + column_offset, base.y + row_offset);
            if tile_overlaps_circle(tile, base, center, radius) {
                cover.push(tile);
            }
        }
    }
    cover
}

fn tile_overlaps_circle(tile: TileCoord, base: TileCoord, center: Vec2, radius: f32) -> bool {
    let reach = radius + 0.5;
    if tile.y == base.y && (center.x - tile.x as f32).abs() < reach {
        return true;
    }
    if tile.x == base.x && (center.y - tile.y as f32).abs() < reach {
        return true;
    }

    let radius_squared = radius * radius;
    TILE_CORNER_OFFSETS.iter().all(|(dx, dy)| {
        let corner = Vec2::new(tile.x as f32 + dx, tile.y as f32 + dy);
        (center - corner).length_squared() <= radius_squared
    })
}

/// Seam between the frame loop and the hosted simulation.
///
/// `poll_input` runs once per frame before any logic step; `tick` runs once
/// per fixed logic step; `render` runs once per frame after all logic steps,
/// even when zero steps ran.
pub trait App {
    fn poll_input(&mut self) -> InputSnapshot;
    fn tick(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot);
    fn render(&mut self);
    fn should_exit(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cover_contains(cover: &[TileCoord], x: i32, y: i32) -> bool {
        cover.contains(&TileCoord::new(x, y))
    }

    #[test]
    fn normalized_rescales_to_unit_length() {
        let unit = Vec2::new(3.0, 4.0).normalized().expect("non-zero vector");
        assert!((unit.length() - 1.0).abs() < 0.0001);
        assert!((unit.x - 0.6).abs() < 0.0001);
        assert!((unit.y - 0.8).abs() < 0.0001);
    }

    #[test]
    fn normalized_rejects_zero_vector() {
        assert!(Vec2::ZERO.normalized().is_none());
    }

    #[test]
    fn dot_product_matches_expectation() {
        assert_eq!(Vec2::new(1.0, 2.0).dot(Vec2::new(4.0, 5.0)), 14.0);
    }

    #[test]
    fn small_circle_on_tile_center_covers_exactly_one_tile() {
        let cover = circle_tile_cover(Vec2::new(5.0, 5.0), 0.4);
        assert_eq!(cover, vec![TileCoord::new(5, 5)]);
    }

    #[test]
    fn cover_never_reaches_beyond_scan_radius() {
        let cover = circle_tile_cover(Vec2::new(5.0, 5.0), 0.4);
        for tile in &cover {
            assert!((tile.x - 5).abs() <= 1);
            assert!((tile.y - 5).abs() <= 1);
        }
    }

    #[test]
    fn axis_aligned_motion_claims_both_straddled_tiles() {
        let cover = circle_tile_cover(Vec2::new(5.6, 5.0), 0.4);
        assert!(cover_contains(&cover, 5, 5));
        assert!(cover_contains(&cover, 6, 5));
        assert!(!cover_contains(&cover, 4, 5));
        assert!(!cover_contains(&cover, 5, 6));
    }

    #[test]
    fn column_fast_path_mirrors_row_fast_path() {
        let cover = circle_tile_cover(Vec2::new(5.0, 5.6), 0.4);
        assert!(cover_contains(&cover, 5, 5));
        assert!(cover_contains(&cover, 5, 6));
        assert!(!cover_contains(&cover, 6, 5));
    }

    #[test]
    fn corner_test_keeps_fully_enclosed_diagonal_tile() {
        // Corner of tile (7, 7) farthest from (6.5, 6.5) is (7.5, 7.5),
        // at distance sqrt(2) ~= 1.415.
        let cover = circle_tile_cover(Vec2::new(6.5, 6.5), 1.5);
        assert!(cover_contains(&cover, 6, 6));
        assert!(cover_contains(&cover, 7, 7));
    }

    #[test]
    fn corner_test_rejects_partially_overlapped_diagonal_tile() {
        // The circle of radius 0.9 at (5.5, 5.5) genuinely clips the near
        // corner region of tile (6, 6), but only one of its corners lies
        // inside the circle. The conservative test rejects it; pinned so
        // the behavior is not "fixed" by accident.
        let cover = circle_tile_cover(Vec2::new(5.5, 5.5), 0.9);
        assert!(!cover_contains(&cover, 6, 6));
    }

    #[test]
    fn zero_radius_covers_only_the_base_tile() {
        assert_eq!(
            circle_tile_cover(Vec2::new(3.2, 7.4), 0.0),
            vec![TileCoord::new(3, 7)]
        );
    }

    #[test]
    fn negative_coordinates_floor_toward_negative_infinity() {
        let cover = circle_tile_cover(Vec2::new(-0.5, -0.5), 0.4);
        assert!(cover.contains(&TileCoord::new(-1, -1)));
    }
}
