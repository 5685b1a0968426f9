//! Synthetic landmark fixtures shared by scorer and pipeline tests.
//!
//! The reference face has eye centroids at (30,40) and (60,40), the nose tip
//! at (45,70), a symmetric V-shaped jaw from (5,40) through the chin (45,80)
//! to (85,40), and the brow span centered on (45,20). Expected scores:
//! symmetry 8, jawline pi/3, proportion 7.5.

use crate::detection::domain::landmark_set::LandmarkSet;
use crate::shared::geometry::Point;

const EYE_OFFSETS: [(f64, f64); 6] = [
    (-5.0, 0.0),
    (-2.0, -2.0),
    (2.0, -2.0),
    (5.0, 0.0),
    (2.0, 2.0),
    (-2.0, 2.0),
];

pub fn reference_points() -> Vec<Point> {
    let mut pts = Vec::with_capacity(68);

    // Jaw 0..=16: straight arms meeting at the chin (index 8)
    for i in 0..17 {
        let rise = if i <= 8 { i } else { 16 - i };
        pts.push(Point::new(5.0 + 5.0 * i as f64, 40.0 + 5.0 * rise as f64));
    }
    // Eyebrows 17..=26
    for i in 0..10 {
        pts.push(Point::new(22.5 + 5.0 * i as f64, 20.0));
    }
    // Nose bridge 27..=30, ending at the tip
    for i in 0..4 {
        pts.push(Point::new(45.0, 46.0 + 8.0 * i as f64));
    }
    // Lower nose 31..=35
    for i in 0..5 {
        pts.push(Point::new(37.0 + 4.0 * i as f64, 72.0));
    }
    // Eyes 36..=41 and 42..=47
    for center in [Point::new(30.0, 40.0), Point::new(60.0, 40.0)] {
        for (dx, dy) in EYE_OFFSETS {
            pts.push(center + Point::new(dx, dy));
        }
    }
    // Lips 48..=59 (outer) and 60..=67 (inner)
    for (count, radius) in [(12, 8.0), (8, 4.0)] {
        for i in 0..count {
            let t = std::f64::consts::TAU * i as f64 / count as f64;
            pts.push(Point::new(45.0 + radius * t.cos(), 76.0 + radius * 0.5 * t.sin()));
        }
    }

    pts
}

pub fn reference_face() -> LandmarkSet {
    LandmarkSet::new(reference_points()).unwrap()
}

/// Reference face with `edit` applied to the raw points.
pub fn face_with(edit: impl FnOnce(&mut Vec<Point>)) -> LandmarkSet {
    let mut pts = reference_points();
    edit(&mut pts);
    LandmarkSet::new(pts).unwrap()
}
