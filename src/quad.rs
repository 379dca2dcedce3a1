//! The fixed mesh: four triangles over six positions, a quad with a
//! triangle pair attached to its right edge.

use crate::abs::Position;

pub const VERTICES: [Position; 6] = [
    Position::new(-0.5, -0.5, 0.0),
    Position::new(-0.5, 0.5, 0.0),
    Position::new(0.5, 0.5, 0.0),
    Position::new(0.5, -0.5, 0.0),
    Position::new(0.8, -0.5, 0.0),
    Position::new(0.8, 0.5, 0.0),
];

pub const INDICES: [u32; 12] = [
    0, 1, 3, //
    1, 2, 3, //
    3, 2, 4, //
    2, 5, 4,
];
