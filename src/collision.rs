use crate::fraction::Fraction;
use crate::motion::Position;

/// Actors whose Manhattan distance is below this many cells collide.
pub const COLLISION_DISTANCE: Fraction = Fraction::raw(19, 20);

pub fn manhattan_distance(a: Position, b: Position) -> Fraction {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Proximity test on raw coordinates. Actors on opposite edges of the torus
/// do not collide even though they are drawn next to each other.
pub fn collides(a: Position, b: Position) -> bool {
    manhattan_distance(a, b) < COLLISION_DISTANCE
}
