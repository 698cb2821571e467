//! Maze chase on a toroidal grid: a connected random maze, a player steered by
//! buffered direction requests and an enemy that turns at random.

pub mod collision;
pub mod direction;
pub mod enemy;
pub mod error;
pub mod fraction;
pub mod maze;
pub mod motion;
pub mod player;
pub mod session;

pub use collision::{collides, manhattan_distance, COLLISION_DISTANCE};
pub use direction::Direction;
pub use enemy::Enemy;
pub use error::CoreError;
pub use fraction::Fraction;
pub use maze::{Cell, MazeGraph, Orientation, WallEdge};
pub use motion::{compute_motion, Axis, MotionInfo, Position, StepSize, MAX_STEP_DENOMINATOR};
pub use player::Player;
pub use session::{
    Session, SessionConfig, TickOutcome, DEFAULT_STEP_X, DEFAULT_STEP_Y, MAX_GRID_SIDE,
};
