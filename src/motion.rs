//! Boundary-crossing computation shared by the player and the enemy.

use std::fmt;

use crate::direction::Direction;
use crate::error::CoreError;
use crate::fraction::Fraction;
use crate::maze::{Cell, MazeGraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "x",
            Axis::Y => "y",
        })
    }
}

/// Exact actor position in cell units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: Fraction,
    pub y: Fraction,
}

impl Position {
    pub fn new(x: impl Into<Fraction>, y: impl Into<Fraction>) -> Self {
        Position {
            x: x.into(),
            y: y.into(),
        }
    }

    pub fn from_cell(cell: Cell) -> Self {
        Position::new(cell.x as i64, cell.y as i64)
    }

    /// Wraps both coordinates into `[0, width) x [0, height)`.
    pub fn wrapped(self, width: usize, height: usize) -> Self {
        Position {
            x: self.x.rem_euclid(width as i64),
            y: self.y.rem_euclid(height as i64),
        }
    }

    pub fn along(self, axis: Axis) -> Fraction {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

/// Largest accepted step denominator.
///
/// Positions share their step's denominator, so this bound together with
/// [`crate::session::MAX_GRID_SIDE`] keeps every position and distance inside
/// `i64`.
pub const MAX_STEP_DENOMINATOR: i64 = 1 << 20;

/// Fraction of a cell travelled per tick on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSize {
    pub x: Fraction,
    pub y: Fraction,
}

impl StepSize {
    /// Steps must be positive and at most one cell, otherwise a single tick
    /// could jump over a boundary and the wall behind it.
    pub fn new(x: Fraction, y: Fraction) -> Result<Self, CoreError> {
        for (axis, step) in [(Axis::X, x), (Axis::Y, y)] {
            if step <= Fraction::ZERO
                || step > Fraction::ONE
                || step.denominator() > MAX_STEP_DENOMINATOR
            {
                return Err(CoreError::InvalidStep {
                    axis,
                    step,
                    max_denominator: MAX_STEP_DENOMINATOR,
                });
            }
        }
        Ok(StepSize { x, y })
    }

    pub fn along(self, axis: Axis) -> Fraction {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

/// What happens if an actor at some position advances one tick in a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionInfo {
    /// Nearest grid line ahead on the moving axis, before wrapping.
    pub boundary: i64,
    /// Wrapped cell sitting on that grid line.
    pub boundary_cell: Cell,
    pub crosses_boundary: bool,
    pub wall_blocked: bool,
    /// Position advanced by the full step, neither clamped nor wrapped.
    pub tentative: Position,
}

impl MotionInfo {
    /// Position resting exactly on the boundary.
    pub fn snapped(&self) -> Position {
        Position::from_cell(self.boundary_cell)
    }
}

pub fn compute_motion(
    maze: &MazeGraph,
    pos: Position,
    dir: Direction,
    step: StepSize,
) -> Result<MotionInfo, CoreError> {
    let axis = dir.axis();
    let coord = pos.along(axis);
    let amount = step.along(axis);

    let (boundary, crosses_boundary, advanced) = match dir {
        Direction::Right | Direction::Down => {
            let boundary = coord.ceil();
            let line = Fraction::from_integer(boundary);
            (boundary, coord <= line && line < coord + amount, coord + amount)
        }
        Direction::Left | Direction::Up => {
            let boundary = coord.floor();
            let line = Fraction::from_integer(boundary);
            (boundary, coord - amount < line && line <= coord, coord - amount)
        }
    };

    let (cross_axis, cross) = match axis {
        Axis::X => (Axis::Y, pos.y),
        Axis::Y => (Axis::X, pos.x),
    };
    let cross = cross.to_integer().ok_or(CoreError::NonIntegerBoundary {
        axis: cross_axis,
        value: cross,
    })?;

    let (bx, by, tentative) = match axis {
        Axis::X => (boundary, cross, Position { x: advanced, y: pos.y }),
        Axis::Y => (cross, boundary, Position { x: pos.x, y: advanced }),
    };
    let boundary_cell = maze.normalize(bx, by);

    Ok(MotionInfo {
        boundary,
        boundary_cell,
        crosses_boundary,
        wall_blocked: maze.has_wall(boundary_cell, dir),
        tentative,
    })
}
