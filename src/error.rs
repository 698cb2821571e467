use thiserror::Error;

use crate::fraction::Fraction;
use crate::motion::Axis;

/// Invariant violations raised by the simulation core.
///
/// None of these are expected during normal play: blocked walls, deferred
/// direction requests and a stuck player are ordinary control flow.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("unrecognized direction {0:?}")]
    InvalidDirection(String),
    #[error("boundary coordinate {value} on the {axis} axis is not an integer")]
    NonIntegerBoundary { axis: Axis, value: Fraction },
    #[error("no open exit at cell ({x}, {y})")]
    EmptyExitSet { x: usize, y: usize },
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("grid {width}x{height} exceeds {max} cells per side")]
    GridTooLarge { width: usize, height: usize, max: usize },
    #[error("{axis} step {step} must be in (0, 1] with denominator <= {max_denominator}")]
    InvalidStep { axis: Axis, step: Fraction, max_denominator: i64 },
    #[error("fraction {numerator}/0 has a zero denominator")]
    ZeroDenominator { numerator: i64 },
    #[error("fraction {numerator}/{denominator} does not fit in 64 bits")]
    FractionOverflow { numerator: i64, denominator: i64 },
    #[error("malformed fraction {0:?}")]
    MalformedFraction(String),
}
