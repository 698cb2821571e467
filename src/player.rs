use tracing::debug;

use crate::direction::Direction;
use crate::error::CoreError;
use crate::maze::MazeGraph;
use crate::motion::{compute_motion, Position, StepSize};

/// The player-controlled actor.
///
/// Direction requests are buffered in `next_direction` and only take effect
/// once the player reaches a grid line where the requested way is open.
/// Reversing is the exception and happens immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    position: Position,
    direction: Direction,
    next_direction: Option<Direction>,
    moving: bool,
    step: StepSize,
    animation_counter: u64,
}

impl Player {
    pub fn new(step: StepSize) -> Self {
        Player::with_state(Position::default(), Direction::Right, None, false, step)
    }

    pub fn with_state(
        position: Position,
        direction: Direction,
        next_direction: Option<Direction>,
        moving: bool,
        step: StepSize,
    ) -> Self {
        Player {
            position,
            direction,
            next_direction,
            moving,
            step,
            animation_counter: 0,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn next_direction(&self) -> Option<Direction> {
        self.next_direction
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn step(&self) -> StepSize {
        self.step
    }

    pub fn animation_counter(&self) -> u64 {
        self.animation_counter
    }

    /// Buffers a direction and re-enables movement.
    pub fn request_direction(&mut self, dir: Direction) {
        self.next_direction = Some(dir);
        self.moving = true;
    }

    pub fn start(&mut self) {
        self.moving = true;
    }

    /// Advances the player by one tick.
    pub fn tick(&mut self, maze: &MazeGraph) -> Result<(), CoreError> {
        if !self.moving {
            return Ok(());
        }

        if self.next_direction == Some(self.direction.opposite()) {
            self.direction = self.direction.opposite();
        }

        let info = compute_motion(maze, self.position, self.direction, self.step)?;
        if info.crosses_boundary {
            self.position = info.snapped();

            if let Some(next) = self.next_direction.filter(|next| *next != self.direction) {
                if !compute_motion(maze, self.position, next, self.step)?.wall_blocked {
                    self.direction = next;
                    return Ok(());
                }
            }

            if info.wall_blocked {
                debug!(
                    x = %self.position.x,
                    y = %self.position.y,
                    direction = %self.direction,
                    "player stuck against wall"
                );
                self.moving = false;
                return Ok(());
            }
        }

        self.position = info.tentative.wrapped(maze.width(), maze.height());
        self.animation_counter += 1;
        Ok(())
    }
}
