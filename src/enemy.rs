use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

use crate::direction::Direction;
use crate::error::CoreError;
use crate::maze::MazeGraph;
use crate::motion::{compute_motion, Position, StepSize};

/// The pursuer. It never idles: at every grid line it picks a random open
/// direction, which may be the one it is already heading in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    position: Position,
    direction: Direction,
    just_turned: bool,
    step: StepSize,
    animation_counter: u64,
}

impl Enemy {
    /// Places the enemy on the centre cell of a `width` x `height` maze.
    pub fn new(width: usize, height: usize, step: StepSize) -> Self {
        let centre = Position::new((width / 2) as i64, (height / 2) as i64);
        Enemy::at(centre, Direction::Right, step)
    }

    pub fn at(position: Position, direction: Direction, step: StepSize) -> Self {
        Enemy {
            position,
            direction,
            just_turned: false,
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

    pub fn just_turned(&self) -> bool {
        self.just_turned
    }

    pub fn step(&self) -> StepSize {
        self.step
    }

    pub fn animation_counter(&self) -> u64 {
        self.animation_counter
    }

    pub fn tick(&mut self, maze: &MazeGraph, rng: &mut impl Rng) -> Result<(), CoreError> {
        let info = compute_motion(maze, self.position, self.direction, self.step)?;

        // A turn leaves the enemy on the line it turned at; skipping the next
        // decision stops it from turning twice without moving.
        if info.crosses_boundary && !self.just_turned {
            self.position = info.snapped();

            let mut exits = Vec::with_capacity(Direction::ALL.len());
            for dir in Direction::ALL {
                if !compute_motion(maze, self.position, dir, self.step)?.wall_blocked {
                    exits.push(dir);
                }
            }
            let next = *exits.choose(rng).ok_or(CoreError::EmptyExitSet {
                x: info.boundary_cell.x,
                y: info.boundary_cell.y,
            })?;

            if next != self.direction {
                trace!(
                    x = info.boundary_cell.x,
                    y = info.boundary_cell.y,
                    from = %self.direction,
                    to = %next,
                    "enemy turned"
                );
                self.direction = next;
                self.just_turned = true;
                return Ok(());
            }
        }

        self.position = info.tentative.wrapped(maze.width(), maze.height());
        self.just_turned = false;
        self.animation_counter += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fraction::Fraction;
    use crate::maze::{Cell, WallEdge};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn frac(num: i64, den: i64) -> Fraction {
        Fraction::new(num, den).unwrap()
    }

    fn steps() -> StepSize {
        StepSize::new(frac(2, 7), frac(1, 5)).unwrap()
    }

    #[test]
    fn starts_at_the_centre() {
        let enemy = Enemy::new(7, 3, steps());
        assert_eq!(enemy.position(), Position::new(3, 1));
        assert_eq!(enemy.direction(), Direction::Right);
        assert!(!enemy.just_turned());
    }

    #[test]
    fn only_open_exits_are_drawn() {
        let maze =
            MazeGraph::from_walls(3, 3, [WallEdge::right_of(0, 1), WallEdge::right_of(1, 1)])
                .unwrap();
        assert_eq!(
            maze.open_directions(Cell::new(1, 1)),
            vec![Direction::Up, Direction::Down]
        );
        for seed in 0..64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut enemy = Enemy::at(Position::new(1, 1), Direction::Right, steps());
            enemy.tick(&maze, &mut rng).unwrap();
            assert!(matches!(enemy.direction(), Direction::Up | Direction::Down));
            assert!(enemy.just_turned());
            assert_eq!(enemy.position(), Position::new(1, 1));
        }
    }

    #[test]
    fn just_turned_suppresses_the_next_decision() {
        // A vertical corridor: only up and down are ever open.
        let walls = (0..3).map(|y| WallEdge::right_of(0, y));
        let maze = MazeGraph::from_walls(1, 3, walls).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut enemy = Enemy::at(Position::new(0, 1), Direction::Right, steps());

        enemy.tick(&maze, &mut rng).unwrap();
        assert!(enemy.just_turned());
        let turned_to = enemy.direction();

        enemy.tick(&maze, &mut rng).unwrap();
        assert!(!enemy.just_turned());
        assert_eq!(enemy.direction(), turned_to);
        let expected = match turned_to {
            Direction::Up => Position::new(0, frac(4, 5)),
            _ => Position::new(0, frac(6, 5)),
        };
        assert_eq!(enemy.position(), expected);
    }

    #[test]
    fn keeps_going_between_lines() {
        let maze = MazeGraph::open(7, 3).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut enemy = Enemy::at(Position::new(frac(2, 7), 0), Direction::Right, steps());
        enemy.tick(&maze, &mut rng).unwrap();
        assert_eq!(enemy.position(), Position::new(frac(4, 7), 0));
        assert_eq!(enemy.direction(), Direction::Right);
    }

    #[test]
    fn walled_in_cell_reports_empty_exit_set() {
        let maze =
            MazeGraph::from_walls(1, 1, [WallEdge::right_of(0, 0), WallEdge::below(0, 0)]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut enemy = Enemy::new(1, 1, steps());
        assert_eq!(
            enemy.tick(&maze, &mut rng),
            Err(CoreError::EmptyExitSet { x: 0, y: 0 })
        );
    }
}
