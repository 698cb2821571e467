use rand::Rng;
use tracing::{debug, info};

use crate::collision::collides;
use crate::direction::Direction;
use crate::enemy::Enemy;
use crate::error::CoreError;
use crate::fraction::Fraction;
use crate::maze::MazeGraph;
use crate::motion::StepSize;
use crate::player::Player;

/// Two screen columns of a seven column cell per tick.
pub const DEFAULT_STEP_X: Fraction = Fraction::raw(2, 7);
/// One screen row of a five row cell per tick.
pub const DEFAULT_STEP_Y: Fraction = Fraction::raw(1, 5);
/// Largest accepted width or height, in cells.
pub const MAX_GRID_SIDE: usize = 1 << 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub width: usize,
    pub height: usize,
    pub step_x: Fraction,
    pub step_y: Fraction,
}

impl SessionConfig {
    pub fn new(width: usize, height: usize) -> Self {
        SessionConfig {
            width,
            height,
            step_x: DEFAULT_STEP_X,
            step_y: DEFAULT_STEP_Y,
        }
    }

    pub fn validate(&self) -> Result<StepSize, CoreError> {
        if self.width == 0 || self.height == 0 {
            return Err(CoreError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > MAX_GRID_SIDE || self.height > MAX_GRID_SIDE {
            return Err(CoreError::GridTooLarge {
                width: self.width,
                height: self.height,
                max: MAX_GRID_SIDE,
            });
        }
        StepSize::new(self.step_x, self.step_y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    Caught,
}

/// One self-contained chase: a maze plus the two actors moving through it.
#[derive(Debug, Clone)]
pub struct Session {
    maze: MazeGraph,
    player: Player,
    enemy: Enemy,
    ticks: u64,
}

impl Session {
    pub fn new(config: &SessionConfig, rng: &mut impl Rng) -> Result<Self, CoreError> {
        let step = config.validate()?;
        let maze = MazeGraph::generate(config.width, config.height, rng)?;
        debug!(
            width = config.width,
            height = config.height,
            step_x = %step.x,
            step_y = %step.y,
            "session created"
        );
        Ok(Session::with_actors(
            maze,
            Player::new(step),
            Enemy::new(config.width, config.height, step),
        ))
    }

    pub fn with_actors(maze: MazeGraph, player: Player, enemy: Enemy) -> Self {
        Session {
            maze,
            player,
            enemy,
            ticks: 0,
        }
    }

    pub fn maze(&self) -> &MazeGraph {
        &self.maze
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn request_direction(&mut self, dir: Direction) {
        self.player.request_direction(dir);
    }

    pub fn is_caught(&self) -> bool {
        collides(self.player.position(), self.enemy.position())
    }

    /// Moves the player, then the enemy, then checks whether they touch.
    pub fn tick(&mut self, rng: &mut impl Rng) -> Result<TickOutcome, CoreError> {
        self.player.tick(&self.maze)?;
        self.enemy.tick(&self.maze, rng)?;
        self.ticks += 1;

        if self.is_caught() {
            info!(ticks = self.ticks, "player caught");
            return Ok(TickOutcome::Caught);
        }
        Ok(TickOutcome::Running)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::{Axis, Position, MAX_STEP_DENOMINATOR};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn rejects_invalid_configs() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = Session::new(&SessionConfig::new(0, 4), &mut rng).unwrap_err();
        assert_eq!(err, CoreError::EmptyGrid { width: 0, height: 4 });

        let config = SessionConfig {
            step_x: Fraction::from_integer(2),
            ..SessionConfig::new(5, 5)
        };
        assert!(matches!(
            Session::new(&config, &mut rng),
            Err(CoreError::InvalidStep { .. })
        ));
    }

    #[test]
    fn rejects_oversized_grids_and_fine_steps() {
        let err = SessionConfig::new(MAX_GRID_SIDE + 1, 3).validate().unwrap_err();
        assert_eq!(
            err,
            CoreError::GridTooLarge {
                width: MAX_GRID_SIDE + 1,
                height: 3,
                max: MAX_GRID_SIDE,
            }
        );

        let config = SessionConfig {
            step_x: "1/1000000000".parse().unwrap(),
            ..SessionConfig::new(11, 1)
        };
        assert!(matches!(
            config.validate(),
            Err(CoreError::InvalidStep { axis: Axis::X, .. })
        ));
    }

    #[test]
    fn finest_accepted_step_ticks_across_the_wrap() {
        let config = SessionConfig {
            step_x: Fraction::new(1, MAX_STEP_DENOMINATOR).unwrap(),
            ..SessionConfig::new(11, 1)
        };
        let step = config.validate().unwrap();
        let last = Fraction::new(11 * MAX_STEP_DENOMINATOR - 2, MAX_STEP_DENOMINATOR).unwrap();
        let player =
            Player::with_state(Position::new(last, 0), Direction::Right, None, true, step);
        let enemy = Enemy::at(Position::new(5, 0), Direction::Right, step);
        let mut session = Session::with_actors(MazeGraph::open(11, 1).unwrap(), player, enemy);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        for _ in 0..3 {
            assert_eq!(session.tick(&mut rng).unwrap(), TickOutcome::Running);
        }
        // Two steps onto the wrap line, then a crossing at x = 0 and one step past it.
        assert_eq!(
            session.player().position(),
            Position::new(Fraction::new(1, MAX_STEP_DENOMINATOR).unwrap(), 0)
        );
    }

    #[test]
    fn places_actors_at_their_spawns() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let session = Session::new(&SessionConfig::new(7, 3), &mut rng).unwrap();
        assert_eq!(session.player().position(), Position::new(0, 0));
        assert!(!session.player().is_moving());
        assert_eq!(session.enemy().position(), Position::new(3, 1));
        assert!(session.maze().is_connected());
        assert_eq!(session.ticks(), 0);
    }

    #[test]
    fn request_direction_starts_the_player() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut session = Session::new(&SessionConfig::new(9, 9), &mut rng).unwrap();
        session.request_direction(Direction::Down);
        assert!(session.player().is_moving());
        assert_eq!(session.player().next_direction(), Some(Direction::Down));
        let _ = session.tick(&mut rng).unwrap();
        assert_eq!(session.ticks(), 1);
    }

    #[test]
    fn touching_actors_end_the_session() {
        let step = SessionConfig::new(5, 5).validate().unwrap();
        let maze = MazeGraph::open(5, 5).unwrap();
        let player = Player::new(step);
        let enemy = Enemy::at(
            Position::new(Fraction::new(5, 7).unwrap(), 0),
            Direction::Left,
            step,
        );
        let mut session = Session::with_actors(maze, player, enemy);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        assert_eq!(session.tick(&mut rng).unwrap(), TickOutcome::Caught);
        assert_eq!(
            session.enemy().position(),
            Position::new(Fraction::new(3, 7).unwrap(), 0)
        );
        assert!(session.is_caught());
    }
}
