use maze_chase::{
    collides, Cell, Direction, Enemy, Fraction, MazeGraph, Player, Position, Session,
    SessionConfig, StepSize, TickOutcome, WallEdge,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn frac(num: i64, den: i64) -> Fraction {
    Fraction::new(num, den).expect("valid fraction")
}

fn steps() -> StepSize {
    StepSize::new(frac(2, 7), frac(1, 5)).expect("valid steps")
}

fn cell_of(pos: Position) -> Cell {
    Cell::new(
        pos.x.to_integer().expect("integral x") as usize,
        pos.y.to_integer().expect("integral y") as usize,
    )
}

#[test]
fn seeded_generation_is_reproducible() {
    let first = MazeGraph::generate(7, 3, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
    let second = MazeGraph::generate(7, 3, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();

    assert!(first.is_connected());
    assert_eq!(first, second);
    assert_eq!(first.wall_count(), second.wall_count());
    // Half of the 42 slots start walled and repairs only remove walls.
    assert!(first.wall_count() <= 21);
    assert_eq!(first.reachable_from(Cell::new(6, 2)).iter().filter(|r| **r).count(), 21);
}

#[test]
fn wall_queries_are_stable() {
    let maze = MazeGraph::generate(9, 6, &mut ChaCha8Rng::seed_from_u64(8)).unwrap();
    let snapshot = maze.debug_lines();
    for y in 0..6 {
        for x in 0..9 {
            for dir in Direction::ALL {
                let cell = Cell::new(x, y);
                assert_eq!(maze.has_wall(cell, dir), maze.has_wall(cell, dir));
            }
        }
    }
    assert_eq!(maze.debug_lines(), snapshot);
}

#[test]
fn player_runs_right_until_a_wall() {
    let maze = MazeGraph::from_walls(7, 3, [WallEdge::right_of(3, 0)]).unwrap();
    let mut player = Player::with_state(Position::new(0, 0), Direction::Right, None, true, steps());

    let mut last_x = player.position().x;
    for _ in 0..30 {
        player.tick(&maze).unwrap();
        if !player.is_moving() {
            break;
        }
        assert!(player.position().x > last_x);
        last_x = player.position().x;
    }

    assert!(!player.is_moving());
    assert_eq!(player.position(), Position::new(3, 0));
}

#[test]
fn stopped_player_always_rests_on_a_grid_line() {
    for seed in 0..20 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let maze = MazeGraph::generate(7, 3, &mut rng).unwrap();
        let mut player =
            Player::with_state(Position::new(0, 0), Direction::Right, None, true, steps());
        for _ in 0..60 {
            player.tick(&maze).unwrap();
            let x = player.position().x;
            assert!(x >= Fraction::ZERO && x < Fraction::from_integer(7));
            if !player.is_moving() {
                assert!(x.is_integer());
                assert!(maze.has_wall_to_right(cell_of(player.position())));
                break;
            }
        }
    }
}

#[test]
fn blocked_player_turns_into_open_pending_direction() {
    let maze = MazeGraph::from_walls(7, 3, [WallEdge::right_of(3, 0)]).unwrap();
    let mut player = Player::with_state(
        Position::new(3, 0),
        Direction::Right,
        Some(Direction::Down),
        true,
        steps(),
    );
    player.tick(&maze).unwrap();
    assert_eq!(player.direction(), Direction::Down);
    assert_eq!(player.position(), Position::new(3, 0));
    assert!(player.is_moving());

    player.tick(&maze).unwrap();
    assert_eq!(player.position(), Position::new(3, frac(1, 5)));
}

#[test]
fn reversal_is_adopted_on_the_next_tick() {
    // The wall right of cell 1 is behind the player; reversing does not check it.
    let maze = MazeGraph::from_walls(7, 3, [WallEdge::right_of(1, 1)]).unwrap();
    let mut player = Player::with_state(
        Position::new(frac(16, 7), 1),
        Direction::Right,
        Some(Direction::Left),
        true,
        steps(),
    );
    player.tick(&maze).unwrap();
    assert_eq!(player.direction(), Direction::Left);
    assert_eq!(player.position(), Position::new(2, 1));
    assert!(player.is_moving());

    // The wall is only evaluated once the player stands on its line.
    player.tick(&maze).unwrap();
    assert_eq!(player.position(), Position::new(2, 1));
    assert!(!player.is_moving());
}

#[test]
fn enemy_only_ever_turns_into_open_exits() {
    for seed in 0..10 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let maze = MazeGraph::generate(8, 6, &mut rng).unwrap();
        let mut enemy = Enemy::new(8, 6, steps());
        for _ in 0..400 {
            let before = enemy.position();
            enemy.tick(&maze, &mut rng).unwrap();
            if enemy.just_turned() {
                let cell = cell_of(enemy.position());
                assert!(!maze.has_wall(cell, enemy.direction()));
            } else if before.x.is_integer() && before.y.is_integer() {
                // Leaving a grid point: the way out must be open.
                assert!(!maze.has_wall(cell_of(before), enemy.direction()));
            }
        }
    }
}

#[test]
fn collision_ignores_wraparound() {
    assert!(collides(Position::new(frac(5, 2), 1), Position::new(frac(13, 5), 1)));
    assert!(!collides(Position::new(0, 0), Position::new(6, 0)));
}

#[test]
fn same_seed_and_input_replay_identically() {
    let script = [
        (3, Direction::Right),
        (17, Direction::Down),
        (30, Direction::Left),
        (44, Direction::Up),
    ];
    let play = || {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let mut session = Session::new(&SessionConfig::new(10, 6), &mut rng).unwrap();
        let mut trace = Vec::new();
        for tick in 0..120 {
            if let Some((_, dir)) = script.iter().find(|(at, _)| *at == tick) {
                session.request_direction(*dir);
            }
            let outcome = session.tick(&mut rng).unwrap();
            trace.push((session.player().position(), session.enemy().position(), outcome));
            if outcome == TickOutcome::Caught {
                break;
            }
        }
        trace
    };
    assert_eq!(play(), play());
}
