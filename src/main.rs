mod config;
mod input;
mod logging;
mod render;

use std::io::{self, Stdout};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use maze_chase::{MazeGraph, Session, TickOutcome};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::config::Args;
use crate::input::{command_for, Command};
use crate::render::Renderer;

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_tracing(args.log_file.as_deref())?;

    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    if args.dump_maze {
        let config = args.session_config(terminal::size().ok());
        config.validate().context("invalid session configuration")?;
        let maze = MazeGraph::generate(config.width, config.height, &mut rng)
            .context("failed to generate maze")?;
        for line in maze.debug_lines() {
            println!("{line}");
        }
        return Ok(());
    }

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &args, &mut rng);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut Stdout, args: &Args, rng: &mut ChaCha8Rng) -> Result<()> {
    let config = args.session_config(Some(terminal::size()?));
    let mut session = Session::new(&config, rng).context("failed to start session")?;
    let mut renderer = Renderer::new(session.maze());
    let tick_time = Duration::from_millis(args.tick_ms);
    let frame_time = Duration::from_micros(1_000_000 / args.fps);
    let mut last_tick = Instant::now();
    info!(
        width = config.width,
        height = config.height,
        seed = ?args.seed,
        "session started"
    );

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                match command_for(key) {
                    Some(Command::Quit) => {
                        info!(ticks = session.ticks(), "quit");
                        return Ok(());
                    }
                    Some(Command::Steer(dir)) => session.request_direction(dir),
                    None => {}
                }
            }
        }

        if last_tick.elapsed() >= tick_time {
            last_tick = Instant::now();
            let outcome = session.tick(rng)?;
            render::render(stdout, &session, &mut renderer)?;
            if outcome == TickOutcome::Caught {
                render::render_caught(stdout, &session, &renderer)?;
                return Ok(());
            }
        } else {
            render::render(stdout, &session, &mut renderer)?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}
