use std::path::PathBuf;

use clap::Parser;
use maze_chase::{Fraction, SessionConfig, DEFAULT_STEP_X, DEFAULT_STEP_Y};

use crate::render::{X_SPACING, Y_SPACING};

/// Maze size used when neither the command line nor the terminal provides one.
const FALLBACK_WIDTH: usize = 11;
const FALLBACK_HEIGHT: usize = 5;

/// Chase through a wrap-around maze.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Maze width in cells; defaults to what fits the terminal
    #[arg(long)]
    pub width: Option<usize>,

    /// Maze height in cells; defaults to what fits the terminal
    #[arg(long)]
    pub height: Option<usize>,

    /// Random seed for a reproducible maze and enemy
    #[arg(long)]
    pub seed: Option<u64>,

    /// Milliseconds per simulation tick
    #[arg(long, env = "MAZE_CHASE_TICK_MS", default_value_t = 80,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Frames drawn per second between ticks
    #[arg(long, env = "MAZE_CHASE_FPS", default_value_t = 60,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub fps: u64,

    /// Horizontal distance per tick as a fraction of a cell, e.g. 2/7
    #[arg(long, default_value_t = DEFAULT_STEP_X)]
    pub step_x: Fraction,

    /// Vertical distance per tick as a fraction of a cell, e.g. 1/5
    #[arg(long, default_value_t = DEFAULT_STEP_Y)]
    pub step_y: Fraction,

    /// Write tracing output to this file (filtered by RUST_LOG)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Print the generated maze and exit
    #[arg(long)]
    pub dump_maze: bool,
}

impl Args {
    /// Explicit dimensions win; otherwise fit the maze to the terminal,
    /// keeping the top row free for the status line.
    pub fn session_config(&self, terminal: Option<(u16, u16)>) -> SessionConfig {
        let (fit_w, fit_h) = match terminal {
            Some((cols, rows)) => (
                (cols as usize).saturating_sub(2) / X_SPACING,
                (rows as usize).saturating_sub(2) / Y_SPACING,
            ),
            None => (FALLBACK_WIDTH, FALLBACK_HEIGHT),
        };
        SessionConfig {
            width: self.width.unwrap_or(fit_w.max(1)),
            height: self.height.unwrap_or(fit_h.max(1)),
            step_x: self.step_x,
            step_y: self.step_y,
        }
    }
}
