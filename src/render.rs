use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use maze_chase::{Cell, Direction, MazeGraph, Player, Position, Session};
use unicode_width::UnicodeWidthStr;

use crate::input::{command_for, Command};

/// Screen columns per maze cell, including one wall column.
pub const X_SPACING: usize = 7;
/// Screen rows per maze cell, including one wall row.
pub const Y_SPACING: usize = 5;
const SPRITE_W: usize = 2;
const ENEMY_GLYPH: &str = "👻";

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Empty,
    /// Right half of a two column sprite.
    Covered,
    HWall,
    VWall,
    Sprite(&'static str),
}

#[derive(Clone, Copy, PartialEq)]
struct ScreenCell {
    glyph: Glyph,
    color: Color,
}

const BLANK: ScreenCell = ScreenCell {
    glyph: Glyph::Empty,
    color: Color::Reset,
};

pub struct Renderer {
    cols: usize,
    rows: usize,
    frame: Vec<ScreenCell>,
    last: Vec<ScreenCell>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(maze: &MazeGraph) -> Self {
        let cols = maze.width() * X_SPACING + 1;
        let rows = maze.height() * Y_SPACING + 1;
        Self {
            cols,
            rows,
            frame: vec![BLANK; cols * rows],
            last: vec![BLANK; cols * rows],
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    fn put(&mut self, col: usize, row: usize, glyph: Glyph, color: Color) {
        if col < self.cols && row < self.rows {
            self.frame[row * self.cols + col] = ScreenCell { glyph, color };
        }
    }

    #[cfg(test)]
    fn at(&self, col: usize, row: usize) -> Glyph {
        self.frame[row * self.cols + col].glyph
    }

    /// Lays out walls and actors into `frame` without touching the terminal.
    fn compose(&mut self, session: &Session) {
        self.frame.fill(BLANK);
        let maze = session.maze();
        let (w, h) = (maze.width(), maze.height());

        // The wrap-around edge is drawn on both sides of the screen.
        for x in 0..w {
            for y in 0..=h {
                if maze.has_wall_above(Cell::new(x, y % h)) {
                    for col in X_SPACING * x + 1..X_SPACING * (x + 1) {
                        self.put(col, Y_SPACING * y, Glyph::HWall, Color::Cyan);
                    }
                }
            }
        }
        for x in 0..=w {
            for y in 0..h {
                if maze.has_wall_to_left(Cell::new(x % w, y)) {
                    for row in Y_SPACING * y + 1..Y_SPACING * (y + 1) {
                        self.put(X_SPACING * x, row, Glyph::VWall, Color::Cyan);
                    }
                }
            }
        }

        let (col, row) = self.anchor(session.enemy().position(), w, h);
        self.put_sprite(col, row, ENEMY_GLYPH, Color::Red);
        let (col, row) = self.anchor(session.player().position(), w, h);
        self.put_sprite(col, row, player_glyph(session.player()), Color::Yellow);
    }

    /// Top-left screen cell of a sprite centred in the cell at `pos`.
    fn anchor(&self, pos: Position, w: usize, h: usize) -> (usize, usize) {
        let col = (pos.x.to_f64() * X_SPACING as f64).round() as usize;
        let row = (pos.y.to_f64() * Y_SPACING as f64).round() as usize;
        (
            (col + (X_SPACING - SPRITE_W) / 2 + 1) % (w * X_SPACING),
            (row + Y_SPACING / 2) % (h * Y_SPACING),
        )
    }

    /// Sprites on the first column or row are repeated on the closing one,
    /// the same way walls are.
    fn put_sprite(&mut self, col: usize, row: usize, text: &'static str, color: Color) {
        for c in mirrored(col, self.cols - 1) {
            for r in mirrored(row, self.rows - 1) {
                self.put(c, r, Glyph::Sprite(text), color);
                self.put(c + 1, r, Glyph::Covered, color);
            }
        }
    }
}

fn mirrored(index: usize, closing: usize) -> impl Iterator<Item = usize> {
    std::iter::once(index).chain((index == 0).then_some(closing))
}

fn player_glyph(player: &Player) -> &'static str {
    if player.is_moving() && player.animation_counter() % 2 == 1 {
        return "●";
    }
    match player.direction() {
        Direction::Right => "ᗧ",
        Direction::Left => "ᗤ",
        Direction::Up => "ᗢ",
        Direction::Down => "ᗣ",
    }
}

pub fn render(stdout: &mut Stdout, session: &Session, renderer: &mut Renderer) -> io::Result<()> {
    // One spare column for the right half of a sprite on the closing column.
    let needed_w = (renderer.cols + 1) as u16;
    let needed_h = (renderer.rows + 1) as u16;

    stdout.queue(MoveTo(0, 0))?;

    let (term_w, term_h) = terminal::size()?;
    if term_w < needed_w || term_h < needed_h {
        stdout.queue(Clear(ClearType::All))?;
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            needed_w, needed_h, term_w, term_h
        );
        stdout.queue(Print(msg))?;
        stdout.flush()?;
        renderer.needs_full = true;
        return Ok(());
    }

    let origin_x = (term_w - needed_w) / 2;
    let origin_y = (term_h - needed_h) / 2 + 1;
    if origin_x != renderer.origin_x || origin_y != renderer.origin_y {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }
    if renderer.needs_full {
        stdout.queue(Clear(ClearType::All))?;
    }

    let player = session.player();
    let hud = format!(
        "Ticks: {}  Heading: {}{}  (arrows/hjkl to steer, q to quit)",
        session.ticks(),
        player.direction(),
        if player.is_moving() { "" } else { " (stopped)" },
    );
    if renderer.needs_full || hud != renderer.last_hud {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y - 1))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        renderer.last_hud = hud;
    }

    renderer.compose(session);
    for row in 0..renderer.rows {
        for col in 0..renderer.cols {
            let idx = row * renderer.cols + col;
            let cell = renderer.frame[idx];
            if renderer.needs_full || cell != renderer.last[idx] {
                draw_cell(stdout, renderer, col, row, cell)?;
            }
        }
    }
    renderer.last.copy_from_slice(&renderer.frame);
    renderer.needs_full = false;

    stdout.flush()?;
    Ok(())
}

fn draw_cell(
    stdout: &mut Stdout,
    renderer: &Renderer,
    col: usize,
    row: usize,
    cell: ScreenCell,
) -> io::Result<()> {
    let text = match cell.glyph {
        Glyph::Covered => return Ok(()),
        Glyph::Empty => " ",
        Glyph::HWall => "-",
        Glyph::VWall => "|",
        Glyph::Sprite(text) => text,
    };
    stdout.queue(MoveTo(
        renderer.origin_x + col as u16,
        renderer.origin_y + row as u16,
    ))?;
    stdout.queue(SetForegroundColor(cell.color))?;
    stdout.queue(Print(text))?;
    if let Glyph::Sprite(_) = cell.glyph {
        let w = UnicodeWidthStr::width(text);
        for _ in w..SPRITE_W {
            stdout.queue(Print(' '))?;
        }
    } else if col + 1 == renderer.cols {
        // Clears the spill of a sprite that sat on the closing column.
        stdout.queue(Print(' '))?;
    }
    stdout.queue(ResetColor)?;
    Ok(())
}

/// Shows the final banner and blocks until the player quits.
pub fn render_caught(
    stdout: &mut Stdout,
    session: &Session,
    renderer: &Renderer,
) -> io::Result<()> {
    stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y - 1))?;
    stdout.queue(Clear(ClearType::CurrentLine))?;
    stdout.queue(SetForegroundColor(Color::Red))?;
    stdout.queue(Print(format!(
        "CAUGHT after {} ticks (press q to quit)",
        session.ticks()
    )))?;
    stdout.queue(ResetColor)?;
    stdout.flush()?;
    loop {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if command_for(key) == Some(Command::Quit) {
                    return Ok(());
                }
            }
        }
    }
}
