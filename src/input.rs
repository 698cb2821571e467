use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use maze_chase::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Quit,
}

/// Arrow keys and vi keys steer; `q`, Esc and Ctrl-C quit.
pub fn command_for(key: KeyEvent) -> Option<Command> {
    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => {}
        _ => return None,
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Command::Steer(Direction::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::Steer(Direction::Down)),
        KeyCode::Left | KeyCode::Char('h') => Some(Command::Steer(Direction::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(Command::Steer(Direction::Right)),
        _ => None,
    }
}
