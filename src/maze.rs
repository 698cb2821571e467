//! Toroidal wall graph with a connectivity-repairing generator.

use std::collections::VecDeque;

use rand::seq::{index, SliceRandom};
use rand::Rng;
use tracing::debug;

use crate::direction::Direction;
use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    RightOf,
    Below,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub const fn new(x: usize, y: usize) -> Self {
        Cell { x, y }
    }
}

/// A wall between `cell` and its right or lower neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WallEdge {
    pub orientation: Orientation,
    pub cell: Cell,
}

impl WallEdge {
    pub const fn right_of(x: usize, y: usize) -> Self {
        WallEdge {
            orientation: Orientation::RightOf,
            cell: Cell::new(x, y),
        }
    }

    pub const fn below(x: usize, y: usize) -> Self {
        WallEdge {
            orientation: Orientation::Below,
            cell: Cell::new(x, y),
        }
    }
}

/// Walls of a `width` x `height` torus.
///
/// Only `RightOf` and `Below` slots are stored; left and above walls are read
/// from the neighbouring cell, so the wall set is symmetric by construction.
/// All queries wrap their cell coordinates, so callers may pass cells one step
/// past the grid edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeGraph {
    width: usize,
    height: usize,
    right: Vec<bool>,
    below: Vec<bool>,
}

impl MazeGraph {
    /// Samples half of all wall slots, then knocks down randomly chosen walls
    /// separating two components until a single component remains.
    pub fn generate(width: usize, height: usize, rng: &mut impl Rng) -> Result<Self, CoreError> {
        let mut maze = Self::open(width, height)?;
        let slots = maze.slots();
        let initial = slots.len() / 2;
        for idx in index::sample(rng, slots.len(), initial) {
            maze.set_wall(slots[idx], true);
        }

        let mut repairs = 0usize;
        loop {
            let (labels, count) = maze.component_labels();
            if count <= 1 {
                break;
            }
            let bridges: Vec<WallEdge> = maze
                .walls()
                .filter(|wall| {
                    labels[maze.index(wall.cell)] != labels[maze.index(maze.far_side(*wall))]
                })
                .collect();
            match bridges.choose(rng) {
                Some(&wall) => maze.set_wall(wall, false),
                None => break,
            }
            repairs += 1;
        }

        debug!(
            width,
            height,
            initial_walls = initial,
            repairs,
            walls = maze.wall_count(),
            "generated maze"
        );
        Ok(maze)
    }

    /// Builds a maze from an explicit wall list without repairing connectivity.
    pub fn from_walls(
        width: usize,
        height: usize,
        walls: impl IntoIterator<Item = WallEdge>,
    ) -> Result<Self, CoreError> {
        let mut maze = Self::open(width, height)?;
        for wall in walls {
            maze.set_wall(wall, true);
        }
        Ok(maze)
    }

    /// A maze without any walls.
    pub fn open(width: usize, height: usize) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::EmptyGrid { width, height });
        }
        Ok(MazeGraph {
            width,
            height,
            right: vec![false; width * height],
            below: vec![false; width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Wraps signed coordinates onto the torus.
    pub fn normalize(&self, x: i64, y: i64) -> Cell {
        Cell {
            x: x.rem_euclid(self.width as i64) as usize,
            y: y.rem_euclid(self.height as i64) as usize,
        }
    }

    fn index(&self, cell: Cell) -> usize {
        (cell.y % self.height) * self.width + cell.x % self.width
    }

    pub fn neighbor(&self, cell: Cell, dir: Direction) -> Cell {
        let (dx, dy) = dir.delta();
        self.normalize(cell.x as i64 + dx, cell.y as i64 + dy)
    }

    fn far_side(&self, wall: WallEdge) -> Cell {
        match wall.orientation {
            Orientation::RightOf => self.neighbor(wall.cell, Direction::Right),
            Orientation::Below => self.neighbor(wall.cell, Direction::Down),
        }
    }

    fn set_wall(&mut self, wall: WallEdge, present: bool) {
        let idx = self.index(wall.cell);
        match wall.orientation {
            Orientation::RightOf => self.right[idx] = present,
            Orientation::Below => self.below[idx] = present,
        }
    }

    fn slots(&self) -> Vec<WallEdge> {
        let mut slots = Vec::with_capacity(self.width * self.height * 2);
        for y in 0..self.height {
            for x in 0..self.width {
                slots.push(WallEdge::right_of(x, y));
                slots.push(WallEdge::below(x, y));
            }
        }
        slots
    }

    pub fn has_wall_to_right(&self, cell: Cell) -> bool {
        self.right[self.index(cell)]
    }

    pub fn has_wall_below(&self, cell: Cell) -> bool {
        self.below[self.index(cell)]
    }

    pub fn has_wall_to_left(&self, cell: Cell) -> bool {
        self.has_wall_to_right(self.neighbor(cell, Direction::Left))
    }

    pub fn has_wall_above(&self, cell: Cell) -> bool {
        self.has_wall_below(self.neighbor(cell, Direction::Up))
    }

    pub fn has_wall(&self, cell: Cell, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.has_wall_above(cell),
            Direction::Down => self.has_wall_below(cell),
            Direction::Left => self.has_wall_to_left(cell),
            Direction::Right => self.has_wall_to_right(cell),
        }
    }

    /// Unwalled directions out of `cell`, in [`Direction::ALL`] order.
    pub fn open_directions(&self, cell: Cell) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|dir| !self.has_wall(cell, *dir))
            .collect()
    }

    /// Walls in row-major order, `RightOf` before `Below` within a cell.
    pub fn walls(&self) -> impl Iterator<Item = WallEdge> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).flat_map(move |x| {
                let idx = y * self.width + x;
                let right = self.right[idx].then_some(WallEdge::right_of(x, y));
                let below = self.below[idx].then_some(WallEdge::below(x, y));
                right.into_iter().chain(below)
            })
        })
    }

    pub fn wall_count(&self) -> usize {
        self.right.iter().chain(&self.below).filter(|w| **w).count()
    }

    /// Cells reachable from `start` through open edges.
    pub fn reachable_from(&self, start: Cell) -> Vec<bool> {
        let mut seen = vec![false; self.width * self.height];
        self.flood(start, &mut seen, |_| {});
        seen
    }

    fn flood(&self, start: Cell, seen: &mut [bool], mut visit: impl FnMut(Cell)) {
        let start = self.normalize(start.x as i64, start.y as i64);
        seen[self.index(start)] = true;
        let mut q = VecDeque::new();
        q.push_back(start);
        while let Some(cell) = q.pop_front() {
            visit(cell);
            for dir in Direction::ALL {
                if self.has_wall(cell, dir) {
                    continue;
                }
                let next = self.neighbor(cell, dir);
                let idx = self.index(next);
                if !seen[idx] {
                    seen[idx] = true;
                    q.push_back(next);
                }
            }
        }
    }

    /// Component label per cell (row-major) and the number of components.
    pub fn component_labels(&self) -> (Vec<usize>, usize) {
        let mut seen = vec![false; self.width * self.height];
        let mut labels = vec![0; self.width * self.height];
        let mut count = 0;
        for y in 0..self.height {
            for x in 0..self.width {
                let start = Cell::new(x, y);
                if seen[self.index(start)] {
                    continue;
                }
                let width = self.width;
                self.flood(start, &mut seen, |cell| labels[cell.y * width + cell.x] = count);
                count += 1;
            }
        }
        (labels, count)
    }

    pub fn components(&self) -> usize {
        self.component_labels().1
    }

    pub fn is_connected(&self) -> bool {
        self.components() == 1
    }

    /// One line per row: `_` marks a wall below a cell, `|` a wall to its right.
    pub fn debug_lines(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                let mut line = String::with_capacity(self.width * 2);
                for x in 0..self.width {
                    let cell = Cell::new(x, y);
                    line.push(if self.has_wall_below(cell) { '_' } else { ' ' });
                    line.push(if self.has_wall_to_right(cell) { '|' } else { ' ' });
                }
                line
            })
            .collect()
    }
}
