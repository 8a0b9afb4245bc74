use std::collections::VecDeque;

use anyhow::Result;

use crate::config::{CELL_CHAR, MAX_BODY_LEN, SNAKE_COLOR};
use crate::pixel::Pixel;
use crate::term::Surface;
use crate::TermInt;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

pub struct Snake {
    head: Pixel,
    // Oldest segment at the front
    body: VecDeque<Pixel>,
    direction: Direction,
}

impl Snake {
    pub fn new(start_x: TermInt, start_y: TermInt) -> Self {
        Snake {
            head: Pixel::new(start_x, start_y, SNAKE_COLOR),
            body: VecDeque::with_capacity(MAX_BODY_LEN + 1),
            direction: Right,
        }
    }

    pub fn head(&self) -> Pixel {
        self.head
    }

    #[cfg(test)]
    pub fn body(&self) -> &VecDeque<Pixel> {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Points the snake in a new direction unless it would reverse onto
    /// itself. Returns whether the direction was taken.
    pub(crate) fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction.is_opposite(self.direction) {
            return false;
        }

        self.direction = new_direction;
        true
    }

    /// Advances the head one cell. The vacated cell becomes the newest body
    /// segment, and the oldest one is dropped past the length cap.
    pub fn move_step(&mut self) {
        self.body.push_back(self.head);

        let (x, y) = self.head.coords();
        self.head = match self.direction {
            Up => self.head.moved_to(x, y.saturating_sub(1)),
            Down => self.head.moved_to(x, y + 1),
            Left => self.head.moved_to(x.saturating_sub(1), y),
            Right => self.head.moved_to(x + 1, y),
        };

        if self.body.len() > MAX_BODY_LEN {
            self.body.pop_front();
        }
    }

    pub fn has_collision(&self, width: TermInt, height: TermInt) -> bool {
        let (x, y) = self.head.coords();

        x == 0 || x == width - 1 || y == 0 || y == height - 1 ||
            self.body.contains(&self.head)
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) -> Result<()> {
        for segment in self.body.iter().chain(std::iter::once(&self.head)) {
            surface.put(segment.x(), segment.y(), segment.color(), CELL_CHAR)?;
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn with_body(head: Pixel, body: &[Pixel], direction: Direction) -> Self {
        Snake { head, body: body.iter().copied().collect(), direction }
    }
}
