use crossterm::style::Color;

use crate::{Coords, TermInt};

/// A colored cell on the board. Two pixels are equal when they sit on the same
/// cell, whatever their color.
#[derive(Copy, Clone, Debug)]
pub struct Pixel {
    x: TermInt,
    y: TermInt,
    color: Color,
}

impl Pixel {
    pub fn new(x: TermInt, y: TermInt, color: Color) -> Self {
        Pixel { x, y, color }
    }

    pub fn x(&self) -> TermInt {
        self.x
    }

    pub fn y(&self) -> TermInt {
        self.y
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn coords(&self) -> Coords {
        (self.x, self.y)
    }

    /// Same color, new cell
    pub fn moved_to(&self, x: TermInt, y: TermInt) -> Self {
        Pixel { x, y, color: self.color }
    }
}

impl PartialEq for Pixel {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Pixel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_color() {
        let a = Pixel::new(3, 4, Color::Red);
        let b = Pixel::new(3, 4, Color::Cyan);
        assert_eq!(a, b);
        assert_ne!(a, Pixel::new(4, 3, Color::Red));
    }

    #[test]
    fn moved_to_keeps_color() {
        let a = Pixel::new(1, 1, Color::Cyan);
        let b = a.moved_to(2, 5);
        assert_eq!(b.coords(), (2, 5));
        assert_eq!(b.color(), Color::Cyan);
        assert_eq!(a.coords(), (1, 1));
    }
}
