use anyhow::Result;

use crate::config::{BORDER_COLOR, CELL_CHAR};
use crate::term::Surface;
use crate::TermInt;

/// The play area. The outermost ring of cells is the border.
pub struct Board {
    width: TermInt,
    height: TermInt,
}

impl Board {
    pub fn new(width: TermInt, height: TermInt) -> Self {
        debug_assert!(width >= 3 && height >= 3, "board needs an interior");
        Board { width, height }
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn height(&self) -> TermInt {
        self.height
    }

    pub fn center(&self) -> (TermInt, TermInt) {
        (self.width / 2, self.height / 2)
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) -> Result<()> {
        let end_x = self.width - 1;
        let end_y = self.height - 1;

        for x in 0..self.width {
            surface.put(x, 0, BORDER_COLOR, CELL_CHAR)?;
            surface.put(x, end_y, BORDER_COLOR, CELL_CHAR)?;
        }

        for y in 0..self.height {
            surface.put(0, y, BORDER_COLOR, CELL_CHAR)?;
            surface.put(end_x, y, BORDER_COLOR, CELL_CHAR)?;
        }

        Ok(())
    }
}
