//! Assorted constants & hard-coded configuration

use std::time::Duration;

use crossterm::style::Color;

use crate::TermInt;

/// Board width in cells, border included
pub const BOARD_WIDTH: TermInt = 32;

/// Board height in cells, border included
pub const BOARD_HEIGHT: TermInt = 16;

/// Score offset the game starts at. The displayed score is `score - INITIAL_SCORE`.
pub const INITIAL_SCORE: u32 = 5;

/// Maximum number of trailing segments behind the head
pub const MAX_BODY_LEN: usize = 5;

/// Wall-clock length of one frame
pub const FRAME_DURATION: Duration = Duration::from_millis(500);

/// Longest single wait for a key inside a frame
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

pub const SNAKE_COLOR: Color = Color::Red;
pub const BERRY_COLOR: Color = Color::Cyan;
pub const BORDER_COLOR: Color = Color::White;
pub const TEXT_COLOR: Color = Color::White;

pub const CELL_CHAR: char = '■';
