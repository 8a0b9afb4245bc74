//! Key events to snake directions. This is the only place a reversal is
//! filtered out of player input.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::trace;

use crate::snake::Direction::{self, *};
use crate::term::Surface;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Steer(Direction),
    Quit,
}

/// Waits at most `wait` for one key and maps it against `current`. With no
/// key pending the current direction comes back unchanged.
pub fn read_direction<S: Surface>(surface: &mut S, current: Direction, wait: Duration) -> Result<Input> {
    Ok(match surface.poll_key(wait)? {
        Some(ev) => map_key(&ev, current),
        None => Input::Steer(current),
    })
}

pub fn map_key(ev: &KeyEvent, current: Direction) -> Input {
    if is_ctrl_c(ev) {
        return Input::Quit;
    }

    let requested = match ev.code {
        KeyCode::Up => Up,
        KeyCode::Down => Down,
        KeyCode::Left => Left,
        KeyCode::Right => Right,
        _ => return Input::Steer(current),
    };

    if requested.is_opposite(current) {
        trace!("ignoring reversal {:?} -> {:?}", current, requested);
        return Input::Steer(current);
    }

    Input::Steer(requested)
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
