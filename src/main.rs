mod board;
mod config;
mod game;
mod input;
mod pixel;
mod snake;
mod term;

use anyhow::Result;
use log::{error, info};

use crate::game::{Outcome, SnakeGame};
use crate::term::TermManager;

pub type TermInt = u16;
pub type Coords = (u16, u16);

fn main() -> Result<()> {
    // Silent unless RUST_LOG is set; redirect stderr when enabling it, the
    // game owns the screen.
    env_logger::init();

    // Undoes its own partial setup on failure, and restores on drop if
    // anything below panics
    let mut term = TermManager::new();
    term.setup()?;

    let res = SnakeGame::new(&mut term, rand::thread_rng()).run();

    // Restore before reporting anything, even on error
    let restored = term.restore();

    match &res {
        Ok(Outcome::GameOver { score }) => info!("finished with score {}", score),
        Ok(Outcome::Quit) => info!("quit before game over"),
        Err(e) => error!("terminal error: {:#}", e),
    }

    if let Err(e) = &restored {
        error!("could not restore terminal: {:#}", e);
    }

    res.and(restored)
}
