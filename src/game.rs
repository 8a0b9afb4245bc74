use std::time::{Duration, Instant};

use anyhow::Result;
use log::{debug, info};
use rand::Rng;

use crate::TermInt;
use crate::board::Board;
use crate::config::*;
use crate::input::{self, Input};
use crate::pixel::Pixel;
use crate::snake::{Snake, Direction};
use crate::term::Surface;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    GameOver { score: u32 },
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    Running,
    GameOver,
    Quit,
}

pub struct SnakeGame<'a, S: Surface, R: Rng> {
    surface: &'a mut S,
    rng: R,
    board: Board,
    snake: Snake,
    berry: Pixel,
    score: u32,
    frame_duration: Duration,
    state: State,
}

impl<'a, S: Surface, R: Rng> SnakeGame<'a, S, R> {
    pub fn new(surface: &'a mut S, mut rng: R) -> Self {
        let board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        let (x, y) = board.center();
        let berry = spawn_berry(&mut rng, board.width(), board.height());

        SnakeGame {
            surface,
            rng,
            snake: Snake::new(x, y),
            board,
            berry,
            score: INITIAL_SCORE,
            frame_duration: FRAME_DURATION,
            state: State::Running,
        }
    }

    #[cfg(test)]
    fn with_frame_duration(mut self, frame_duration: Duration) -> Self {
        self.frame_duration = frame_duration;
        self
    }

    /// Plays frames until the snake crashes or the player hits CTRL+C. After a
    /// crash the final score stays on screen until a key is pressed.
    pub fn run(&mut self) -> Result<Outcome> {
        let (width, height) = (self.board.width(), self.board.height());
        self.surface.set_size(width, height)?;
        info!("starting on a {}x{} board", width, height);

        while self.state == State::Running {
            self.tick()?;
        }

        match self.state {
            State::Quit => {
                info!("quit with score {}", self.displayed_score());
                Ok(Outcome::Quit)
            },
            _ => self.game_over(),
        }
    }

    pub fn displayed_score(&self) -> u32 {
        self.score - INITIAL_SCORE
    }

    ///////////////////////////////////////////////////////////////////////////

    fn tick(&mut self) -> Result<()> {
        self.surface.clear()?;
        self.board.draw(self.surface)?;
        self.update();
        self.snake.draw(self.surface)?;
        self.surface.put(self.berry.x(), self.berry.y(), self.berry.color(), CELL_CHAR)?;
        self.surface.flush()?;

        self.wait_for_next_frame()?;

        if self.state == State::Running && self.snake.has_collision(self.board.width(), self.board.height()) {
            debug!("crashed at {:?}", self.snake.head().coords());
            self.state = State::GameOver;
        }

        Ok(())
    }

    fn update(&mut self) {
        if self.snake.head() == self.berry {
            self.score += 1;
            // May land under the snake
            self.berry = spawn_berry(&mut self.rng, self.board.width(), self.board.height());
            debug!("berry eaten, score {}, next berry at {:?}", self.displayed_score(), self.berry.coords());
        }

        self.snake.move_step();
    }

    /// Sits out the rest of the frame, feeding every key that arrives into the
    /// snake's direction. The snake only uses it on the next move.
    fn wait_for_next_frame(&mut self) -> Result<()> {
        let deadline = Instant::now() + self.frame_duration;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());

            match input::read_direction(self.surface, self.snake.direction(), remaining.min(POLL_INTERVAL))? {
                Input::Steer(dir) => self.steer(dir),
                Input::Quit => {
                    self.state = State::Quit;
                    return Ok(());
                },
            }

            if remaining == Duration::from_secs(0) {
                return Ok(());
            }
        }
    }

    fn steer(&mut self, dir: Direction) {
        let current = self.snake.direction();
        if dir != current && self.snake.set_direction(dir) {
            debug!("turning {:?} -> {:?}", current, dir);
        }
    }

    fn game_over(&mut self) -> Result<Outcome> {
        let score = self.displayed_score();
        info!("game over, score {}", score);

        let (width, height) = (self.board.width(), self.board.height());
        let msg = format!("Game over, Score: {}", score);
        self.surface.print_at(width / 5, height / 2, TEXT_COLOR, &msg)?;
        self.surface.flush()?;
        self.surface.read_key()?;

        Ok(Outcome::GameOver { score })
    }
}

/// A berry somewhere inside the border, uniformly over
/// `[1, width - 2] x [1, height - 2]`.
pub fn spawn_berry<R: Rng>(rng: &mut R, width: TermInt, height: TermInt) -> Pixel {
    Pixel::new(rng.gen_range(1..=width - 2), rng.gen_range(1..=height - 2), BERRY_COLOR)
}
