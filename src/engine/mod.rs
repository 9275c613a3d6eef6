//! The simulation engine: snake, food, score, and the rules that advance them
//! one tick at a time
mod cell;
mod direction;
mod events;
mod snake;
pub(crate) use self::cell::{Boundary, Cell, Grid};
pub(crate) use self::direction::Direction;
pub(crate) use self::events::{EventSink, GameEvent, GameOverCause, Steering};
pub(crate) use self::snake::Snake;
use crate::autopilot;
use crate::consts;
use crate::options::Options;
use rand::{seq::IteratorRandom, Rng};
use serde::Serialize;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Engine<R> {
    rng: R,
    grid: Grid,
    snake: Snake,
    /// `None` only once the snake covers the whole grid
    food: Option<Cell>,
    direction: Direction,
    /// Direction of the last step actually taken.  Several turns can be
    /// requested between two ticks, and none of them may point back along
    /// this.
    last_move: Direction,
    score: u32,
    level: u32,
    boundary: Boundary,
    steering: Steering,
    game_over: Option<GameOverCause>,
    /// Events not yet handed to a sink
    events: Vec<GameEvent>,
}

impl<R: Rng> Engine<R> {
    /// Create an engine with the mode flags from `options` and start a game
    pub(crate) fn new(options: Options, rng: R) -> Engine<R> {
        let grid = Grid::from(options.grid_size);
        let mut engine = Engine {
            rng,
            grid,
            snake: Snake::new(Cell::default(), Direction::Right, consts::INITIAL_SNAKE_LENGTH),
            food: None,
            direction: Direction::Right,
            last_move: Direction::Right,
            score: 0,
            level: 1,
            boundary: Boundary::from_wall_mode(options.walls),
            steering: if options.autopilot {
                Steering::Autopilot
            } else {
                Steering::Manual
            },
            game_over: None,
            events: Vec::new(),
        };
        engine.start_new_game();
        engine
    }

    /// Reset the snake, food, score, and level.  Mode flags are kept.
    pub(crate) fn start_new_game(&mut self) {
        let size = self.grid.size();
        let head = Cell::new(self.rng.random_range(0..size), self.rng.random_range(0..size));
        self.snake = Snake::new(head, Direction::Right, consts::INITIAL_SNAKE_LENGTH);
        self.direction = Direction::Right;
        self.last_move = Direction::Right;
        self.score = 0;
        self.level = 1;
        self.game_over = None;
        self.food = self.generate_food();
        tracing::info!(
            head.x = head.x,
            head.y = head.y,
            grid_size = size,
            walls = self.wall_mode(),
            autopilot = self.autopilot(),
            "Starting new game"
        );
    }

    /// Pick a cell for the food that is not covered by the snake.
    ///
    /// Cells are drawn uniformly at random until a free one turns up.  After
    /// a bounded number of misses the free cells are enumerated instead, so
    /// that a nearly-full grid cannot stall the tick.  Returns `None` if the
    /// snake covers every cell.
    fn generate_food(&mut self) -> Option<Cell> {
        let size = self.grid.size();
        let attempts = self.grid.area().saturating_mul(consts::FOOD_SAMPLING_FACTOR);
        for _ in 0..attempts {
            let cell = Cell::new(self.rng.random_range(0..size), self.rng.random_range(0..size));
            if !self.snake.contains(cell) {
                return Some(cell);
            }
        }
        tracing::debug!("Random food placement kept missing; enumerating free cells");
        let snake = &self.snake;
        self.grid
            .cells()
            .filter(|&c| !snake.contains(c))
            .choose(&mut self.rng)
    }

    /// Advance the game by one tick.  Does nothing once the game is over.
    pub(crate) fn advance_tick(&mut self) {
        if self.is_over() {
            return;
        }
        if self.steering == Steering::Autopilot {
            if let Some(board) = self.board() {
                match autopilot::choose_direction(&board) {
                    Some(d) => self.steer(d),
                    None => tracing::debug!(
                        direction = %self.direction,
                        "Autopilot is boxed in; keeping current direction"
                    ),
                }
            }
        }
        let head = self
            .grid
            .confine(self.snake.head().step(self.direction), self.boundary);
        self.snake.push_head(head);
        self.last_move = self.direction;
        if self.food == Some(head) {
            self.score += 1;
            self.level = level_for_score(self.score);
            self.food = self.generate_food();
            tracing::debug!(score = self.score, level = self.level, "Food eaten");
            self.events.push(GameEvent::FoodEaten {
                score: self.score,
                level: self.level,
            });
        } else {
            self.snake.pop_tail();
        }
        if let Some(cause) = self.check_collision() {
            self.finish(cause);
        } else if self.food.is_none() {
            self.finish(GameOverCause::BoardFull);
        }
    }

    /// Change the snake's direction, starting with the next tick.
    ///
    /// Ignored while the autopilot is steering, once the game is over, and
    /// when `direction` is the reverse of the current direction or of the
    /// last step taken.
    pub(crate) fn change_direction(&mut self, direction: Direction) {
        if self.steering == Steering::Autopilot || self.is_over() {
            return;
        }
        self.steer(direction);
    }

    fn steer(&mut self, direction: Direction) {
        if direction == self.direction
            || direction == self.direction.reverse()
            || direction == self.last_move.reverse()
        {
            return;
        }
        tracing::debug!(%direction, steering = ?self.steering, "Direction changed");
        self.direction = direction;
        self.events.push(GameEvent::DirectionChanged {
            direction,
            steering: self.steering,
        });
    }

    fn finish(&mut self, cause: GameOverCause) {
        tracing::info!(score = self.score, level = self.level, %cause, "Game over");
        self.game_over = Some(cause);
        self.events.push(GameEvent::GameOver {
            score: self.score,
            cause,
        });
    }
}

impl<R> Engine<R> {
    /// Check the current head against the walls (in walled mode) and against
    /// the body
    pub(crate) fn check_collision(&self) -> Option<GameOverCause> {
        let head = self.snake.head();
        if self.boundary.is_walled() && !self.grid.contains(head) {
            Some(GameOverCause::Wall)
        } else if self.snake.head_overlaps_from(consts::SELF_COLLISION_START) {
            Some(GameOverCause::SelfCollision)
        } else {
            None
        }
    }

    pub(crate) fn set_wall_mode(&mut self, wall_mode: bool) {
        let boundary = Boundary::from_wall_mode(wall_mode);
        if boundary != self.boundary {
            tracing::info!(walls = wall_mode, "Wall mode changed");
            self.boundary = boundary;
        }
    }

    pub(crate) fn set_autopilot(&mut self, enabled: bool) {
        let steering = if enabled {
            Steering::Autopilot
        } else {
            Steering::Manual
        };
        if steering != self.steering {
            tracing::info!(autopilot = enabled, "Steering changed");
            self.steering = steering;
        }
    }

    /// Flip wall mode and return the new setting
    pub(crate) fn toggle_wall_mode(&mut self) -> bool {
        let walls = !self.wall_mode();
        self.set_wall_mode(walls);
        walls
    }

    /// Flip the autopilot and return the new setting
    pub(crate) fn toggle_autopilot(&mut self) -> bool {
        let enabled = !self.autopilot();
        self.set_autopilot(enabled);
        enabled
    }

    pub(crate) fn wall_mode(&self) -> bool {
        self.boundary.is_walled()
    }

    pub(crate) fn autopilot(&self) -> bool {
        self.steering == Steering::Autopilot
    }

    pub(crate) fn is_over(&self) -> bool {
        self.game_over.is_some()
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn level(&self) -> u32 {
        self.level
    }

    /// The view of the game handed to the autopilot.  `None` if there is no
    /// food on the board.
    fn board(&self) -> Option<Board<'_>> {
        Some(Board {
            grid: self.grid,
            boundary: self.boundary,
            snake: &self.snake,
            food: self.food?,
        })
    }

    /// Copy out everything a renderer needs
    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid_size: self.grid.size(),
            snake: self.snake.iter().collect(),
            food: self.food,
            score: self.score,
            level: self.level,
            direction: self.direction,
            wall_mode: self.wall_mode(),
            autopilot: self.autopilot(),
            game_over: self.game_over,
        }
    }

    /// Hand every pending event to `sink`, oldest first
    pub(crate) fn dispatch_events<S: EventSink + ?Sized>(&mut self, sink: &mut S) {
        for event in std::mem::take(&mut self.events) {
            sink.handle(&event);
        }
    }
}

/// `level = min(MAX_LEVEL, score / SCORE_PER_LEVEL + 1)`
pub(crate) fn level_for_score(score: u32) -> u32 {
    (score / consts::SCORE_PER_LEVEL + 1).min(consts::MAX_LEVEL)
}

/// What the autopilot gets to look at
#[derive(Clone, Copy, Debug)]
pub(crate) struct Board<'a> {
    pub(crate) grid: Grid,
    pub(crate) boundary: Boundary,
    pub(crate) snake: &'a Snake,
    pub(crate) food: Cell,
}

/// Read-only copy of the game state, taken after a tick
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub(crate) struct Snapshot {
    pub(crate) grid_size: i32,
    /// Head first
    pub(crate) snake: Vec<Cell>,
    pub(crate) food: Option<Cell>,
    pub(crate) score: u32,
    pub(crate) level: u32,
    pub(crate) direction: Direction,
    pub(crate) wall_mode: bool,
    pub(crate) autopilot: bool,
    pub(crate) game_over: Option<GameOverCause>,
}

#[cfg(test)]
impl<R> Engine<R> {
    /// Replace the game state with a hand-built position
    pub(crate) fn set_position<I: IntoIterator<Item = Cell>>(
        &mut self,
        snake: I,
        direction: Direction,
        food: Cell,
    ) {
        self.snake = Snake::from_cells(snake);
        self.direction = direction;
        self.last_move = direction;
        self.food = Some(food);
    }

    pub(crate) fn head(&self) -> Cell {
        self.snake.head()
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
