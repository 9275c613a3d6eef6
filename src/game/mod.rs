mod feedback;
mod paused;
use self::feedback::{Bell, Cue};
use self::paused::{PauseOpt, Paused};
use crate::app::Screen;
use crate::command::Command;
use crate::config::Config;
use crate::consts;
use crate::engine::{Cell, Direction, Engine, EventSink, GameEvent, Snapshot};
use crate::highscores::HighScoreBoard;
use crate::util::{center_rect, get_display_area};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::borrow::Cow;
use std::time::{Duration, Instant};

/// The game screen: an [`Engine`] plus everything the terminal adds on top of
/// it
#[derive(Debug)]
pub(crate) struct Game<R> {
    engine: Engine<R>,
    state: GameState,
    high_scores: HighScoreBoard,
    bell: Bell,
    next_tick: Option<Instant>,
}

impl<R: Rng> Game<R> {
    pub(crate) fn new(config: &Config, rng: R) -> Game<R> {
        Game {
            engine: Engine::new(config.options, rng),
            state: GameState::Running,
            high_scores: HighScoreBoard::new(config.high_scores_file().map(Cow::into_owned)),
            bell: Bell::new(config.feedback.bell),
            next_tick: None,
        }
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen<R>>> {
        if self.running() {
            let period = tick_period(self.engine.level());
            let when = *self.next_tick.get_or_insert_with(|| Instant::now() + period);
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.advance();
                self.next_tick = None;
                Ok(None)
            } else {
                Ok(self.handle_event(read()?))
            }
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    fn advance(&mut self) {
        if !self.running() {
            return;
        }
        self.engine.advance_tick();
        let (high_scores, bell) = (&mut self.high_scores, &mut self.bell);
        self.engine.dispatch_events(&mut |event: &GameEvent| {
            high_scores.handle(event);
            bell.handle(event);
        });
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen<R>> {
        if event == Event::FocusLost {
            if self.running() {
                self.pause();
            }
            return None;
        }
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        match cmd {
            Command::Quit | Command::Q => return Some(Screen::Quit),
            Command::Enter => {
                let on = self.engine.toggle_autopilot();
                self.bell.cue(Cue::autopilot(on));
                return None;
            }
            Command::Tab => {
                let on = self.engine.toggle_wall_mode();
                self.bell.cue(Cue::walls(on));
                return None;
            }
            _ => (),
        }
        match self.state {
            GameState::Paused(_) => match Paused::handle_event(&event)? {
                PauseOpt::Resume => self.resume(),
                PauseOpt::Restart => self.restart(),
                PauseOpt::Quit => return Some(Screen::Quit),
            },
            GameState::Running if self.engine.is_over() => {
                if matches!(cmd, Command::Space | Command::Esc | Command::R) {
                    self.restart();
                }
            }
            GameState::Running => {
                if let Some(direction) = cmd.direction() {
                    self.engine.change_direction(direction);
                } else if cmd == Command::Esc {
                    self.pause();
                }
            }
        }
        None
    }

    fn restart(&mut self) {
        self.high_scores.reload();
        self.engine.start_new_game();
        self.state = GameState::Running;
        self.next_tick = None;
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    fn running(&self) -> bool {
        self.state == GameState::Running && !self.engine.is_over()
    }

    fn pause(&mut self) {
        tracing::info!(score = self.engine.score(), "Game paused");
        self.state = GameState::Paused(Paused::new(self.engine.score()));
        self.bell.cue(Cue::Paused);
    }

    fn resume(&mut self) {
        tracing::info!("Game resumed");
        self.state = GameState::Running;
        self.next_tick = None;
        self.bell.cue(Cue::Resumed);
    }
}

/// Time between ticks at the given level:
/// `max(BASE_TICK_PERIOD - (level - 1) * TICK_SPEEDUP_PER_LEVEL, MIN_TICK_PERIOD)`
pub(crate) fn tick_period(level: u32) -> Duration {
    consts::TICK_SPEEDUP_PER_LEVEL
        .checked_mul(level.saturating_sub(1))
        .and_then(|speedup| consts::BASE_TICK_PERIOD.checked_sub(speedup))
        .map_or(consts::MIN_TICK_PERIOD, |p| p.max(consts::MIN_TICK_PERIOD))
}

/// The part of `area` taken up by the board and its border
fn board_area(area: Rect, grid_size: i32) -> Rect {
    let [_, board_area, _, _] = screen_layout(get_display_area(area));
    let side = u16::try_from(grid_size).unwrap_or_default().saturating_add(2);
    center_rect(
        board_area,
        Size {
            width: side,
            height: side,
        },
    )
}

fn screen_layout(display: Rect) -> [Rect; 4] {
    Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(display)
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

fn head_symbol(direction: Direction) -> char {
    match direction {
        Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
        Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
        Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
        Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
    }
}

fn key_span(key: &'static str) -> Span<'static> {
    Span::styled(key, consts::KEY_STYLE)
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snap = self.engine.snapshot();
        let display = get_display_area(area);
        let [score_area, _, msg1_area, msg2_area] = screen_layout(display);
        Line::styled(
            format!(
                " Score: {}  Level: {}  High: {}  Walls: {}  Autopilot: {}",
                snap.score,
                snap.level,
                self.high_scores.best().max(snap.score),
                on_off(snap.wall_mode),
                on_off(snap.autopilot),
            ),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let block_area = board_area(area, snap.grid_size);
        if snap.wall_mode {
            Block::bordered().render(block_area, buf);
        } else {
            DottedBorder.render(block_area, buf);
        }
        draw_board(&snap, block_area.inner(Margin::new(1, 1)), buf);

        match self.state {
            GameState::Paused(paused) => {
                let pause_area = center_rect(
                    display,
                    Size {
                        width: Paused::WIDTH,
                        height: Paused::HEIGHT,
                    },
                );
                paused.render(pause_area, buf);
            }
            GameState::Running => {
                if let Some(cause) = snap.game_over {
                    Line::from(format!(
                        " GAME OVER: the snake {cause}. Final score: {}",
                        snap.score
                    ))
                    .render(msg1_area, buf);
                    Line::from_iter([
                        Span::raw(" Restart ("),
                        key_span("r"),
                        Span::raw(" / "),
                        key_span("Space"),
                        Span::raw(" / "),
                        key_span("Esc"),
                        Span::raw(")  Quit ("),
                        key_span("q"),
                        Span::raw(")"),
                    ])
                    .render(msg2_area, buf);
                } else {
                    Line::from_iter([
                        Span::raw(" Autopilot ("),
                        key_span("Enter"),
                        Span::raw(")  Walls ("),
                        key_span("Tab"),
                        Span::raw(")  Pause ("),
                        key_span("Esc"),
                        Span::raw(")  Quit ("),
                        key_span("q"),
                        Span::raw(")"),
                    ])
                    .render(msg2_area, buf);
                }
            }
        }
    }
}

fn draw_board(snap: &Snapshot, area: Rect, buf: &mut Buffer) {
    let mut canvas = Canvas { area, buf };
    let snake_style = if snap.autopilot {
        consts::AUTOPILOT_STYLE
    } else {
        consts::SNAKE_STYLE
    };
    for &cell in snap.snake.iter().skip(1) {
        canvas.draw_cell(cell, consts::SNAKE_BODY_SYMBOL, snake_style);
    }
    if let Some(food) = snap.food {
        canvas.draw_cell(food, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
    }
    // Draw the head last so that, if it's a collision, we overwrite
    // whatever it's colliding with
    if let Some(&head) = snap.snake.first() {
        if snap.game_over.is_some() {
            canvas.draw_cell(head, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
        } else {
            canvas.draw_cell(head, head_symbol(snap.direction), snake_style);
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_char(&mut self, pos: Position, symbol: char) {
        let Some(x) = self.area.x.checked_add(pos.x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
        }
    }

    /// Draw a grid cell.  Cells outside the canvas, such as a head that has
    /// gone through a wall, are skipped.
    fn draw_cell(&mut self, cell: Cell, symbol: char, style: Style) {
        let Some(x) = u16::try_from(cell.x).ok().filter(|&x| x < self.area.width) else {
            return;
        };
        let Some(y) = u16::try_from(cell.y).ok().filter(|&y| y < self.area.height) else {
            return;
        };
        let pos = Position::new(self.area.x + x, self.area.y + y);
        if let Some(c) = self.buf.cell_mut(pos) {
            c.set_char(symbol);
            c.set_style(Style::reset().patch(style));
        }
    }
}

/// Border drawn around a board whose edges wrap around
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DottedBorder;

impl Widget for DottedBorder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let size = area.as_size();
        let max_x = size.width.saturating_sub(1);
        let max_y = size.height.saturating_sub(1);
        let mut canvas = Canvas { area, buf };
        canvas.draw_char(Position::ORIGIN, '·');
        canvas.draw_char(Position::new(max_x, 0), '·');
        canvas.draw_char(Position::new(max_x, max_y), '·');
        canvas.draw_char(Position::new(0, max_y), '·');
        for x in 1..max_x {
            canvas.draw_char(Position::new(x, 0), '⋯');
            canvas.draw_char(Position::new(x, max_y), '⋯');
        }
        for y in 1..max_y {
            canvas.draw_char(Position::new(0, y), '⋮');
            canvas.draw_char(Position::new(max_x, y), '⋮');
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum GameState {
    Running,
    Paused(Paused),
}
