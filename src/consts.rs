//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Time between movements of the snake at level 1
pub(crate) const BASE_TICK_PERIOD: Duration = Duration::from_millis(180);

/// How much faster each level after the first makes the snake
pub(crate) const TICK_SPEEDUP_PER_LEVEL: Duration = Duration::from_millis(5);

/// The snake never moves faster than this
pub(crate) const MIN_TICK_PERIOD: Duration = Duration::from_millis(50);

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Length of the snake at the start of a game
pub(crate) const INITIAL_SNAKE_LENGTH: usize = 3;

/// Self-collision is only checked against segments at this index or later.
/// A head that never steps back along its last move cannot reach the two
/// segments right behind it.
pub(crate) const SELF_COLLISION_START: usize = 3;

/// Food needed to go up one level
pub(crate) const SCORE_PER_LEVEL: u32 = 5;

pub(crate) const MAX_LEVEL: u32 = 99;

/// Random food placement gives up after this many misses per grid cell and
/// enumerates the free cells instead
pub(crate) const FOOD_SAMPLING_FACTOR: usize = 4;

/// Prefix of the key under which high scores are stored; the program version
/// is appended
pub(crate) const HIGH_SCORE_KEY_PREFIX: &str = "snakeHighScore_v";

/// Number of ticks a headless run gets if no limit is given
pub(crate) const DEFAULT_HEADLESS_TICKS: u64 = 10_000;

/// Environment variable naming a file to log to
pub(crate) const LOG_FILE_ENV: &str = "AUTOSNAKE_LOG";

/// Glyph for the snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for the snake's head when it's collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the snake while the autopilot is steering
pub(crate) const AUTOPILOT_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
