//! Playing a game with the autopilot and no terminal interface
use crate::engine::{Engine, EventSink, GameEvent, GameOverCause, Steering};
use crate::options::Options;
use rand::Rng;
use serde::Serialize;

/// How a headless run ended
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum Outcome {
    Wall,
    SelfCollision,
    BoardFull,
    /// The game was still going when the tick limit was reached
    TickLimit,
}

impl From<GameOverCause> for Outcome {
    fn from(cause: GameOverCause) -> Outcome {
        match cause {
            GameOverCause::Wall => Outcome::Wall,
            GameOverCause::SelfCollision => Outcome::SelfCollision,
            GameOverCause::BoardFull => Outcome::BoardFull,
        }
    }
}

/// What is printed at the end of a headless run
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub(crate) struct Summary {
    pub(crate) grid_size: u16,
    pub(crate) walls: bool,
    pub(crate) ticks: u64,
    pub(crate) score: u32,
    pub(crate) level: u32,
    /// Final length of the snake
    pub(crate) length: usize,
    pub(crate) outcome: Outcome,
    /// Number of times the autopilot changed direction
    pub(crate) turns: u32,
}

/// Counts the events of a run
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct Tally {
    food: u32,
    turns: u32,
    cause: Option<GameOverCause>,
}

impl EventSink for Tally {
    fn handle(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::FoodEaten { .. } => self.food += 1,
            GameEvent::DirectionChanged { steering, .. } => {
                if steering == Steering::Autopilot {
                    self.turns += 1;
                }
            }
            GameEvent::GameOver { cause, .. } => self.cause = Some(cause),
        }
    }
}

/// Play one game with the autopilot forced on, stopping after `max_ticks`
/// ticks if the game has not ended by then
pub(crate) fn run<R: Rng>(options: Options, rng: R, max_ticks: u64) -> Summary {
    let options = Options {
        autopilot: true,
        ..options
    };
    let mut engine = Engine::new(options, rng);
    let mut tally = Tally::default();
    let mut ticks = 0;
    while ticks < max_ticks && !engine.is_over() {
        engine.advance_tick();
        engine.dispatch_events(&mut tally);
        ticks += 1;
    }
    let snap = engine.snapshot();
    let summary = Summary {
        grid_size: options.grid_size.get(),
        walls: snap.wall_mode,
        ticks,
        score: snap.score,
        level: snap.level,
        length: snap.snake.len(),
        outcome: tally.cause.map_or(Outcome::TickLimit, Outcome::from),
        turns: tally.turns,
    };
    tracing::info!(
        ticks,
        score = summary.score,
        food = tally.food,
        outcome = ?summary.outcome,
        "Headless run finished"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts;
    use crate::engine::level_for_score;
    use crate::options::GridSize;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn rng() -> ChaCha12Rng {
        ChaCha12Rng::seed_from_u64(RNG_SEED)
    }

    #[test]
    fn zero_ticks() {
        let summary = run(Options::default(), rng(), 0);
        assert_eq!(
            summary,
            Summary {
                grid_size: 18,
                walls: false,
                ticks: 0,
                score: 0,
                level: 1,
                length: consts::INITIAL_SNAKE_LENGTH,
                outcome: Outcome::TickLimit,
                turns: 0,
            }
        );
    }

    #[test]
    fn autopilot_eats() {
        let summary = run(Options::default(), rng(), 2000);
        assert!(summary.score > 0);
        assert!(summary.turns > 0);
    }

    #[rstest]
    #[case(false, 18)]
    #[case(true, 18)]
    #[case(false, 6)]
    #[case(true, 6)]
    fn consistent_summary(#[case] walls: bool, #[case] size: u16) {
        let options = Options {
            grid_size: GridSize::new(size).expect("grid size should be valid"),
            walls,
            autopilot: false,
        };
        let summary = run(options, rng(), 3000);
        assert!(summary.ticks <= 3000);
        if summary.outcome == Outcome::TickLimit {
            assert_eq!(summary.ticks, 3000);
        }
        assert_eq!(summary.walls, walls);
        let score = usize::try_from(summary.score).expect("score should fit in usize");
        assert_eq!(summary.length, consts::INITIAL_SNAKE_LENGTH + score);
        assert_eq!(summary.level, level_for_score(summary.score));
    }

    #[test]
    fn same_seed_same_run() {
        let a = run(Options::default(), rng(), 5000);
        let b = run(Options::default(), rng(), 5000);
        assert_eq!(a, b);
    }

    #[test]
    fn summary_json() {
        let summary = Summary {
            grid_size: 10,
            walls: true,
            ticks: 42,
            score: 3,
            level: 1,
            length: 6,
            outcome: Outcome::SelfCollision,
            turns: 9,
        };
        assert_eq!(
            serde_json::to_value(&summary).expect("summary should serialize"),
            serde_json::json!({
                "grid_size": 10,
                "walls": true,
                "ticks": 42,
                "score": 3,
                "level": 1,
                "length": 6,
                "outcome": "self-collision",
                "turns": 9,
            })
        );
    }
}
