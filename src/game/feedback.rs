use crate::engine::{EventSink, GameEvent};
use std::io::{self, Write};

/// Something the driver did that gets an audible cue
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Cue {
    WallsOn,
    WallsOff,
    AutopilotOn,
    AutopilotOff,
    Paused,
    Resumed,
}

impl Cue {
    pub(super) fn walls(on: bool) -> Cue {
        if on {
            Cue::WallsOn
        } else {
            Cue::WallsOff
        }
    }

    pub(super) fn autopilot(on: bool) -> Cue {
        if on {
            Cue::AutopilotOn
        } else {
            Cue::AutopilotOff
        }
    }

    /// Turning something on rings twice so it can be told apart from
    /// turning it off
    fn rings(self) -> usize {
        match self {
            Cue::WallsOn | Cue::AutopilotOn => 2,
            Cue::WallsOff | Cue::AutopilotOff | Cue::Paused | Cue::Resumed => 1,
        }
    }
}

/// Rings the terminal bell on food, game over, mode toggles and pausing
#[derive(Debug)]
pub(crate) struct Bell<W = io::Stdout> {
    /// `None` when the bell is turned off
    out: Option<W>,
}

impl Bell<io::Stdout> {
    pub(crate) fn new(enabled: bool) -> Bell<io::Stdout> {
        Bell {
            out: enabled.then(io::stdout),
        }
    }
}

impl<W: Write> Bell<W> {
    #[cfg(test)]
    fn with_writer(out: W) -> Bell<W> {
        Bell { out: Some(out) }
    }

    pub(super) fn cue(&mut self, cue: Cue) {
        self.ring(cue.rings());
    }

    fn ring(&mut self, times: usize) {
        let Some(out) = self.out.as_mut() else {
            return;
        };
        let bells = b"\x07".repeat(times);
        if let Err(e) = out.write_all(&bells).and_then(|()| out.flush()) {
            tracing::warn!(error = %e, "Could not ring the bell; turning it off");
            self.out = None;
        }
    }
}

impl<W: Write> EventSink for Bell<W> {
    fn handle(&mut self, event: &GameEvent) {
        match event {
            GameEvent::FoodEaten { .. } | GameEvent::GameOver { .. } => self.ring(1),
            GameEvent::DirectionChanged { .. } => (),
        }
    }
}
