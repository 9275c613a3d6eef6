use crate::command::Command;
use crate::consts;
use crossterm::event::Event;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
};

/// A pop-up shown over the board while the game is paused
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Paused {
    /// Score at the moment the game was paused
    score: u32,
}

impl Paused {
    /// The height that should be used for the `Rect` passed to
    /// `Paused::render()`
    pub(super) const HEIGHT: u16 = 6;

    /// The width that should be used for the `Rect` passed to
    /// `Paused::render()`
    pub(super) const WIDTH: u16 = 21;

    pub(super) fn new(score: u32) -> Paused {
        Paused { score }
    }

    /// Handle an input event.  Returns `Some` if the user made a choice.
    pub(super) fn handle_event(event: &Event) -> Option<PauseOpt> {
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Esc | Command::Space => Some(PauseOpt::Resume),
            Command::R => Some(PauseOpt::Restart),
            Command::Q | Command::Quit => Some(PauseOpt::Quit),
            _ => None,
        }
    }
}

/// What can be done from the pause screen
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum PauseOpt {
    Resume,
    Restart,
    Quit,
}

impl Widget for Paused {
    /*
     * ┌───── PAUSED ──────┐
     * │ Score: 12         │
     * │ Resume (Esc)      │
     * │ Restart (r)       │
     * │ Quit (q)          │
     * └───────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" PAUSED ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        block.render(area, buf);
        let lines = [
            Line::from(format!("Score: {}", self.score)),
            key_line("Resume", "Esc"),
            key_line("Restart", "r"),
            key_line("Quit", "q"),
        ];
        for (line, row) in lines.into_iter().zip(inner.rows()) {
            line.render(row, buf);
        }
    }
}

fn key_line(label: &'static str, key: &'static str) -> Line<'static> {
    Line::from_iter([
        Span::raw(label),
        Span::raw(" ("),
        Span::styled(key, consts::KEY_STYLE),
        Span::raw(")"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use rstest::rstest;

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn render() {
        let area = Rect::new(0, 0, Paused::WIDTH, Paused::HEIGHT);
        let mut buffer = Buffer::empty(area);
        Paused::new(12).render(area, &mut buffer);
        assert!(row_text(&buffer, 0).contains(" PAUSED "));
        assert_eq!(row_text(&buffer, 1), "│ Score: 12         │");
        assert_eq!(row_text(&buffer, 2), "│ Resume (Esc)      │");
        assert_eq!(row_text(&buffer, 3), "│ Restart (r)       │");
        assert_eq!(row_text(&buffer, 4), "│ Quit (q)          │");
        assert_eq!(buffer[(10, 2)].style().fg, consts::KEY_STYLE.fg);
    }

    #[rstest]
    #[case(KeyCode::Esc, Some(PauseOpt::Resume))]
    #[case(KeyCode::Char(' '), Some(PauseOpt::Resume))]
    #[case(KeyCode::Char('r'), Some(PauseOpt::Restart))]
    #[case(KeyCode::Char('q'), Some(PauseOpt::Quit))]
    #[case(KeyCode::Up, None)]
    #[case(KeyCode::Enter, None)]
    fn choices(#[case] code: KeyCode, #[case] opt: Option<PauseOpt>) {
        assert_eq!(Paused::handle_event(&Event::Key(code.into())), opt);
    }
}
