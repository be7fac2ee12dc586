use crate::command::Command;
use crate::consts;
use crate::util::EnumExt;
use crossterm::event::Event;
use enum_map::Enum;
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

/// Pop-up menu shown over a paused round.  Neither snake moves while it is
/// open.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Paused {
    selection: PauseOpt,
}

impl Paused {
    pub(super) const HEIGHT: u16 = 6;

    pub(super) const WIDTH: u16 = 19;

    pub(super) fn new() -> Paused {
        Paused {
            selection: PauseOpt::min(),
        }
    }

    /// Handle an input event.  Returns `Some` if the user picked an option,
    /// either by pressing its shortcut key or by pressing Enter on the
    /// selection.
    pub(super) fn handle_event(&mut self, event: Event) -> Option<PauseOpt> {
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        if let Some(opt) = PauseOpt::iter().find(|opt| opt.shortcut() == cmd) {
            return Some(opt);
        }
        self.selection = match cmd {
            Command::Enter => return Some(self.selection),
            Command::Quit => return Some(PauseOpt::Quit),
            Command::Up => self.selection.prev().unwrap_or(self.selection),
            Command::Down => self.selection.next().unwrap_or(self.selection),
            Command::Next => self.selection.next().unwrap_or_else(PauseOpt::min),
            Command::Prev => self.selection.prev().unwrap_or_else(PauseOpt::max),
            Command::Home => PauseOpt::min(),
            Command::End => PauseOpt::max(),
            _ => self.selection,
        };
        None
    }
}

#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(super) enum PauseOpt {
    Resume,
    Restart,
    MainMenu,
    Quit,
}

impl PauseOpt {
    fn label(self) -> &'static str {
        match self {
            PauseOpt::Resume => "Resume",
            PauseOpt::Restart => "Restart",
            PauseOpt::MainMenu => "Main Menu",
            PauseOpt::Quit => "Quit",
        }
    }

    /// The key shown next to the option's label
    fn key_name(self) -> &'static str {
        match self {
            PauseOpt::Resume => "Esc",
            PauseOpt::Restart => "r",
            PauseOpt::MainMenu => "m",
            PauseOpt::Quit => "q",
        }
    }

    fn shortcut(self) -> Command {
        match self {
            PauseOpt::Resume => Command::Esc,
            PauseOpt::Restart => Command::R,
            PauseOpt::MainMenu => Command::M,
            PauseOpt::Quit => Command::Q,
        }
    }

    fn to_line(self, selected: bool) -> Line<'static> {
        let line = Line::from_iter([
            Span::raw(if selected { "» " } else { "  " }),
            Span::raw(self.label()),
            Span::raw(" ("),
            Span::styled(self.key_name(), consts::KEY_STYLE),
            Span::raw(")"),
        ]);
        if selected {
            line.style(consts::MENU_SELECTION_STYLE)
        } else {
            line
        }
    }
}

impl Widget for Paused {
    /*
     * ┌──── PAUSED ─────┐
     * │ » Resume (Esc)  │
     * │   Restart (r)   │
     * │   Main Menu (m) │
     * │   Quit (q)      │
     * └─────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" PAUSED ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        block.render(area, buf);
        for (opt, row) in PauseOpt::iter().zip(inner.rows()) {
            opt.to_line(self.selection == opt).render(row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent};
    use rstest::rstest;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::from(code))
    }

    #[rstest]
    #[case(KeyCode::Esc, PauseOpt::Resume)]
    #[case(KeyCode::Char('r'), PauseOpt::Restart)]
    #[case(KeyCode::Char('m'), PauseOpt::MainMenu)]
    #[case(KeyCode::Char('q'), PauseOpt::Quit)]
    fn shortcuts(#[case] code: KeyCode, #[case] opt: PauseOpt) {
        let mut paused = Paused::new();
        assert_eq!(paused.handle_event(press(code)), Some(opt));
    }

    #[test]
    fn navigate_and_select() {
        let mut paused = Paused::new();
        assert_eq!(paused.handle_event(press(KeyCode::Up)), None);
        assert_eq!(paused.selection, PauseOpt::Resume);
        assert_eq!(paused.handle_event(press(KeyCode::Down)), None);
        assert_eq!(paused.handle_event(press(KeyCode::Down)), None);
        assert_eq!(paused.selection, PauseOpt::MainMenu);
        assert_eq!(paused.handle_event(press(KeyCode::End)), None);
        assert_eq!(paused.handle_event(press(KeyCode::Down)), None);
        assert_eq!(paused.selection, PauseOpt::Quit);
        assert_eq!(paused.handle_event(press(KeyCode::Home)), None);
        assert_eq!(
            paused.handle_event(press(KeyCode::Enter)),
            Some(PauseOpt::Resume)
        );
    }

    #[test]
    fn render() {
        let area = Rect::new(0, 0, Paused::WIDTH, Paused::HEIGHT);
        let mut buffer = Buffer::empty(area);
        Paused::new().render(area, &mut buffer);
        let rows = (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>();
        pretty_assertions::assert_eq!(
            rows,
            [
                "┌──── PAUSED ─────┐",
                "│ » Resume (Esc)  │",
                "│   Restart (r)   │",
                "│   Main Menu (m) │",
                "│   Quit (q)      │",
                "└─────────────────┘",
            ]
        );
    }
}
