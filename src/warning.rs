use crate::command::Command;
use crate::util::center_rect;
use crossterm::event::Event;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect, Size},
    text::{Line, Text},
    widgets::{
        block::{Block, Padding},
        Clear, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};
use std::borrow::Cow;

/// A pop-up describing a problem that the game worked around, such as an
/// unreadable configuration file.  It stays over the main menu until
/// dismissed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Warning {
    lines: Vec<String>,
    scroll_offset: usize,
}

impl Warning {
    const MAX_LINES: u16 = 16;
    const TEXT_WIDTH: u16 = 48;
    const WIDTH: u16 = Self::TEXT_WIDTH + 4;

    /// Describe `err` followed by each error in its chain of sources
    pub(crate) fn from_error(err: &dyn std::error::Error) -> Warning {
        let mut msgs = vec![err.to_string()];
        let mut source = err.source();
        while let Some(src) = source {
            msgs.push(src.to_string());
            source = src.source();
        }
        Warning::from_messages(&msgs)
    }

    fn from_messages(msgs: &[String]) -> Warning {
        let mut lines = Vec::new();
        if let Some((first, causes)) = msgs.split_first() {
            wrap_into(&mut lines, first, "", "");
            if !causes.is_empty() {
                lines.push(String::new());
                lines.push(String::from("Caused by:"));
            }
            if let [cause] = causes {
                wrap_into(&mut lines, cause, "    ", "    ");
            } else {
                for (i, cause) in causes.iter().enumerate() {
                    wrap_into(&mut lines, cause, &format!("{i:>5}: "), "       ");
                }
            }
        }
        Warning {
            lines,
            scroll_offset: 0,
        }
    }

    /// Handle an input event.  Returns `Some` once the user has dismissed the
    /// warning or asked to quit.
    pub(crate) fn handle_event(&mut self, event: Event) -> Option<WarningOutcome> {
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Enter | Command::Esc => return Some(WarningOutcome::Dismissed),
            Command::Quit => return Some(WarningOutcome::Quit),
            Command::Up => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            Command::Down if self.scroll_offset < self.max_scroll() => self.scroll_offset += 1,
            _ => (),
        }
        None
    }

    fn scrolling(&self) -> bool {
        self.lines.len() > usize::from(Self::MAX_LINES)
    }

    /// The greatest `scroll_offset` that still fills the text area
    fn max_scroll(&self) -> usize {
        self.lines
            .len()
            .saturating_sub(usize::from(Self::MAX_LINES))
    }
}

fn wrap_into(lines: &mut Vec<String>, text: &str, initial_indent: &str, subsequent_indent: &str) {
    let opts = textwrap::Options::new(usize::from(Warning::TEXT_WIDTH))
        .break_words(true)
        .initial_indent(initial_indent)
        .subsequent_indent(subsequent_indent);
    lines.extend(textwrap::wrap(text, opts).into_iter().map(Cow::into_owned));
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum WarningOutcome {
    Dismissed,
    Quit,
}

impl Widget for &Warning {
    // `area` is the whole display, not just the pop-up
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = u16::try_from(self.lines.len())
            .unwrap_or(u16::MAX)
            .min(Warning::MAX_LINES)
            .saturating_add(4);
        let block_area = center_rect(
            area,
            Size {
                width: Warning::WIDTH.saturating_add(u16::from(self.scrolling()) * 2),
                height,
            },
        );
        let block = Block::bordered()
            .title(" WARNING ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let [text_area, ok_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
            .flex(Flex::Start)
            .spacing(1)
            .areas(block.inner(block_area));
        Clear.render(block_area, buf);
        block.render(block_area, buf);
        let visible = self
            .lines
            .iter()
            .skip(self.scroll_offset)
            .take(usize::from(Warning::MAX_LINES))
            .map(String::as_str);
        if self.scrolling() {
            let [text_area, scrollbar_area] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Length(1)])
                    .flex(Flex::Start)
                    .spacing(1)
                    .areas(text_area);
            Text::from_iter(visible).render(text_area, buf);
            let mut scroll_state =
                ScrollbarState::new(self.max_scroll()).position(self.scroll_offset);
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .track_symbol(Some(ratatui::symbols::shade::MEDIUM))
                .render(scrollbar_area, buf, &mut scroll_state);
        } else {
            Text::from_iter(visible).render(text_area, buf);
        }
        Line::from("[OK]").centered().render(ok_area, buf);
    }
}
