use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    text::{Line, Span, Text},
    widgets::Widget,
};

/// The game's title, with "Rival" in the rival's colors and "Snake" in the
/// player's
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Logo;

impl Logo {
    const RIVAL_WIDTH: u16 = 27;
    const SNAKE_WIDTH: u16 = 28;
    const GUTTER: u16 = 1;
    pub(super) const HEIGHT: u16 = 5;
    pub(super) const WIDTH: u16 = Self::RIVAL_WIDTH + Self::GUTTER + Self::SNAKE_WIDTH;

    #[rustfmt::skip]
    const RIVAL: [&'static str; Self::HEIGHT as usize] = [
         " ____   _                _ ",
        r"|  _ \ (_)__   __  __ _ | |",
        r"| |_) || |\ \ / / / _` || |",
        r"|  _ < | | \ V / | (_| || |",
        r"|_| \_\|_|  \_/   \__,_||_|",
    ];

    #[rustfmt::skip]
    const SNAKE: [&'static str; Self::HEIGHT as usize] = [
         " ____              _        ",
         "/ ___| _ __   __ _| | _____ ",
        r"\___ \| '_ \ / _` | |/ / _ \",
         " ___) | | | | (_| |   <  __/",
        r"|____/|_| |_|\__,_|_|\_\___|",
    ];
}

impl Widget for Logo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [rival_area, snake_area] = Layout::horizontal([Self::RIVAL_WIDTH, Self::SNAKE_WIDTH])
            .flex(Flex::Start)
            .spacing(Self::GUTTER)
            .areas(area);
        Text::from_iter(Self::RIVAL)
            .style(consts::RIVAL_STYLE)
            .render(rival_area, buf);
        Text::from_iter(Self::SNAKE)
            .style(consts::SNAKE_STYLE)
            .render(snake_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Instructions;

impl Instructions {
    pub(super) const HEIGHT: u16 = 6;
    pub(super) const WIDTH: u16 = 22;
}

fn keys_line(prefix: &'static str, keys: [&'static str; 4]) -> Line<'static> {
    let mut line = Line::from(prefix);
    for (i, k) in keys.into_iter().enumerate() {
        if i > 0 {
            line.push_span(" ");
        }
        line.push_span(Span::styled(k, consts::KEY_STYLE));
    }
    line
}

impl Widget for Instructions {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Text::from_iter([
            Line::from("Steer your snake with:"),
            keys_line("       ", ["←", "↓", "↑", "→"]),
            keys_line("   or: ", ["h", "j", "k", "l"]),
            keys_line("   or: ", ["a", "s", "w", "d"]),
            Line::from("Beat the rival to the"),
            Line::from("fruit and don't crash!"),
        ])
        .render(area, buf);
    }
}
