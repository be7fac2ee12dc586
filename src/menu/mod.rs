mod widgets;
use self::widgets::{Instructions, Logo};
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::game::Game;
use crate::options::{Adjustable, OptKey, OptValue, Options};
use crate::util::{get_display_area, EnumExt, Globals};
use crossterm::event::{read, Event};
use enum_map::{Enum, EnumMap};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
    Frame,
};

/// The title screen, from which the player adjusts the options and starts a
/// round
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct MainMenu {
    selection: Selection,
    options: OptionsMenu,

    /// Settings that are not adjustable from the menu and are passed through
    /// to each new round
    globals: Globals,
}

impl MainMenu {
    pub(crate) fn new(globals: Globals) -> Self {
        MainMenu {
            selection: Selection::default(),
            options: OptionsMenu::new(globals.options),
            globals,
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?))
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match (
            self.selection,
            Command::from_key_event(event.as_key_press_event()?)?,
        ) {
            (_, Command::Quit) => return Some(Screen::Quit),
            (_, Command::Home) => self.select(Selection::PlayButton, None),
            (_, Command::End) => self.select(Selection::QuitButton, None),
            (Selection::PlayButton, Command::Enter) | (_, Command::P) => {
                return Some(Screen::Game(Box::new(Game::new(self.globals()))))
            }
            (Selection::PlayButton, Command::Prev) => self.select(Selection::QuitButton, None),
            (Selection::PlayButton, Command::Down | Command::Next) => {
                self.select(Selection::Options, Some(OptKey::min()));
            }
            (Selection::Options, Command::Up | Command::Prev) => {
                if let Some(sel) = self.options.move_up() {
                    self.select(sel, None);
                }
            }
            (Selection::Options, Command::Down | Command::Next) => {
                if let Some(sel) = self.options.move_down() {
                    self.select(sel, None);
                }
            }
            (Selection::Options, Command::Left) => self.options.adjust(OptValue::decrease),
            (Selection::Options, Command::Right) => self.options.adjust(OptValue::increase),
            (Selection::Options, Command::Space | Command::Enter) => {
                self.options.adjust(OptValue::toggle);
            }
            (Selection::QuitButton, Command::Enter) | (_, Command::Q) => {
                return Some(Screen::Quit);
            }
            (Selection::QuitButton, Command::Next) => self.select(Selection::PlayButton, None),
            (Selection::QuitButton, Command::Up | Command::Prev) => {
                self.select(Selection::Options, Some(OptKey::max()));
            }
            _ => (),
        }
        None
    }

    /// The settings for a round started from the menu as it currently stands
    fn globals(&self) -> Globals {
        Globals {
            options: self.options.to_options(),
            ..self.globals.clone()
        }
    }

    fn select(&mut self, selection: Selection, option: Option<OptKey>) {
        self.selection = selection;
        if selection == Selection::Options {
            self.options.selection = option;
        }
    }
}

impl Widget for &MainMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [logo_area, instructions_area, play_area, options_area, quit_area] =
            Layout::vertical([
                Logo::HEIGHT,
                Instructions::HEIGHT,
                1,
                OptionsMenu::HEIGHT,
                1,
            ])
            .flex(Flex::Start)
            .spacing(1)
            .areas(display);

        let [logo_area] = Layout::horizontal([Logo::WIDTH])
            .flex(Flex::Center)
            .areas(logo_area);
        Logo.render(logo_area, buf);

        let [instructions_area] = Layout::horizontal([Instructions::WIDTH])
            .flex(Flex::Center)
            .areas(instructions_area);
        Instructions.render(instructions_area, buf);

        button("Play", "p", self.selection == Selection::PlayButton).render(play_area, buf);

        let [options_area] = Layout::horizontal([OptionsMenu::WIDTH])
            .flex(Flex::Center)
            .areas(options_area);
        (&self.options).render(options_area, buf);

        button("Quit", "q", self.selection == Selection::QuitButton).render(quit_area, buf);
    }
}

fn button(label: &'static str, key: &'static str, selected: bool) -> Line<'static> {
    let style = if selected {
        consts::MENU_SELECTION_STYLE
    } else {
        Style::new()
    };
    Line::from_iter([
        Span::styled("[", style),
        Span::styled(label, style),
        Span::styled(" (", style),
        Span::styled(key, consts::KEY_STYLE.patch(style)),
        Span::styled(")]", style),
    ])
    .centered()
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum Selection {
    #[default]
    PlayButton,
    Options,
    QuitButton,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct OptionsMenu {
    /// The key of the selected option, if the selection is inside this menu
    selection: Option<OptKey>,
    settings: EnumMap<OptKey, OptValue>,
}

impl OptionsMenu {
    #[allow(clippy::cast_possible_truncation)]
    const HEIGHT: u16 = (OptKey::LENGTH as u16) + 2 /* for border */;
    const HORIZONTAL_PADDING: u16 = 1;
    const POINTER_WIDTH: u16 = 2;
    const LABEL_VALUE_GUTTER: u16 = 2;
    const WIDTH: u16 = 2 /* for border */ + 2 * Self::HORIZONTAL_PADDING + Self::POINTER_WIDTH + OptKey::DISPLAY_WIDTH + Self::LABEL_VALUE_GUTTER + OptValue::DISPLAY_WIDTH;

    fn new(options: Options) -> Self {
        let settings = EnumMap::from_iter(OptKey::iter().map(|key| (key, options.get(key))));
        OptionsMenu {
            selection: None,
            settings,
        }
    }

    fn to_options(&self) -> Options {
        let mut opts = Options::default();
        for key in OptKey::iter() {
            opts.set(key, self.settings[key]);
        }
        opts
    }

    /// Move the selection up one option.  Returns the main menu item to
    /// select if this moves the selection off the top of the menu.
    fn move_up(&mut self) -> Option<Selection> {
        self.selection = self.selection?.prev();
        self.selection.is_none().then_some(Selection::PlayButton)
    }

    /// Move the selection down one option.  Returns the main menu item to
    /// select if this moves the selection off the bottom of the menu.
    fn move_down(&mut self) -> Option<Selection> {
        self.selection = self.selection?.next();
        self.selection.is_none().then_some(Selection::QuitButton)
    }

    fn adjust(&mut self, f: fn(&mut OptValue)) {
        if let Some(sel) = self.selection {
            f(&mut self.settings[sel]);
        }
    }
}

impl Widget for &OptionsMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Options: ")
            .padding(Padding::horizontal(OptionsMenu::HORIZONTAL_PADDING));
        let menu_area = block.inner(area);
        block.render(area, buf);
        for (key, row) in OptKey::iter().zip(menu_area.rows()) {
            let selected = Some(key) == self.selection;
            let style = if selected {
                consts::MENU_SELECTION_STYLE
            } else {
                Style::new()
            };
            let s = format!(
                "{pointer:pwidth$}{key:lwidth$}{space:gutter$}{value}",
                pointer = if selected { "»" } else { "" },
                pwidth = usize::from(OptionsMenu::POINTER_WIDTH),
                lwidth = usize::from(OptKey::DISPLAY_WIDTH),
                space = "",
                gutter = usize::from(OptionsMenu::LABEL_VALUE_GUTTER),
                value = self.settings[key],
            );
            Span::styled(s, style).render(row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    fn press(code: KeyCode) -> Event {
        Event::Key(code.into())
    }

    fn rows(menu: &MainMenu) -> Vec<String> {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        menu.render(area, &mut buffer);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_owned()
            })
            .collect()
    }

    mod main_menu {
        use super::*;
        use crate::options::LevelSize;

        #[test]
        fn draw_initial() {
            let menu = MainMenu::new(Globals::default());
            let rows = rows(&menu);
            pretty_assertions::assert_eq!(
                &rows[13..],
                &[
                    "                                   [Play (p)]",
                    "",
                    "                          ┌ Options: ────────────────┐",
                    "                          │   Wraparound     [ ]     │",
                    "                          │   AI Rival       [✓]     │",
                    "                          │   Fruits      ◁   1    ▶ │",
                    "                          │   Level Size  ◀ Large  ▷ │",
                    "                          └──────────────────────────┘",
                    "",
                    "                                   [Quit (q)]",
                    "",
                ]
            );
            assert_eq!(rows[6], "                             Steer your snake with:");
            assert!(rows[0].starts_with("             ____   _"));
        }

        #[test]
        fn disable_rival_and_play() {
            let mut menu = MainMenu::new(Globals::default());
            assert!(menu.handle_event(press(KeyCode::Down)).is_none());
            assert!(menu.handle_event(press(KeyCode::Down)).is_none());
            assert_eq!(menu.options.selection, Some(OptKey::Rival));
            assert!(menu.handle_event(press(KeyCode::Char(' '))).is_none());
            assert_eq!(
                rows(&menu)[17],
                "                          │ » AI Rival       [ ]     │"
            );
            let globals = menu.globals();
            assert!(!globals.options.rival);
            assert_eq!(globals.ai, Globals::default().ai);
            assert!(matches!(
                menu.handle_event(press(KeyCode::Char('p'))),
                Some(Screen::Game(_))
            ));
        }

        #[test]
        fn shrink_level() {
            let mut menu = MainMenu::new(Globals::default());
            assert!(menu.handle_event(press(KeyCode::End)).is_none());
            assert!(menu.handle_event(press(KeyCode::Up)).is_none());
            assert_eq!(menu.options.selection, Some(OptKey::LevelSize));
            assert!(menu.handle_event(press(KeyCode::Left)).is_none());
            assert!(menu.handle_event(press(KeyCode::Left)).is_none());
            assert!(menu.handle_event(press(KeyCode::Left)).is_none());
            assert_eq!(menu.options.to_options().level_size, LevelSize::Small);
            assert_eq!(
                rows(&menu)[19],
                "                          │ » Level Size  ◁ Small  ▶ │"
            );
        }

        #[test]
        fn quit_button() {
            let mut menu = MainMenu::new(Globals::default());
            assert!(menu.handle_event(press(KeyCode::BackTab)).is_none());
            assert_eq!(menu.selection, Selection::QuitButton);
            assert!(matches!(
                menu.handle_event(press(KeyCode::Enter)),
                Some(Screen::Quit)
            ));
        }

        /// Tabbing past the end of the options menu and around again lands on
        /// the first option
        #[test]
        fn tab_wraparound() {
            let mut menu = MainMenu::new(Globals::default());
            assert_eq!(menu.options.selection, None);
            for _ in OptKey::iter() {
                assert!(menu.handle_event(press(KeyCode::Tab)).is_none());
            }
            assert_eq!(menu.options.selection, Some(OptKey::max()));
            assert!(menu.handle_event(press(KeyCode::Tab)).is_none());
            assert_eq!(menu.options.selection, None);
            assert!(menu.handle_event(press(KeyCode::Tab)).is_none());
            assert!(menu.handle_event(press(KeyCode::Tab)).is_none());
            assert_eq!(menu.options.selection, Some(OptKey::min()));
        }
    }

    mod options_menu {
        use super::*;
        use crate::options::{FruitQty, LevelSize};

        #[test]
        fn roundtrip_defaults() {
            let opts = Options::default();
            let optmenu = OptionsMenu::new(opts);
            assert_eq!(optmenu.to_options(), opts);
        }

        #[test]
        fn roundtrip_custom() {
            let opts = Options {
                wraparound: true,
                rival: false,
                fruits: FruitQty::new(4).unwrap(),
                level_size: LevelSize::Small,
            };
            let optmenu = OptionsMenu::new(opts);
            assert_eq!(optmenu.to_options(), opts);
        }
    }
}
