use crate::consts;
use crate::game::Game;
use crate::menu::MainMenu;
use crate::util::{get_display_area, Globals};
use crate::warning::{Warning, WarningOutcome};
use crossterm::{
    event::{read, Event},
    execute,
    terminal::SetTitle,
};
use ratatui::{backend::Backend, Terminal};
use std::collections::VecDeque;
use std::io;
use std::time::Instant;

#[derive(Debug)]
pub(crate) struct App {
    screen: Screen,

    /// Problems encountered at start-up, shown one at a time over the main
    /// menu until dismissed
    warnings: VecDeque<Warning>,

    fps: FpsCounter,

    /// The terminal title most recently set
    title: Option<String>,
}

impl App {
    pub(crate) fn new(globals: Globals, warnings: Vec<Warning>) -> App {
        App {
            screen: Screen::Main(MainMenu::new(globals)),
            warnings: warnings.into(),
            fps: FpsCounter::new(Instant::now()),
            title: None,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.update_title(Instant::now())?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| {
            match self.screen {
                Screen::Main(ref menu) => menu.draw(frame),
                Screen::Game(ref game) => game.draw(frame),
                Screen::Quit => (),
            }
            if let Some(warning) = self.warnings.front() {
                frame.render_widget(warning, get_display_area(frame.area()));
            }
        })?;
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        if !self.warnings.is_empty() {
            self.handle_warning_event(read()?);
            return Ok(());
        }
        let next = match self.screen {
            Screen::Main(ref mut menu) => menu.process_input()?,
            Screen::Game(ref mut game) => game.process_input()?,
            Screen::Quit => None,
        };
        if let Some(screen) = next {
            self.screen = screen;
        }
        Ok(())
    }

    fn handle_warning_event(&mut self, event: Event) {
        let Some(warning) = self.warnings.front_mut() else {
            return;
        };
        match warning.handle_event(event) {
            Some(WarningOutcome::Dismissed) => {
                let _ = self.warnings.pop_front();
            }
            Some(WarningOutcome::Quit) => self.screen = Screen::Quit,
            None => (),
        }
    }

    /// Count a frame drawn at `now` and set the terminal title if its text has
    /// changed
    fn update_title(&mut self, now: Instant) -> io::Result<()> {
        self.fps.tick(now);
        let title = self.title_text();
        if self.title.as_ref() != Some(&title) {
            execute!(io::stdout(), SetTitle(&title))?;
            self.title = Some(title);
        }
        Ok(())
    }

    fn title_text(&self) -> String {
        match self.screen {
            Screen::Game(ref game) => format!(
                "{} Score: {} FPS: {}",
                consts::TITLE,
                game.score(),
                self.fps.current()
            ),
            _ => String::from(consts::TITLE),
        }
    }

    fn quitting(&self) -> bool {
        matches!(self.screen, Screen::Quit)
    }
}

#[derive(Debug)]
pub(crate) enum Screen {
    Main(MainMenu),
    Game(Box<Game>),
    Quit,
}

/// Measures the rate at which frames are drawn, averaged over each
/// [`consts::FPS_WINDOW`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct FpsCounter {
    window_start: Instant,
    frames: u32,
    fps: u32,
}

impl FpsCounter {
    fn new(now: Instant) -> FpsCounter {
        FpsCounter {
            window_start: now,
            frames: 0,
            fps: 0,
        }
    }

    /// Record a frame drawn at `now`.  Returns `true` if this completed a
    /// window and the rate was remeasured.
    fn tick(&mut self, now: Instant) -> bool {
        self.frames = self.frames.saturating_add(1);
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < consts::FPS_WINDOW {
            return false;
        }
        let rate = u128::from(self.frames) * 1000 / elapsed.as_millis();
        self.fps = u32::try_from(rate).unwrap_or(u32::MAX);
        self.frames = 0;
        self.window_start = now;
        true
    }

    fn current(&self) -> u32 {
        self.fps
    }
}
