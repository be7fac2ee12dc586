use crate::consts;
use crate::util::EnumExt;
use enum_dispatch::enum_dispatch;
use enum_map::Enum;
use ratatui::layout::Size;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Gameplay options, chosen in the main menu and seeded from the
/// configuration file
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct Options {
    /// Whether the snakes wrap around the edges of the level
    pub(crate) wraparound: bool,

    /// Whether an AI-controlled rival snake shares the level
    pub(crate) rival: bool,

    pub(crate) fruits: FruitQty,
    pub(crate) level_size: LevelSize,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            wraparound: false,
            rival: true,
            fruits: FruitQty::default(),
            level_size: LevelSize::default(),
        }
    }
}

impl Options {
    pub(crate) fn get(&self, key: OptKey) -> OptValue {
        match key {
            OptKey::Wraparound => self.wraparound.into(),
            OptKey::Rival => self.rival.into(),
            OptKey::Fruits => self.fruits.into(),
            OptKey::LevelSize => self.level_size.into(),
        }
    }

    /// Set the option `key` to `value`.  A value of the wrong kind for `key`
    /// (e.g., a level size for the fruit count) leaves the options unchanged.
    pub(crate) fn set(&mut self, key: OptKey, value: OptValue) {
        match (key, value) {
            (OptKey::Wraparound, OptValue::Bool(on)) => self.wraparound = on,
            (OptKey::Rival, OptValue::Bool(on)) => self.rival = on,
            (OptKey::Fruits, OptValue::FruitQty(qty)) => self.fruits = qty,
            (OptKey::LevelSize, OptValue::LevelSize(size)) => self.level_size = size,
            _ => (),
        }
    }
}

#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum OptKey {
    Wraparound,
    Rival,
    Fruits,
    LevelSize,
}

impl OptKey {
    pub(crate) const DISPLAY_WIDTH: u16 = 10;

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            OptKey::Wraparound => "Wraparound",
            OptKey::Rival => "AI Rival",
            OptKey::Fruits => "Fruits",
            OptKey::LevelSize => "Level Size",
        }
    }
}

impl fmt::Display for OptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A value that the player can step through with the arrow keys or flip with
/// the space bar
#[enum_dispatch]
pub(crate) trait Adjustable {
    fn increase(&mut self);
    fn decrease(&mut self);
    fn toggle(&mut self);
    fn can_increase(&self) -> bool;
    fn can_decrease(&self) -> bool;
}

#[enum_dispatch(Adjustable)] // This also gives us From and TryInto
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum OptValue {
    Bool(bool),
    FruitQty,
    LevelSize,
}

impl OptValue {
    pub(crate) const DISPLAY_WIDTH: u16 = 10;
}

// EnumMap needs this to be convenient to construct.
impl Default for OptValue {
    fn default() -> OptValue {
        OptValue::Bool(false)
    }
}

impl fmt::Display for OptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            OptValue::Bool(on) => write!(f, "   [{}]    ", if on { '✓' } else { ' ' }),
            OptValue::FruitQty(qty) => write_stepper(f, &qty, format_args!("{qty:^6}")),
            OptValue::LevelSize(size) => write_stepper(f, &size, format_args!("{size:6}")),
        }
    }
}

/// Write `label` between a pair of arrows that are filled in when `value` can
/// be adjusted in their direction
fn write_stepper(
    f: &mut fmt::Formatter<'_>,
    value: &impl Adjustable,
    label: fmt::Arguments<'_>,
) -> fmt::Result {
    let left = if value.can_decrease() { '◀' } else { '◁' };
    let right = if value.can_increase() { '▶' } else { '▷' };
    write!(f, "{left} {label} {right}")
}

impl Adjustable for bool {
    fn increase(&mut self) {
        *self = true;
    }

    fn decrease(&mut self) {
        *self = false;
    }

    fn toggle(&mut self) {
        *self = !*self;
    }

    fn can_increase(&self) -> bool {
        !*self
    }

    fn can_decrease(&self) -> bool {
        *self
    }
}

/// How big the level is.  Every size fits, with its border and the score and
/// message lines, inside [`consts::DISPLAY_SIZE`].
#[derive(Clone, Copy, Debug, Default, Deserialize, Enum, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum LevelSize {
    Small,
    Medium,
    #[default]
    Large,
}

impl LevelSize {
    pub(crate) fn as_size(self) -> Size {
        match self {
            LevelSize::Small => Size::new(38, 8),
            LevelSize::Medium => Size::new(53, 12),
            LevelSize::Large => Size::new(76, 19),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            LevelSize::Small => "Small",
            LevelSize::Medium => "Medium",
            LevelSize::Large => "Large",
        }
    }
}

impl fmt::Display for LevelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl Adjustable for LevelSize {
    fn increase(&mut self) {
        if let Some(size) = self.next() {
            *self = size;
        }
    }

    fn decrease(&mut self) {
        if let Some(size) = self.prev() {
            *self = size;
        }
    }

    fn toggle(&mut self) {}

    fn can_increase(&self) -> bool {
        self.next().is_some()
    }

    fn can_decrease(&self) -> bool {
        self.prev().is_some()
    }
}

/// The number of fruits on the level at once, between 1 and
/// [`MAX_FRUITS`][consts::MAX_FRUITS]
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "usize")]
pub(crate) struct FruitQty(usize);

impl FruitQty {
    const MIN: usize = 1;

    pub(crate) fn new(qty: usize) -> Option<FruitQty> {
        (FruitQty::MIN..=consts::MAX_FRUITS)
            .contains(&qty)
            .then_some(FruitQty(qty))
    }

    pub(crate) fn get(self) -> usize {
        self.0
    }
}

impl Default for FruitQty {
    fn default() -> FruitQty {
        FruitQty(FruitQty::MIN)
    }
}

impl TryFrom<usize> for FruitQty {
    type Error = FruitQtyError;

    fn try_from(qty: usize) -> Result<FruitQty, FruitQtyError> {
        FruitQty::new(qty).ok_or(FruitQtyError(qty))
    }
}

impl fmt::Display for FruitQty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0.to_string())
    }
}

impl Adjustable for FruitQty {
    fn increase(&mut self) {
        *self = FruitQty::new(self.0 + 1).unwrap_or(*self);
    }

    fn decrease(&mut self) {
        *self = self
            .0
            .checked_sub(1)
            .and_then(FruitQty::new)
            .unwrap_or(*self);
    }

    fn toggle(&mut self) {}

    fn can_increase(&self) -> bool {
        self.0 < consts::MAX_FRUITS
    }

    fn can_decrease(&self) -> bool {
        self.0 > FruitQty::MIN
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("fruit quantity must be between 1 and {max}, got {0}", max = consts::MAX_FRUITS)]
pub(crate) struct FruitQtyError(usize);
