use crate::config::{AiConfig, Config, Styles};
use crate::consts;
use crate::options::Options;
use enum_map::Enum;
use ratatui::layout::{Flex, Layout, Rect, Size};

/// Settings shared by every screen for the lifetime of the program
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Globals {
    /// The gameplay options currently selected in the main menu
    pub(crate) options: Options,

    /// Tuning for the rival snake
    pub(crate) ai: AiConfig,

    pub(crate) styles: Styles,
}

impl From<&Config> for Globals {
    fn from(config: &Config) -> Globals {
        Globals {
            options: config.options,
            ai: config.ai,
            styles: config.styles,
        }
    }
}

pub(crate) trait EnumExt: Enum {
    fn iter() -> impl Iterator<Item = Self> {
        (0..Self::LENGTH).map(Self::from_usize)
    }

    fn min() -> Self {
        Self::from_usize(0)
    }

    fn max() -> Self {
        Self::from_usize(Self::LENGTH - 1)
    }

    fn next(self) -> Option<Self> {
        let i = self.into_usize() + 1;
        (i < Self::LENGTH).then(|| Self::from_usize(i))
    }

    fn prev(self) -> Option<Self> {
        self.into_usize().checked_sub(1).map(Self::from_usize)
    }
}

impl<T: Enum> EnumExt for T {}

pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}

/// Return a `Rect` of the given size centered within `area`.  If `size` is
/// larger than `area` in either dimension, the result is clipped to `area`.
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [rect] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(rect);
    rect
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
    enum Trio {
        One,
        Two,
        Three,
    }

    #[test]
    fn enum_iter() {
        assert_eq!(
            Trio::iter().collect::<Vec<_>>(),
            [Trio::One, Trio::Two, Trio::Three]
        );
    }

    #[rstest]
    #[case(Trio::One, Some(Trio::Two), None)]
    #[case(Trio::Two, Some(Trio::Three), Some(Trio::One))]
    #[case(Trio::Three, None, Some(Trio::Two))]
    fn enum_neighbors(#[case] value: Trio, #[case] next: Option<Trio>, #[case] prev: Option<Trio>) {
        assert_eq!(value.next(), next);
        assert_eq!(value.prev(), prev);
    }

    #[test]
    fn enum_bounds() {
        assert_eq!(Trio::min(), Trio::One);
        assert_eq!(Trio::max(), Trio::Three);
    }

    #[rstest]
    #[case(Rect::new(0, 0, 80, 24), Size::new(78, 20), Rect::new(1, 2, 78, 20))]
    #[case(Rect::new(0, 0, 80, 24), Size::new(80, 24), Rect::new(0, 0, 80, 24))]
    #[case(Rect::new(10, 5, 20, 10), Size::new(10, 4), Rect::new(15, 8, 10, 4))]
    fn test_center_rect(#[case] area: Rect, #[case] size: Size, #[case] expected: Rect) {
        assert_eq!(center_rect(area, size), expected);
    }
}
