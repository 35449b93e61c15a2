use serde::Deserialize;

use crate::text::syntax_highlighter::HighlightKind;

#[derive(Deserialize, PartialEq, Eq, Clone, Copy, Debug)]
pub enum TerminalColor {
    White,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,

    BrightWhite,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
}

impl TerminalColor {
    pub fn sgr_code(&self) -> u8 {
        match self {
            TerminalColor::Black => 30,
            TerminalColor::Red => 31,
            TerminalColor::Green => 32,
            TerminalColor::Yellow => 33,
            TerminalColor::Blue => 34,
            TerminalColor::Magenta => 35,
            TerminalColor::Cyan => 36,
            TerminalColor::White => 37,

            TerminalColor::BrightBlack => 90,
            TerminalColor::BrightRed => 91,
            TerminalColor::BrightGreen => 92,
            TerminalColor::BrightYellow => 93,
            TerminalColor::BrightBlue => 94,
            TerminalColor::BrightMagenta => 95,
            TerminalColor::BrightCyan => 96,
            TerminalColor::BrightWhite => 97,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(default, deny_unknown_fields)]
pub struct Theme {
    pub normal: Option<TerminalColor>,
    pub comment: TerminalColor,
    pub keyword: TerminalColor,
    pub symbol: TerminalColor,
    pub string: TerminalColor,
    pub meta: TerminalColor,
    pub variable: TerminalColor,
}

impl Theme {
    pub fn highlight_kind_to_color(&self, highlight_kind: HighlightKind) -> Option<TerminalColor> {
        match highlight_kind {
            HighlightKind::Normal => self.normal,
            HighlightKind::Comment => Some(self.comment),
            HighlightKind::Keyword => Some(self.keyword),
            HighlightKind::Symbol => Some(self.symbol),
            HighlightKind::String => Some(self.string),
            HighlightKind::Meta => Some(self.meta),
            HighlightKind::Variable => Some(self.variable),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            normal: None,
            comment: TerminalColor::BrightBlack,
            keyword: TerminalColor::Blue,
            symbol: TerminalColor::Magenta,
            string: TerminalColor::Green,
            meta: TerminalColor::Yellow,
            variable: TerminalColor::Cyan,
        }
    }
}
