//! One Dark theme (Atom)

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x2c, 0x34), // bg
        bg1: Color::Rgb(0x21, 0x25, 0x2b), // bg-darker
        bg2: Color::Rgb(0x3e, 0x44, 0x51), // bg-highlight
        fg0: Color::Rgb(0xab, 0xb2, 0xbf), // fg
        fg1: Color::Rgb(0x9d, 0xa5, 0xb4),
        grey0: Color::Rgb(0x7f, 0x84, 0x8e),
        grey1: Color::Rgb(0x4b, 0x52, 0x63), // gutter
        accent: Color::Rgb(0xc6, 0x78, 0xdd), // purple
        highlight: Color::Rgb(0xe0, 0x6c, 0x75), // red
        selection: Color::Rgb(0x3e, 0x44, 0x51),
        price: Color::Rgb(0x98, 0xc3, 0x79),
        creator: Color::Rgb(0x61, 0xaf, 0xef),
        error: Color::Rgb(0xe0, 0x6c, 0x75),
        success: Color::Rgb(0x98, 0xc3, 0x79),
        warning: Color::Rgb(0xd1, 0x9a, 0x66),
        info: Color::Rgb(0x61, 0xaf, 0xef),
    }
}
