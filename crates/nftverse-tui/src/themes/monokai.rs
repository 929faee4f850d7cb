//! Monokai theme

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        bg0: Color::Rgb(0x27, 0x28, 0x22), // background
        bg1: Color::Rgb(0x3e, 0x3d, 0x32), // selection
        bg2: Color::Rgb(0x49, 0x48, 0x3e), // line
        fg0: Color::Rgb(0xf8, 0xf8, 0xf2), // foreground
        fg1: Color::Rgb(0xd0, 0xd0, 0xc0),
        grey0: Color::Rgb(0x90, 0x8c, 0x77),
        grey1: Color::Rgb(0x75, 0x71, 0x5e), // comment
        accent: Color::Rgb(0xae, 0x81, 0xff), // purple
        highlight: Color::Rgb(0xf9, 0x26, 0x72), // magenta
        selection: Color::Rgb(0x3e, 0x3d, 0x32),
        price: Color::Rgb(0xa6, 0xe2, 0x2e),
        creator: Color::Rgb(0x66, 0xd9, 0xef),
        error: Color::Rgb(0xf9, 0x26, 0x72),
        success: Color::Rgb(0xa6, 0xe2, 0x2e),
        warning: Color::Rgb(0xfd, 0x97, 0x1f),
        info: Color::Rgb(0x66, 0xd9, 0xef),
    }
}
