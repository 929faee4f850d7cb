//! PureNFT house theme: deep navy with a violet and pink gradient

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        bg0: Color::Rgb(0x0b, 0x0d, 0x1a),
        bg1: Color::Rgb(0x13, 0x16, 0x2b),
        bg2: Color::Rgb(0x1f, 0x23, 0x40),
        fg0: Color::Rgb(0xf4, 0xf4, 0xfb),
        fg1: Color::Rgb(0xd6, 0xd7, 0xe8),
        grey0: Color::Rgb(0x8b, 0x8f, 0xb0),
        grey1: Color::Rgb(0x4a, 0x4e, 0x70),
        accent: Color::Rgb(0x9b, 0x87, 0xf5), // primary
        highlight: Color::Rgb(0xf4, 0x72, 0xb6), // pink-400
        selection: Color::Rgb(0x2a, 0x25, 0x52),
        price: Color::Rgb(0xc0, 0x84, 0xfc),
        creator: Color::Rgb(0x8b, 0x8f, 0xb0),
        error: Color::Rgb(0xef, 0x44, 0x44),
        success: Color::Rgb(0x4a, 0xde, 0x80),
        warning: Color::Rgb(0xfb, 0xbf, 0x24),
        info: Color::Rgb(0x60, 0xa5, 0xfa),
    }
}
