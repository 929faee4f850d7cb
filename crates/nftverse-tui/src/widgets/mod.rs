mod landing;
mod marketplace;
mod popup;
mod status_bar;

pub use landing::LandingWidget;
pub use marketplace::MarketplaceWidget;
pub use popup::PopupWidget;
pub use status_bar::StatusBarWidget;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::theme::Theme;

/// Terminal rows per CSS pixel of entrance offset
const ROWS_PER_PX: f64 = 1.0 / 20.0;

/// Fade every cell of `area` toward the background
pub(crate) fn fade_area(buf: &mut Buffer, area: Rect, theme: &Theme, opacity: f64) {
    if opacity >= 1.0 {
        return;
    }
    let area = area.intersection(buf.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.fg = theme.fade(cell.fg, opacity);
            }
        }
    }
}

/// Copy an offscreen section into `dst`, placing its top row at document row
/// `top` (relative to `clip.y`). Rows outside `clip` are dropped.
pub(crate) fn blit(src: &Buffer, dst: &mut Buffer, clip: Rect, x: u16, top: i32) {
    for row in 0..src.area.height {
        let y = top + i32::from(row);
        if y < 0 || y >= i32::from(clip.height) {
            continue;
        }
        let dst_y = clip.y + y as u16;
        for col in 0..src.area.width {
            let dst_x = x + col;
            if dst_x >= clip.right() {
                break;
            }
            if let (Some(cell), Some(target)) = (src.cell((col, row)), dst.cell_mut((dst_x, dst_y))) {
                *target = cell.clone();
            }
        }
    }
}

/// Entrance offset in terminal rows
pub(crate) fn offset_rows(offset_px: f64) -> i32 {
    (offset_px * ROWS_PER_PX).round() as i32
}

/// Truncate a string to max length with ellipsis
pub(crate) fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}
