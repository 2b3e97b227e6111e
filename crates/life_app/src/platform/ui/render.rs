use life_core::pattern_select::{PatternSelectState, FAVORITES_SECTION_TITLE};
use life_core::GameViewModel;

const LIVE: char = '#';
const DEAD: char = '.';

/// Status line followed by one text row per board row. Expects the view's
/// live cells in row-major order.
pub fn render_game(view: &GameViewModel, is_favorite: bool) -> String {
    let mut out = format!(
        "{}{} | gen {} | {} | {} alive | {}\n",
        view.title,
        if is_favorite { " *" } else { "" },
        view.generation,
        view.board_size,
        view.live_count(),
        if view.is_running { "running" } else { "paused" },
    );

    let width = view.board_size.width;
    let mut live = view.live_cells.iter().peekable();
    for y in 0..view.board_size.height as i64 {
        let mut row = vec![DEAD; width];
        while let Some(cell) = live.next_if(|cell| cell.y == y) {
            if let Some(slot) = usize::try_from(cell.x).ok().and_then(|x| row.get_mut(x)) {
                *slot = LIVE;
            }
        }
        out.extend(row);
        out.push('\n');
    }
    out
}

/// Sections with rows numbered from 1 in display order, as `pick` expects.
pub fn render_picker(picker: &PatternSelectState) -> String {
    if picker.status.is_loading() {
        return "loading patterns...\n".to_string();
    }

    let mut out = String::new();
    if !picker.search_text.is_empty() {
        out.push_str(&format!("search: {}\n", picker.search_text));
    }
    let mut number = 0;
    for section in picker.filtered_sections() {
        out.push_str(&format!("[{}]\n", section.title));
        if section.rows.is_empty() && section.title == FAVORITES_SECTION_TITLE {
            out.push_str("  (none)\n");
        }
        for row in section.rows {
            number += 1;
            let star = if row.is_favorite { "*" } else { " " };
            out.push_str(&format!("  {number:>3} {star} {}\n", row.title));
        }
    }
    out
}
