use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate to a display width, CJK-aware: a kanji occupies two cells, so
/// byte- or char-based truncation would overflow the cell budget.
pub fn truncate_display(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(1);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str("...");
    out
}
