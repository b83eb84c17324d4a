//! Message wrapping and output-panel scroll state.

use crate::core::text::char_width;

/// Wraps one physical line into width-bounded chunks.
///
/// Chunk boundaries never split inside a code point. A single code point
/// wider than `max_width` is forcibly emitted alone so wrapping always
/// terminates.
fn split_by_width(line: &str, max_width: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut rest: Vec<char> = line.chars().collect();

    loop {
        let total: usize = rest.iter().map(|&c| char_width(c)).sum();
        if total <= max_width {
            break;
        }
        let mut take = 0;
        let mut width = 0;
        for &ch in &rest {
            let w = char_width(ch);
            if width + w > max_width {
                break;
            }
            width += w;
            take += 1;
        }
        if take == 0 {
            // Oversized single code point; emit it anyway.
            take = 1;
        }
        chunks.push(rest[..take].iter().collect());
        rest.drain(..take);
    }

    if !rest.is_empty() {
        chunks.push(rest.into_iter().collect());
    }
    chunks
}

/// Flattens the message sequence into display lines for the output panel.
///
/// Each message is split on embedded newlines, every physical line is
/// wrapped to `content_width`, and a blank separator line follows each
/// message except the last.
pub fn wrap_messages(messages: &[String], content_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for message in messages {
        for physical in message.split('\n') {
            lines.extend(split_by_width(physical, content_width));
        }
        lines.push(String::new());
    }
    if lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

/// Scroll offset over the wrapped display lines, in lines from the top.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryScroll {
    offset: usize,
}

impl HistoryScroll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn max_scroll(total_lines: usize, visible_lines: usize) -> usize {
        total_lines.saturating_sub(visible_lines)
    }

    /// Re-clamps the offset after any content or size change.
    pub fn clamp(&mut self, total_lines: usize, visible_lines: usize) {
        self.offset = self.offset.min(Self::max_scroll(total_lines, visible_lines));
    }

    pub fn line_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn line_down(&mut self, total_lines: usize, visible_lines: usize) {
        self.offset = (self.offset + 1).min(Self::max_scroll(total_lines, visible_lines));
    }

    pub fn page_up(&mut self, page_size: usize) {
        self.offset = self.offset.saturating_sub(page_size);
    }

    pub fn page_down(&mut self, page_size: usize, total_lines: usize, visible_lines: usize) {
        self.offset = (self.offset + page_size).min(Self::max_scroll(total_lines, visible_lines));
    }

    /// Auto-scroll used when a new message is submitted.
    pub fn jump_to_bottom(&mut self, total_lines: usize, visible_lines: usize) {
        self.offset = Self::max_scroll(total_lines, visible_lines);
    }
}

#[cfg(test)]
mod tests {
    use super::{wrap_messages, HistoryScroll};
    use crate::core::text::display_width;

    fn msgs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn short_messages_pass_through_with_separators() {
        let lines = wrap_messages(&msgs(&["one", "two"]), 20);
        assert_eq!(lines, vec!["one", "", "two"]);
    }

    #[test]
    fn no_trailing_separator_after_last_message() {
        let lines = wrap_messages(&msgs(&["only"]), 20);
        assert_eq!(lines, vec!["only"]);
    }

    #[test]
    fn embedded_newlines_become_separate_lines() {
        let lines = wrap_messages(&msgs(&["a\nb"]), 20);
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn long_lines_wrap_at_rendered_width() {
        let lines = wrap_messages(&msgs(&["abcdefgh"]), 3);
        assert_eq!(lines, vec!["abc", "def", "gh"]);
    }

    #[test]
    fn double_width_code_points_wrap_earlier() {
        // Each ideograph is two columns, so only two fit in five.
        let lines = wrap_messages(&msgs(&["日本語"]), 5);
        assert_eq!(lines, vec!["日本", "語"]);
    }

    #[test]
    fn oversized_single_code_point_is_forced_out() {
        let lines = wrap_messages(&msgs(&["日"]), 1);
        assert_eq!(lines, vec!["日"]);
    }

    #[test]
    fn no_line_exceeds_content_width() {
        let input = msgs(&["Привет мир", "日本語のテキスト", "plain ascii text here"]);
        for width in 1..=12 {
            for line in wrap_messages(&input, width) {
                let w = display_width(&line);
                assert!(
                    w <= width || line.chars().count() == 1,
                    "line {line:?} width {w} exceeds {width}"
                );
            }
        }
    }

    #[test]
    fn wrapping_is_idempotent_at_the_same_width() {
        let input = msgs(&["Привет мир, это длинная строка", "short"]);
        let once = wrap_messages(&input, 7);
        let twice = wrap_messages(&once, 7);
        // Re-wrapping inserts separators between lines, so compare the
        // chunk content only.
        let flat: Vec<&String> = twice.iter().filter(|l| !l.is_empty()).collect();
        let original: Vec<&String> = once.iter().filter(|l| !l.is_empty()).collect();
        assert_eq!(flat, original);
    }

    #[test]
    fn scroll_stays_clamped_through_operations() {
        let mut scroll = HistoryScroll::new();
        scroll.jump_to_bottom(50, 10);
        assert_eq!(scroll.offset(), 40);

        scroll.page_down(9, 50, 10);
        assert_eq!(scroll.offset(), 40, "page down clamps at max scroll");

        scroll.page_up(100);
        assert_eq!(scroll.offset(), 0);

        scroll.line_up();
        assert_eq!(scroll.offset(), 0);

        scroll.line_down(5, 10);
        assert_eq!(scroll.offset(), 0, "nothing to scroll when all visible");
    }

    #[test]
    fn clamp_pulls_offset_back_after_shrink() {
        let mut scroll = HistoryScroll::new();
        scroll.jump_to_bottom(100, 10);
        assert_eq!(scroll.offset(), 90);
        // Content shrank (or the panel grew): offset must follow.
        scroll.clamp(20, 10);
        assert_eq!(scroll.offset(), 10);
    }

    #[test]
    fn page_down_advances_by_page_size() {
        let mut scroll = HistoryScroll::new();
        scroll.page_down(9, 50, 10);
        assert_eq!(scroll.offset(), 9);
        scroll.page_down(9, 50, 10);
        assert_eq!(scroll.offset(), 18);
    }
}
