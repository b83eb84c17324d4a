//! Column-width helpers shared by wrapping and rendering.

use unicode_width::UnicodeWidthChar;

/// Rendered column width of a single code point.
///
/// Control characters and other zero-width code points count as 0, which
/// matches how the terminal advances the cursor when they are painted.
pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

/// Rendered column width of a string.
pub fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Truncates `text` so its rendered width does not exceed `max_width`,
/// never splitting inside a code point.
pub fn clip_to_width(text: &str, max_width: usize) -> &str {
    let mut width = 0;
    for (idx, ch) in text.char_indices() {
        let next = width + char_width(ch);
        if next > max_width {
            return &text[..idx];
        }
        width = next;
    }
    text
}

/// Rendered column width of a string that may contain SGR color codes
/// (`ESC [ ... m`), which occupy no columns.
pub fn visible_width(text: &str) -> usize {
    let mut width = 0;
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            if chars.peek() == Some(&'[') {
                chars.next();
                for code in chars.by_ref() {
                    if code == 'm' {
                        break;
                    }
                }
            }
            continue;
        }
        width += char_width(ch);
    }
    width
}

/// Truncates `text` so its visible width does not exceed `max_width`,
/// copying SGR color codes through untouched. Escape sequences after the
/// cut point are dropped, so a clipped result may end inside a colored
/// segment.
pub fn clip_visible_to_width(text: &str, max_width: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut width = 0;
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            out.push(ch);
            if chars.peek() == Some(&'[') {
                out.push('[');
                chars.next();
                for code in chars.by_ref() {
                    out.push(code);
                    if code == 'm' {
                        break;
                    }
                }
            }
            continue;
        }
        let w = char_width(ch);
        if width + w > max_width {
            break;
        }
        width += w;
        out.push(ch);
    }
    out
}

/// Pads `text` with trailing spaces up to `width` rendered columns.
/// Text already at or past `width` is returned unchanged.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let current = display_width(text);
    if current >= width {
        return text.to_string();
    }
    let mut padded = String::with_capacity(text.len() + (width - current));
    padded.push_str(text);
    for _ in current..width {
        padded.push(' ');
    }
    padded
}
