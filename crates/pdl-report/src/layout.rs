//! Page geometry and text measurement for the report renderer.
//!
//! Built-in fonts expose no metrics here, so wrapping works on a character
//! budget tuned for Helvetica at body size on an A4 page with 20 mm
//! margins. Oversized words are hard-split rather than overflowing.

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 20.0;
pub const BOTTOM_MARGIN_MM: f32 = 25.0;

pub const TITLE_SIZE_PT: f32 = 20.0;
pub const HEADING_SIZE_PT: f32 = 14.0;
pub const LABEL_SIZE_PT: f32 = 11.0;
pub const BODY_SIZE_PT: f32 = 10.0;

pub const MAX_BODY_CHARS: usize = 95;

pub fn line_height_mm(size_pt: f32) -> f32 {
    // 1 pt = 0.3528 mm, plus leading.
    size_pt * 0.42
}

/// Greedy word wrap. Never returns an empty vector: blank input yields a
/// single empty line so labeled blocks keep their vertical rhythm.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let word = hard_split(word, max_chars, &mut current, &mut lines);
            if current.is_empty() {
                current = word;
            } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
                current.push(' ');
                current.push_str(&word);
            } else {
                lines.push(std::mem::replace(&mut current, word));
            }
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Split a word longer than the budget into full-width chunks, flushing the
/// current line first. Returns the remaining tail (possibly the whole word).
fn hard_split(
    word: &str,
    max_chars: usize,
    current: &mut String,
    lines: &mut Vec<String>,
) -> String {
    if word.chars().count() <= max_chars {
        return word.to_string();
    }
    if !current.is_empty() {
        lines.push(std::mem::take(current));
    }
    let chars: Vec<char> = word.chars().collect();
    let mut start = 0;
    while chars.len() - start > max_chars {
        lines.push(chars[start..start + max_chars].iter().collect());
        start += max_chars;
    }
    chars[start..].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(wrap_text("hello world", 20), vec!["hello world"]);
    }

    #[test]
    fn wraps_at_word_boundaries() {
        let lines = wrap_text("one two three four", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn preserves_paragraph_breaks() {
        let lines = wrap_text("first\nsecond", 20);
        assert_eq!(lines, vec!["first", "second"]);
    }

    #[test]
    fn hard_splits_oversized_words() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn blank_input_yields_one_empty_line() {
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn no_line_exceeds_the_budget() {
        let text = "palavra ".repeat(50) + "supercalifragilisticexpialidocious";
        for line in wrap_text(&text, 12) {
            assert!(line.chars().count() <= 12, "too long: {line}");
        }
    }
}
