//! Message chunking for platform length limits.
//!
//! Telegram caps messages at 4096 characters and Discord at 2000, so long
//! AI replies are split before sending. Splits prefer line boundaries:
//! searching backward from the limit, a newline in the back half of the
//! window wins; otherwise the text is cut exactly at the limit.

/// Byte offset of the `n`-th character, or `s.len()` past the end.
fn char_offset(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map(|(i, _)| i).unwrap_or(s.len())
}

/// Split `text` into chunks of at most `max_len` characters.
///
/// After a soft split at a newline, the leading whitespace of the
/// remainder (the newline itself plus any indentation) is discarded.
/// No chunk is ever empty. `max_len` must be greater than zero.
pub fn split_message(text: &str, max_len: usize) -> Vec<String> {
    assert!(max_len > 0, "max_len must be positive");

    let mut chunks = Vec::new();
    let mut remaining = text;

    while remaining.chars().count() > max_len {
        let hard_end = char_offset(remaining, max_len);
        // A newline at character position max_len itself still yields a
        // full-length chunk, so the search window covers one extra char.
        let search_end = char_offset(remaining, max_len + 1);

        let split_at = match remaining[..search_end].rfind('\n') {
            // Only soft-split when the line boundary is at or past the
            // halfway point; earlier newlines would waste too much room.
            Some(pos) if remaining[..pos].chars().count() * 2 >= max_len => pos,
            _ => hard_end,
        };

        let is_soft = split_at != hard_end || remaining[split_at..].starts_with('\n');
        chunks.push(remaining[..split_at].to_string());
        remaining = if is_soft {
            remaining[split_at..].trim_start()
        } else {
            &remaining[split_at..]
        };
    }

    if !remaining.is_empty() {
        chunks.push(remaining.to_string());
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunks = split_message("hello", 100);
        assert_eq!(chunks, vec!["hello"]);
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        assert!(split_message("", 10).is_empty());
    }

    #[test]
    fn test_exact_length_not_split() {
        let text = "a".repeat(10);
        assert_eq!(split_message(&text, 10), vec![text]);
    }

    #[test]
    fn test_hard_split_without_newlines() {
        let text = "a".repeat(25);
        let chunks = split_message(&text, 10);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 10);
        assert_eq!(chunks[1].len(), 10);
        assert_eq!(chunks[2].len(), 5);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_soft_split_on_newline() {
        // Newline at position 8 with max_len 10: 8 >= 5, soft split there
        let text = format!("{}\n{}", "a".repeat(8), "b".repeat(8));
        let chunks = split_message(&text, 10);
        assert_eq!(chunks, vec!["a".repeat(8), "b".repeat(8)]);
    }

    #[test]
    fn test_early_newline_forces_hard_split() {
        // Newline at position 2 with max_len 10: 2 < 5, hard split at 10
        let text = format!("ab\n{}", "c".repeat(20));
        let chunks = split_message(&text, 10);
        assert_eq!(chunks[0].chars().count(), 10);
        assert!(chunks.iter().all(|c| c.chars().count() <= 10));
    }

    #[test]
    fn test_soft_split_discards_leading_whitespace() {
        let text = format!("{}\n   indented rest", "a".repeat(9));
        let chunks = split_message(&text, 10);
        assert_eq!(chunks[0], "a".repeat(9));
        assert_eq!(chunks[1], "indented rest");
    }

    #[test]
    fn test_no_empty_chunks_and_bounded() {
        let text = "line one\nline two\nline three\nline four\n".repeat(20);
        for max_len in [1, 2, 5, 9, 40, 1000] {
            let chunks = split_message(&text, max_len);
            assert!(chunks.iter().all(|c| !c.is_empty()), "max_len={}", max_len);
            assert!(
                chunks.iter().all(|c| c.chars().count() <= max_len),
                "max_len={}",
                max_len
            );
        }
    }

    #[test]
    fn test_reconstruction_modulo_soft_split_whitespace() {
        let text = "alpha beta\ngamma delta\nepsilon zeta eta theta";
        let chunks = split_message(text, 12);
        // Removing whitespace entirely from both sides proves no visible
        // content was dropped by the soft splits.
        let original: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let rebuilt: String = chunks
            .concat()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        assert_eq!(original, rebuilt);
    }

    #[test]
    fn test_multibyte_characters_counted_not_bytes() {
        // Each snowflake is multiple bytes but one char
        let text = "❄".repeat(25);
        let chunks = split_message(&text, 10);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.chars().count() <= 10));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_newline_exactly_at_limit() {
        let text = format!("{}\n{}", "a".repeat(10), "b".repeat(3));
        let chunks = split_message(&text, 10);
        assert_eq!(chunks, vec!["a".repeat(10), "b".repeat(3)]);
    }
}
