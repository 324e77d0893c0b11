/// Turns raw extracted text into a token sequence, order preserved.
///
/// Lowercases, replaces every character outside `a-z` and whitespace with a
/// single space (numerals, punctuation and accented characters are removed,
/// not merely separated), splits on whitespace runs, and drops tokens
/// shorter than `min_len`.
pub fn normalize(text: &str, min_len: usize) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| word.len() >= min_len)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation_and_digits() {
        assert_eq!(normalize("Hello, World! 123", 2), vec!["hello", "world"]);
    }

    #[test]
    fn drops_single_character_tokens() {
        assert_eq!(normalize("a I to", 2), vec!["to"]);
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert_eq!(normalize("", 2), Vec::<String>::new());
        assert_eq!(normalize("   \n\t ", 2), Vec::<String>::new());
    }

    #[test]
    fn accented_characters_split_words() {
        // 'é' and 'ï' fall outside a-z, so they become separators
        assert_eq!(normalize("café naïve", 2), vec!["caf", "na", "ve"]);
    }

    #[test]
    fn order_is_preserved() {
        assert_eq!(normalize("bb aa bb", 2), vec!["bb", "aa", "bb"]);
    }

    #[test]
    fn min_len_is_honored() {
        assert_eq!(normalize("ab abc abcd", 3), vec!["abc", "abcd"]);
    }
}
