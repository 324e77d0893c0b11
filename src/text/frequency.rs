use std::collections::HashMap;

/// Tallies a token sequence into per-token occurrence counts.
pub fn count(tokens: &[String]) -> HashMap<String, u64> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn counts_occurrences() {
        let counts = count(&tokens(&["a", "a", "b"]));
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["a"], 2);
        assert_eq!(counts["b"], 1);
    }

    #[test]
    fn empty_input_yields_empty_map() {
        assert!(count(&[]).is_empty());
    }
}
