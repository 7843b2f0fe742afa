/// Edit-distance matching of query terms against indexed tokens.
///
/// A term matches a token when the token contains it, or when the term is
/// within the allowed number of edits of the token or of the token's prefix
/// of the same length (so `firefx` still finds `firefox`, and `chrme`
/// finds `chrome`).
pub struct FuzzyMatcher;

impl FuzzyMatcher {
    /// Allowed edits for a term of `term_len` characters
    pub fn max_edits(term_len: usize) -> usize {
        match term_len {
            0..=3 => 0,
            4..=7 => 1,
            _ => 2,
        }
    }

    /// Distance between `term` and the closest reading of `token`, if it is
    /// within the allowed edits. Containment is distance 0.
    pub fn term_distance(term: &str, token: &str) -> Option<usize> {
        if token.contains(term) {
            return Some(0);
        }

        let term_chars: Vec<char> = term.chars().collect();
        let max = Self::max_edits(term_chars.len());
        if max == 0 {
            return None;
        }

        let token_chars: Vec<char> = token.chars().collect();
        let whole = bounded_levenshtein(&term_chars, &token_chars, max);

        let prefix = if token_chars.len() > term_chars.len() {
            bounded_levenshtein(&term_chars, &token_chars[..term_chars.len()], max)
        } else {
            None
        };

        match (whole, prefix) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Best distance of `term` against any of `tokens`
    pub fn best_distance<'a>(term: &str, tokens: impl IntoIterator<Item = &'a str>) -> Option<usize> {
        tokens
            .into_iter()
            .filter_map(|token| Self::term_distance(term, token))
            .min()
    }
}

/// Splits text into lower-case alphanumeric tokens
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

/// Levenshtein distance, giving up once it must exceed `max`
fn bounded_levenshtein(a: &[char], b: &[char], max: usize) -> Option<usize> {
    if a.len().abs_diff(b.len()) > max {
        return None;
    }
    if a.is_empty() || b.is_empty() {
        let distance = a.len().max(b.len());
        return (distance <= max).then_some(distance);
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        let mut row_min = current[0];

        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            let insertion = current[j] + 1;
            let deletion = previous[j + 1] + 1;
            current[j + 1] = substitution.min(insertion).min(deletion);
            row_min = row_min.min(current[j + 1]);
        }

        if row_min > max {
            return None;
        }
        std::mem::swap(&mut previous, &mut current);
    }

    let distance = previous[b.len()];
    (distance <= max).then_some(distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_bounded_levenshtein_exact() {
        assert_eq!(bounded_levenshtein(&chars("kitten"), &chars("sitting"), 3), Some(3));
        assert_eq!(bounded_levenshtein(&chars("kitten"), &chars("sitting"), 2), None);
        assert_eq!(bounded_levenshtein(&chars("same"), &chars("same"), 0), Some(0));
    }

    #[test]
    fn test_bounded_levenshtein_length_gap() {
        assert_eq!(bounded_levenshtein(&chars("ab"), &chars("abcdef"), 2), None);
        assert_eq!(bounded_levenshtein(&chars(""), &chars("ab"), 2), Some(2));
    }

    #[test]
    fn test_max_edits_scale_with_length() {
        assert_eq!(FuzzyMatcher::max_edits(3), 0);
        assert_eq!(FuzzyMatcher::max_edits(5), 1);
        assert_eq!(FuzzyMatcher::max_edits(12), 2);
    }

    #[test]
    fn test_term_distance_containment() {
        assert_eq!(FuzzyMatcher::term_distance("fox", "firefox"), Some(0));
    }

    #[test]
    fn test_term_distance_typo() {
        assert_eq!(FuzzyMatcher::term_distance("chrme", "chrome"), Some(1));
        assert_eq!(FuzzyMatcher::term_distance("firefx", "firefox"), Some(1));
        // a transposition costs two edits, more than a 7-char term allows
        assert_eq!(FuzzyMatcher::term_distance("fierfox", "firefox"), None);
    }

    #[test]
    fn test_term_distance_prefix_typo() {
        // "firef" is a prefix; "fireg" is one edit from that prefix
        assert_eq!(FuzzyMatcher::term_distance("fireg", "firefox"), Some(1));
    }

    #[test]
    fn test_short_terms_need_exact_containment() {
        assert_eq!(FuzzyMatcher::term_distance("vlc", "vlc"), Some(0));
        assert_eq!(FuzzyMatcher::term_distance("vlx", "vlc"), None);
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("Notepad++ (64-bit) v8.6"),
            vec!["notepad", "64", "bit", "v8", "6"]
        );
        assert!(tokenize("  ").is_empty());
    }

    #[test]
    fn test_best_distance() {
        let tokens = ["mozilla", "firefox", "browser"];
        assert_eq!(FuzzyMatcher::best_distance("browsr", tokens), Some(1));
        assert_eq!(FuzzyMatcher::best_distance("editor", tokens), None);
    }
}
