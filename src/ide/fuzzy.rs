//! Fuzzy matching for workspace symbol queries.

/// Decides whether a symbol name matches a query.
pub trait FuzzyMatcher: Send + Sync {
    /// `query` is already lowercase.
    fn matches(&self, query: &str, text: &str) -> bool;
}

/// Subsequence match, case-insensitive, anchored at a word start.
///
/// Every query character must occur in `text` in order. The first one must
/// match at the start of `text` or of a word inside it: an upper-case
/// letter after a lower-case one (`fooBar`), or a character after `_`.
/// An empty query matches everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFuzzyMatcher;

impl FuzzyMatcher for DefaultFuzzyMatcher {
    fn matches(&self, query: &str, text: &str) -> bool {
        let mut wanted = query.chars().peekable();
        if wanted.peek().is_none() {
            return true;
        }
        let mut anchored = false;
        let mut previous: Option<char> = None;
        for c in text.chars() {
            let Some(&q) = wanted.peek() else {
                break;
            };
            if same_letter(c, q) {
                anchored = anchored || previous.is_none_or(|p| is_word_transition(p, c));
                if anchored {
                    wanted.next();
                    if wanted.peek().is_none() {
                        return true;
                    }
                }
            }
            previous = Some(c);
        }
        false
    }
}

fn same_letter(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

fn is_word_transition(previous: char, current: char) -> bool {
    (previous.is_lowercase() && current.is_uppercase()) || (previous == '_' && current != '_')
}
