//! Natural (numeric-aware) string ordering.
//!
//! Splits strings into runs of digits and non-digits and compares digit runs
//! numerically, so that `"a2"` sorts before `"a10"`.

use std::cmp::Ordering;

/// One token of a string in natural order: either a digit run or a text run.
#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    /// A run of ASCII digits, with leading zeros stripped.
    Number { digits: &'a str },
    /// A run of non-digit characters.
    Text(&'a str),
}

fn tokenize(s: &str) -> Vec<Token<'_>> {
    let bytes = s.as_bytes();
    let mut tokens = Vec::new();
    let mut start = 0;

    while start < bytes.len() {
        let is_digit = bytes[start].is_ascii_digit();
        let mut end = start + 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() == is_digit {
            end += 1;
        }
        let run = &s[start..end];
        if is_digit {
            let digits = run.trim_start_matches('0');
            tokens.push(Token::Number { digits });
        } else {
            tokens.push(Token::Text(run));
        }
        start = end;
    }

    tokens
}

/// Compares two digit runs (leading zeros already stripped) numerically.
///
/// A longer run of digits is a larger number; equal lengths compare
/// lexicographically. Handles digit runs of arbitrary length.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Compares two strings in natural order.
///
/// Digit runs compare numerically, text runs lexicographically. A digit run
/// sorts before a text run at the same position. Ties are broken by plain
/// string comparison so the order is total.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use boreas_pattern::natural_cmp;
///
/// assert_eq!(natural_cmp("a2", "a10"), Ordering::Less);
/// assert_eq!(natural_cmp("a10", "a10"), Ordering::Equal);
/// ```
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let ta = tokenize(a);
    let tb = tokenize(b);

    for (x, y) in ta.iter().zip(tb.iter()) {
        let ord = match (x, y) {
            (Token::Number { digits: da }, Token::Number { digits: db }) => cmp_digits(da, db),
            (Token::Text(sa), Token::Text(sb)) => sa.cmp(sb),
            (Token::Number { .. }, Token::Text(_)) => Ordering::Less,
            (Token::Text(_), Token::Number { .. }) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }

    ta.len().cmp(&tb.len()).then_with(|| a.cmp(b))
}

/// Sorts a slice of strings in natural order, in place.
///
/// # Examples
///
/// ```
/// use boreas_pattern::sort_natural;
///
/// let mut v = vec!["a10".to_string(), "a1".to_string(), "a2".to_string()];
/// sort_natural(&mut v);
/// assert_eq!(v, ["a1", "a2", "a10"]);
/// ```
pub fn sort_natural(items: &mut [String]) {
    items.sort_by(|a, b| natural_cmp(a, b));
}
