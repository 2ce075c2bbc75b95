//! `{key}` template compilation: formatting and inverse matching.

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;

use crate::error::PatternError;

/// Wildcard value used when expanding queries into glob strings.
///
/// A binding value of `"*"` is legal when building a search pattern (it stays
/// a literal `*` in the formatted string) but must not be used to create a
/// real path on disk.
pub const WILDCARD: &str = "*";

/// A mapping from placeholder name to string value.
pub type Bindings = BTreeMap<String, String>;

/// One piece of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Literal text, matched verbatim.
    Literal(String),
    /// A `{key}` placeholder.
    Key(String),
}

/// A compiled `{key}` template.
///
/// Placeholder names match `[A-Za-z0-9_]+`. Formatting is a pure string
/// substitution; parsing is its left inverse. Placeholders match non-empty
/// runs that do not contain the path separator, non-greedily. Templates
/// whose parse is ambiguous (e.g. `{a}{b}` with no separating literal) are
/// not disambiguated; the parser picks the shortest match for each
/// placeholder in order.
#[derive(Debug, Clone)]
pub struct Template {
    pattern: String,
    segments: Vec<Segment>,
    keys: Vec<String>,
    matcher: Regex,
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn split_segments(pattern: &str) -> Result<Vec<Segment>, PatternError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        if c != '{' {
            literal.push(c);
            continue;
        }

        let mut key = String::new();
        let mut closed = false;
        for k in chars.by_ref() {
            if k == '}' {
                closed = true;
                break;
            }
            key.push(k);
        }

        if !closed {
            return Err(PatternError::UnclosedBrace {
                pattern: pattern.to_string(),
            });
        }
        if key.is_empty() {
            return Err(PatternError::EmptyKey {
                pattern: pattern.to_string(),
            });
        }
        if !is_valid_key(&key) {
            return Err(PatternError::InvalidKey { key });
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(std::mem::take(&mut literal)));
        }
        segments.push(Segment::Key(key));
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    Ok(segments)
}

fn build_matcher(pattern: &str, segments: &[Segment]) -> Result<Regex, PatternError> {
    let mut re = String::from("^");
    for segment in segments {
        match segment {
            Segment::Literal(lit) => re.push_str(&regex::escape(lit)),
            // Non-empty, non-greedy, never crosses a path separator.
            Segment::Key(_) => re.push_str("([^/]+?)"),
        }
    }
    re.push('$');

    Regex::new(&re).map_err(|e| PatternError::Compile {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

impl Template {
    /// Compiles a template.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::UnclosedBrace`], [`PatternError::EmptyKey`] or
    /// [`PatternError::InvalidKey`] for malformed placeholders.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let segments = split_segments(pattern)?;
        let matcher = build_matcher(pattern, &segments)?;

        let mut keys = Vec::new();
        for segment in &segments {
            if let Segment::Key(key) = segment {
                if !keys.contains(key) {
                    keys.push(key.clone());
                }
            }
        }

        Ok(Self {
            pattern: pattern.to_string(),
            segments,
            keys,
            matcher,
        })
    }

    /// Compiles a path template, normalized to end with exactly one `/`.
    ///
    /// The trailing separator makes path vs. file concatenation unambiguous.
    pub fn new_path(pattern: &str) -> Result<Self, PatternError> {
        let normalized = format!("{}/", pattern.trim_end_matches('/'));
        Self::new(&normalized)
    }

    /// Returns the original (normalized) pattern string.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the placeholder names, deduplicated, in first-appearance order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Instantiates the template with the given bindings.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::MissingKey`] if a referenced key is absent.
    pub fn format(&self, bindings: &Bindings) -> Result<String, PatternError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(lit) => out.push_str(lit),
                Segment::Key(key) => {
                    let value = bindings.get(key).ok_or_else(|| PatternError::MissingKey {
                        key: key.clone(),
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }

    /// Parses a concrete string back into bindings.
    ///
    /// Returns `None` if the string does not match the template, or if a
    /// repeated placeholder matches two different values.
    pub fn parse(&self, s: &str) -> Option<Bindings> {
        let captures = self.matcher.captures(s)?;

        let mut bindings = Bindings::new();
        let mut group = 1;
        for segment in &self.segments {
            if let Segment::Key(key) = segment {
                let value = captures.get(group)?.as_str();
                group += 1;

                match bindings.get(key) {
                    Some(prev) if prev != value => return None,
                    Some(_) => {}
                    None => {
                        bindings.insert(key.clone(), value.to_string());
                    }
                }
            }
        }

        Some(bindings)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}
