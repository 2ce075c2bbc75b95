//! Query values for file discovery and table sub-selection.

use std::fmt;

use boreas_pattern::{Bindings, WILDCARD};

/// Constraint on one pattern key.
///
/// A tagged variant is used instead of overloading the `"*"` string so that a
/// legitimate data value equal to `"*"` cannot collide with "match anything".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// Match any value.
    Wildcard,
    /// Match this exact value.
    Exact(String),
    /// Match any of these values.
    OneOf(Vec<String>),
}

impl QueryValue {
    /// Returns true if `value` satisfies this constraint.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            QueryValue::Wildcard => true,
            QueryValue::Exact(v) => v == value,
            QueryValue::OneOf(vs) => vs.iter().any(|v| v == value),
        }
    }

    /// The alternative values this constraint expands to in a glob search.
    fn alternatives(&self) -> Vec<String> {
        match self {
            QueryValue::Wildcard => vec![WILDCARD.to_string()],
            QueryValue::Exact(v) => vec![v.clone()],
            QueryValue::OneOf(vs) => vs.clone(),
        }
    }
}

/// An ordered set of key constraints.
///
/// Keys not present in a query are unconstrained; what "unconstrained" means
/// depends on the operation ([`FileFinder::find_files`] defaults them to
/// wildcard, [`ResultTable::search`] ignores them).
///
/// [`FileFinder::find_files`]: crate::FileFinder::find_files
/// [`ResultTable::search`]: crate::ResultTable::search
///
/// # Example
///
/// ```
/// use boreas_finder::Query;
///
/// let query = Query::new()
///     .exact("varn", "tas")
///     .one_of("exp", ["ssp126", "ssp585"]);
///
/// assert_eq!(query.keys().collect::<Vec<_>>(), ["varn", "exp"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    entries: Vec<(String, QueryValue)>,
}

impl Query {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a constraint, replacing any previous constraint on the same key.
    pub fn set(mut self, key: &str, value: QueryValue) -> Self {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key.to_string(), value));
        }
        self
    }

    /// Constrains `key` to exactly `value`.
    pub fn exact(self, key: &str, value: &str) -> Self {
        self.set(key, QueryValue::Exact(value.to_string()))
    }

    /// Constrains `key` to any of `values`.
    pub fn one_of<I, S>(self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        self.set(key, QueryValue::OneOf(values))
    }

    /// Explicitly marks `key` as match-anything.
    pub fn wildcard(self, key: &str) -> Self {
        self.set(key, QueryValue::Wildcard)
    }

    /// Returns the constraint on `key`, if any.
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns the constrained keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Returns the (key, constraint) entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns true if no key is constrained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Expands this query into the cartesian product of fully bound search
    /// dicts over `all_keys`.
    ///
    /// Every key of `all_keys` is bound in every combination; keys without a
    /// constraint (and explicit wildcards) are bound to `"*"`. Constrained
    /// keys not in `all_keys` are ignored (the caller reports them). An
    /// empty `OneOf` list produces zero combinations.
    pub(crate) fn combinations(&self, all_keys: &[String]) -> Vec<Bindings> {
        let constrained: Vec<(&str, Vec<String>)> = self
            .entries
            .iter()
            .filter(|(k, _)| all_keys.contains(k))
            .map(|(k, v)| (k.as_str(), v.alternatives()))
            .collect();

        let mut combos = vec![Bindings::new()];
        for (key, alternatives) in &constrained {
            let mut next = Vec::with_capacity(combos.len() * alternatives.len());
            for combo in &combos {
                for alt in alternatives {
                    let mut c = combo.clone();
                    c.insert(key.to_string(), alt.clone());
                    next.push(c);
                }
            }
            combos = next;
        }

        for combo in &mut combos {
            for key in all_keys {
                combo
                    .entry(key.clone())
                    .or_insert_with(|| WILDCARD.to_string());
            }
        }

        combos
    }
}

/// Renders the query as `key=value, key=v1|v2, key=*`; an empty query
/// renders as `*`. Used when reporting which query produced an error.
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return f.write_str(WILDCARD);
        }
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match value {
                QueryValue::Wildcard => write!(f, "{key}={WILDCARD}")?,
                QueryValue::Exact(v) => write!(f, "{key}={v}")?,
                QueryValue::OneOf(vs) => write!(f, "{key}={}", vs.join("|"))?,
            }
        }
        Ok(())
    }
}
