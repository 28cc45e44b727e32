//! In-place sort and filter operations on a [`DataSet`].

use super::dataset::DataSet;
use crate::parser::schema::Record;
use crate::utils::error::QueryError;
use log::debug;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Field a data set can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Longest,
    Total,
    Count,
    Shortest,
    /// 1-based path segment, compared as text
    Key(usize),
}

impl FromStr for SortField {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "longest" => Ok(SortField::Longest),
            "total" => Ok(SortField::Total),
            "count" => Ok(SortField::Count),
            "shortest" => Ok(SortField::Shortest),
            other => parse_key_index(other)
                .map(SortField::Key)
                .ok_or_else(|| QueryError::UnknownSortField(other.to_string())),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortField::Longest => write!(f, "longest"),
            SortField::Total => write!(f, "total"),
            SortField::Count => write!(f, "count"),
            SortField::Shortest => write!(f, "shortest"),
            SortField::Key(n) => write!(f, "key{}", n),
        }
    }
}

impl SortField {
    /// Ascending comparison of two records on this field
    fn compare(self, a: &Record, b: &Record) -> Ordering {
        match self {
            SortField::Longest => a.stats.longest.total_cmp(&b.stats.longest),
            SortField::Total => a.stats.total.total_cmp(&b.stats.total),
            SortField::Count => a.stats.count.cmp(&b.stats.count),
            SortField::Shortest => a.stats.shortest.total_cmp(&b.stats.shortest),
            SortField::Key(n) => a.key(n).unwrap_or("").cmp(b.key(n).unwrap_or("")),
        }
    }
}

/// A `keyN` field naming the 1-based path segment to filter on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyField(pub usize);

impl FromStr for KeyField {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key_index(s)
            .map(KeyField)
            .ok_or_else(|| QueryError::InvalidKeyField(s.to_string()))
    }
}

/// Parse `keyN` with N >= 1
///
/// **Private** - shared by SortField and KeyField
fn parse_key_index(s: &str) -> Option<usize> {
    let digits = s.strip_prefix("key")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().filter(|&n| n > 0)
}

/// How a filter value is compared against a path segment
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Whole-segment string equality
    Exact { value: String, case_sensitive: bool },

    /// Unanchored regular expression search, case-sensitive unless the
    /// pattern itself carries `(?i)`
    Pattern(Regex),
}

impl Matcher {
    pub fn exact(value: impl Into<String>, case_sensitive: bool) -> Self {
        Matcher::Exact {
            value: value.into(),
            case_sensitive,
        }
    }

    /// Compile `pattern` as written
    pub fn pattern(pattern: &str) -> Result<Self, QueryError> {
        Ok(Matcher::Pattern(Regex::new(pattern)?))
    }

    /// `/regex/` is a pattern, anything else an exact string
    ///
    /// `case_sensitive` applies to exact strings only. An empty pattern
    /// (`//`) is the literal string `//`.
    pub fn parse(value: &str, case_sensitive: bool) -> Result<Self, QueryError> {
        match value
            .strip_prefix('/')
            .and_then(|rest| rest.strip_suffix('/'))
        {
            Some(pattern) if !pattern.is_empty() => Self::pattern(pattern),
            _ => Ok(Self::exact(value, case_sensitive)),
        }
    }

    pub fn is_match(&self, segment: &str) -> bool {
        match self {
            Matcher::Exact {
                value,
                case_sensitive: true,
            } => segment == value,
            Matcher::Exact {
                value,
                case_sensitive: false,
            } => segment.to_lowercase() == value.to_lowercase(),
            Matcher::Pattern(regex) => regex.is_match(segment),
        }
    }
}

impl DataSet {
    /// Sort by a field name (`longest`, `total`, `count`, `shortest`, `keyN`)
    ///
    /// Largest first unless `reverse` is set. Key fields compare as text.
    ///
    /// # Errors
    /// * `QueryError::UnknownSortField` - Unrecognized field name
    pub fn sort(&mut self, field: &str, reverse: bool) -> Result<(), QueryError> {
        let field: SortField = field.parse()?;
        self.sort_by_field(field, reverse);
        Ok(())
    }

    pub fn sort_by_field(&mut self, field: SortField, reverse: bool) {
        debug!("Sorting {} records by {} (reverse: {})", self.count(), field, reverse);

        self.records_mut().sort_by(|a, b| {
            let ascending = field.compare(a, b);
            if reverse {
                ascending
            } else {
                ascending.reverse()
            }
        });
        self.set_sort_label(field.to_string());
    }

    /// Remove records whose `key` segment matches; returns the remaining count
    ///
    /// Records without that segment are kept.
    pub fn exclude(&mut self, key: &str, matcher: &Matcher) -> Result<usize, QueryError> {
        let KeyField(n) = key.parse()?;
        self.records_mut()
            .retain(|record| !record.key(n).is_some_and(|segment| matcher.is_match(segment)));
        debug!("Exclude on {} left {} records", key, self.count());
        Ok(self.count())
    }

    /// Keep only records whose `key` segment matches; returns the remaining count
    ///
    /// Records without that segment are removed.
    pub fn match_key(&mut self, key: &str, matcher: &Matcher) -> Result<usize, QueryError> {
        let KeyField(n) = key.parse()?;
        self.records_mut()
            .retain(|record| record.key(n).is_some_and(|segment| matcher.is_match(segment)));
        debug!("Match on {} left {} records", key, self.count());
        Ok(self.count())
    }
}
