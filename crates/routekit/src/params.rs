/// Route parameters: names, values and the ordered mapping between them

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Identifier of a parameter
///
/// Named parameters (`:id`) keep their declared name; anonymous captures
/// (`(\d+)`) are numbered from 0 in order of appearance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamName {
    Named(String),
    Index(usize),
}

impl ParamName {
    /// Whether this name refers to `key` (`"0"` also finds ordinal 0)
    pub fn is(&self, key: &str) -> bool {
        match self {
            ParamName::Named(name) => name == key,
            ParamName::Index(index) => key.parse::<usize>().map_or(false, |k| k == *index),
        }
    }
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamName::Named(name) => f.write_str(name),
            ParamName::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for ParamName {
    fn from(name: &str) -> Self {
        ParamName::Named(name.to_string())
    }
}

impl From<String> for ParamName {
    fn from(name: String) -> Self {
        ParamName::Named(name)
    }
}

impl From<usize> for ParamName {
    fn from(index: usize) -> Self {
        ParamName::Index(index)
    }
}

/// Value of a parameter
///
/// Repeated parameters (`*` / `+`) carry every segment; everything else is a
/// single string.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Single(String),
    Repeated(Vec<String>),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Single(value) => Some(value),
            ParamValue::Repeated(_) => None,
        }
    }

    pub fn as_slice(&self) -> Option<&[String]> {
        match self {
            ParamValue::Single(_) => None,
            ParamValue::Repeated(values) => Some(values),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Single(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Single(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::Repeated(values)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        ParamValue::Repeated(values.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for ParamValue {
    fn from(values: &[&str]) -> Self {
        ParamValue::Repeated(values.iter().map(|v| v.to_string()).collect())
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    ParamValue::Single(value.to_string())
                }
            }
        )*
    };
}

impl_from_number!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// Ordered mapping from parameter name to value
///
/// Keeps insertion order, which for matched paths is the order the
/// parameters appear in the pattern. Inserting an existing name replaces
/// its value in place.
///
/// # Examples
///
/// ```
/// use routekit::{Params, ParamValue};
///
/// let params = Params::new()
///     .with("id", "42")
///     .with("tags", vec!["a", "b"]);
///
/// assert_eq!(params.get_str("id"), Some("42"));
/// assert_eq!(params.get("tags"), Some(&ParamValue::from(vec!["a", "b"])));
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(ParamName, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a value (functional builder)
    pub fn with(mut self, name: impl Into<ParamName>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<ParamName>, value: impl Into<ParamValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Looks up a value by name (or by ordinal written as a number)
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(name, _)| name.is(key))
            .map(|(_, value)| value)
    }

    /// Looks up a value by exact parameter name
    pub fn get_by_name(&self, name: &ParamName) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Single-valued lookup
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ParamValue::as_str)
    }

    /// Repeated-valued lookup
    pub fn get_all(&self, key: &str) -> Option<&[String]> {
        self.get(key).and_then(ParamValue::as_slice)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParamName, &ParamValue)> {
        self.entries.iter().map(|(name, value)| (name, value))
    }
}

impl<N, V> FromIterator<(N, V)> for Params
where
    N: Into<ParamName>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(&name.to_string(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut params = Params::new();
        params.insert("a", "1");
        params.insert("b", "2");
        params.insert("a", "3");

        let names: Vec<String> = params.iter().map(|(n, _)| n.to_string()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(params.get_str("a"), Some("3"));
    }

    #[test]
    fn test_ordinal_lookup() {
        let params = Params::new().with(0usize, "x");
        assert_eq!(params.get_str("0"), Some("x"));
        assert!(params.get("1").is_none());
        assert!(params.get_by_name(&ParamName::Index(0)).is_some());
    }

    #[test]
    fn test_named_and_ordinal_are_distinct() {
        let params = Params::new().with("0", "named");
        assert!(params.get_by_name(&ParamName::Index(0)).is_none());
        assert_eq!(params.get_str("0"), Some("named"));
    }

    #[test]
    fn test_numbers_become_strings() {
        let params = Params::new().with("page", 7u32);
        assert_eq!(params.get_str("page"), Some("7"));
    }

    #[test]
    fn test_serialize_as_map() {
        let params = Params::new().with("id", "1").with("rest", vec!["a", "b"]);
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"id":"1","rest":["a","b"]}"#);
    }
}
