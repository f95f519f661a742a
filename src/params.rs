//! Parameter mappings handed to the solver.
//!
//! A [`ParamMap`] is an insertion-ordered set of unique name/value pairs,
//! where each value is either [`Value::Bound`] with a concrete number or
//! [`Value::Unknown`] marking the parameter to solve for. The unknown is an
//! explicit tagged variant rather than a sentinel number, so scanning for it
//! is a type-level match and "two unknowns" is a detectable condition instead
//! of silent first-match behavior.

/// The value slot of one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// A concrete, finite value
    Bound(f64),
    /// The parameter to solve for
    Unknown,
}

impl Value {
    /// Whether this slot is the unknown marker.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Bound(v)
    }
}

/// An insertion-ordered mapping of parameter names to values.
///
/// Names are unique: re-binding an existing name replaces its value in place,
/// keeping the original position. The solver never mutates a caller's map;
/// during iteration it substitutes the current estimate into a fresh binding
/// set built per call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamMap {
    entries: Vec<(String, Value)>,
}

impl ParamMap {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a parameter to a concrete value.
    pub fn bind(mut self, name: impl Into<String>, value: f64) -> Self {
        self.set(name.into(), value.into());
        self
    }

    /// Mark a parameter as the unknown to solve for.
    pub fn mark_unknown(mut self, name: impl Into<String>) -> Self {
        self.set(name.into(), Value::Unknown);
        self
    }

    /// Insert or replace an entry, preserving insertion order.
    pub fn set(&mut self, name: String, value: Value) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Look up a parameter by name.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for ParamMap {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut map = ParamMap::new();
        for (name, value) in iter {
            map.set(name, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_and_get() {
        let map = ParamMap::new().bind("H", 11000.0).mark_unknown("Ps");
        assert_eq!(map.get("H"), Some(Value::Bound(11000.0)));
        assert_eq!(map.get("Ps"), Some(Value::Unknown));
        assert_eq!(map.get("Ts"), None);
    }

    #[test]
    fn test_rebind_replaces_in_place() {
        let map = ParamMap::new()
            .bind("a", 1.0)
            .bind("b", 2.0)
            .bind("a", 3.0);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(Value::Bound(3.0)));
        // Insertion order preserved after replacement
        let names: Vec<&str> = map.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_collects_from_pairs() {
        let map: ParamMap = [
            ("H".to_string(), Value::from(11_000.0)),
            ("Ps".to_string(), Value::Unknown),
        ]
        .into_iter()
        .collect();
        assert_eq!(map.get("H"), Some(Value::Bound(11_000.0)));
        assert!(map.get("Ps").is_some_and(|v| v.is_unknown()));
    }

    #[test]
    fn test_unknown_marker_replaces_bound() {
        let map = ParamMap::new().bind("M0", 0.84).mark_unknown("M0");
        assert!(map.get("M0").is_some_and(|v| v.is_unknown()));
        assert_eq!(map.len(), 1);
    }
}
