use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single run-input parameter value.
///
/// Run-input decoding yields a flat, keyed mapping of heterogeneous scalars;
/// the variants here cover every scalar shape the engine boundary produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Real(f64),
    Text(String),
}

impl ParamValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Self::Real(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// The full parameter mapping read from a run-input resource.
///
/// Every read through a [`crate::io::input::RunInputFile`] acquisition
/// produces a fresh, independent `ParameterSet`; the set is a snapshot, not a
/// live view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    values: HashMap<String, ParamValue>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(ParamValue::as_bool)
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(ParamValue::as_int)
    }

    pub fn get_real(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(ParamValue::as_real)
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ParamValue::as_text)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.values.iter()
    }
}

impl FromIterator<(String, ParamValue)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_accessors_match_inserted_variants() {
        let mut params = ParameterSet::new();
        params.insert("init-step", 0i64);
        params.insert("dt", 0.002);
        params.insert("integrator", "md");
        params.insert("continuation", false);

        assert_eq!(params.get_int("init-step"), Some(0));
        assert_eq!(params.get_real("dt"), Some(0.002));
        assert_eq!(params.get_text("integrator"), Some("md"));
        assert_eq!(params.get_bool("continuation"), Some(false));
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn typed_accessors_reject_mismatched_variants() {
        let mut params = ParameterSet::new();
        params.insert("init-step", 0i64);

        assert_eq!(params.get_real("init-step"), None);
        assert_eq!(params.get_text("init-step"), None);
        assert_eq!(params.get_int("nsteps"), None);
    }
}
