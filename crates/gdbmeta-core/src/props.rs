//! Ordered property projection shared by every backend.
//!
//! Each entity (geodatabase, domain, table, feature class) describes itself
//! as a list of fixed, human-readable labels paired with loosely typed
//! values. The label sets and their order are static (see
//! [`crate::mappings`]), so the output shape is identical no matter which
//! backend produced it.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// A single property value.
///
/// The source metadata is a mix of strings, numbers, numeric ranges and code
/// lists; optional fields a writer left out surface as [`PropertyValue::Empty`]
/// rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Free-form text.
    Text(String),
    /// Integer value (row counts and the like).
    Int(i64),
    /// Floating point value.
    Real(f64),
    /// The `(min, max)` pair of a range domain.
    Range(f64, f64),
    /// Ordered name/value pairs (coded values, field lists).
    Pairs(Vec<(String, String)>),
    /// Placeholder for an absent optional field.
    Empty,
}

impl PropertyValue {
    /// Text value, with empty strings collapsing to the placeholder.
    #[must_use]
    pub fn text(s: &str) -> Self {
        if s.is_empty() {
            PropertyValue::Empty
        } else {
            PropertyValue::Text(s.to_string())
        }
    }

    /// Returns `true` when the value is the empty placeholder.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, PropertyValue::Empty)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Text(s) => f.write_str(s),
            PropertyValue::Int(n) => write!(f, "{n}"),
            PropertyValue::Real(x) => write!(f, "{x}"),
            PropertyValue::Range(min, max) => write!(f, "{min} to {max}"),
            PropertyValue::Pairs(pairs) => {
                let mut first = true;
                for (name, value) in pairs {
                    if !first {
                        f.write_str("; ")?;
                    }
                    write!(f, "{name}: {value}")?;
                    first = false;
                }
                Ok(())
            },
            PropertyValue::Empty => Ok(()),
        }
    }
}

impl Serialize for PropertyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PropertyValue::Text(s) => serializer.serialize_str(s),
            PropertyValue::Int(n) => serializer.serialize_i64(*n),
            PropertyValue::Real(x) => serializer.serialize_f64(*x),
            PropertyValue::Range(min, max) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(min)?;
                seq.serialize_element(max)?;
                seq.end()
            },
            PropertyValue::Pairs(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (name, value) in pairs {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            },
            PropertyValue::Empty => serializer.serialize_str(""),
        }
    }
}

/// Insertion-ordered mapping of display label to [`PropertyValue`].
///
/// Labels come from the static tables in [`crate::mappings`]; insertion
/// order is the canonical presentation order, and serialization emits map
/// entries in exactly that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties(Vec<(&'static str, PropertyValue)>);

impl Properties {
    /// New, empty property list.
    #[must_use]
    pub fn new() -> Self {
        Properties(Vec::new())
    }

    /// Append a labeled value.
    pub fn push(&mut self, label: &'static str, value: PropertyValue) {
        self.0.push((label, value));
    }

    /// Look a value up by its label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&PropertyValue> {
        self.0
            .iter()
            .find(|(candidate, _)| *candidate == label)
            .map(|(_, value)| value)
    }

    /// Labels in presentation order.
    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        self.0.iter().map(|(label, _)| *label).collect()
    }

    /// Iterate label/value pairs in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &PropertyValue)> {
        self.0.iter().map(|(label, value)| (*label, value))
    }

    /// Number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no properties were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, value) in &self.0 {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}
