//! Node identifiers and attribute values carried by the graph store.

use std::{cmp::Ordering, fmt};

/// Identifier of a node in a [`crate::Graph`].
///
/// Persisted graphs may label nodes with arbitrary strings. Labels that parse
/// as integers are normalised to [`NodeId::Int`] so generated and reloaded
/// graphs agree on identity; everything else is kept verbatim.
///
/// Integers order before labels, integers numerically and labels
/// lexicographically.
///
/// # Examples
/// ```
/// use erdos_core::NodeId;
///
/// assert_eq!(NodeId::parse("42"), NodeId::Int(42));
/// assert_eq!(NodeId::parse("hub"), NodeId::from("hub"));
/// assert!(NodeId::Int(7) < NodeId::from("a"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeId {
    /// Numeric identifier.
    Int(i64),
    /// Non-numeric label.
    Label(String),
}

impl NodeId {
    /// Parses a raw label, normalising integer-like labels to [`NodeId::Int`].
    ///
    /// Surrounding whitespace is not trimmed; `" 1"` stays a label.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        raw.parse::<i64>()
            .map_or_else(|_| Self::Label(raw.to_owned()), Self::Int)
    }

    /// Returns the integer value when the identifier is numeric.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Label(_) => None,
        }
    }
}

impl Ord for NodeId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Int(left), Self::Int(right)) => left.cmp(right),
            (Self::Int(_), Self::Label(_)) => Ordering::Less,
            (Self::Label(_), Self::Int(_)) => Ordering::Greater,
            (Self::Label(left), Self::Label(right)) => left.cmp(right),
        }
    }
}

impl PartialOrd for NodeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Label(label) => f.write_str(label),
        }
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<usize> for NodeId {
    fn from(value: usize) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Label(value.to_string()), Self::Int)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::Label(value.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self::Label(value)
    }
}

/// Value stored in a node's attribute map.
///
/// # Examples
/// ```
/// use erdos_core::AttributeValue;
///
/// assert_eq!(AttributeValue::Int(3).to_string(), "3");
/// assert_eq!(AttributeValue::from("red").to_string(), "red");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    /// Integer attribute.
    Int(i64),
    /// Floating-point attribute.
    Float(f64),
    /// Free-form text attribute.
    Text(String),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
