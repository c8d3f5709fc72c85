//! Values exchanged with the automation server

use serde::{Deserialize, Serialize};

/// One data point value in the automation system's representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Value {
    pub uid: String,
    pub value: String,
}

/// Ordered list of values, the unit of every read and write
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueBody {
    #[serde(default)]
    pub values: Vec<Value>,
}

impl Value {
    pub fn new(uid: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            value: value.into(),
        }
    }
}

impl ValueBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<Value> for ValueBody {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
