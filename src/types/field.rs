//! Tri-state field presence.
//!
//! Some payload fields distinguish "never set" from "set to null" when the entity is
//! serialized again. `Option<T>` cannot express that, so those fields use [`Field`].
//!
//! Serde sees a `Field` the way it sees an `Option`: a JSON `null` decodes to
//! [`Field::Null`], a missing key (with `#[serde(default)]`) stays [`Field::Absent`],
//! and only [`Field::Value`] is written back when paired with
//! `#[serde(skip_serializing_if = "Field::is_unset")]`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Presence-aware value: absent, explicitly null, or a concrete value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Field<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<T> Field<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Field::Null)
    }

    /// True when the field exists on the entity, null or not.
    pub fn is_present(&self) -> bool {
        !self.is_absent()
    }

    /// True unless the field holds a value.
    pub fn is_unset(&self) -> bool {
        !matches!(self, Field::Value(_))
    }

    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Field::Absent => Field::Absent,
            Field::Null => Field::Null,
            Field::Value(v) => Field::Value(v),
        }
    }

    /// Collapse to an `Option`, losing the absent/null distinction.
    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Field::Absent => Field::Absent,
            Field::Null => Field::Null,
            Field::Value(v) => Field::Value(f(v)),
        }
    }

    /// Turn an absent field into an existing one, keeping any value it already had.
    pub fn or_null(self) -> Field<T> {
        match self {
            Field::Absent => Field::Null,
            other => other,
        }
    }

    /// Drop an explicit null, so the field exists only when it holds a value.
    pub fn non_null(self) -> Field<T> {
        match self {
            Field::Null => Field::Absent,
            other => other,
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    /// `None` becomes [`Field::Absent`]: a resolved-null input never creates the field.
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Field::Value(v),
            None => Field::Absent,
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Value(v) => v.serialize(serializer),
            _ => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Field::Value(v),
            None => Field::Null,
        })
    }
}
