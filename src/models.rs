//! Row models for the LightBnB tables.
//!
//! `users` has a fixed shape and decodes into [`User`]. Property and
//! reservation rows carry whatever columns the store returns, so they stay
//! wrapped around a [`CustomDbRow`] with typed accessors for the columns the
//! application relies on.

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::LightbnbDbError;
use crate::results::CustomDbRow;
use crate::types::RowValues;

fn required_int(row: &CustomDbRow, column: &str) -> Result<i64, LightbnbDbError> {
    row.get(column)
        .and_then(RowValues::as_int)
        .copied()
        .ok_or_else(|| LightbnbDbError::DecodeError(format!("missing integer column {column:?}")))
}

fn required_text(row: &CustomDbRow, column: &str) -> Result<String, LightbnbDbError> {
    row.get(column)
        .and_then(RowValues::as_text)
        .map(str::to_string)
        .ok_or_else(|| LightbnbDbError::DecodeError(format!("missing text column {column:?}")))
}

/// A row of `users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Stored as given; this layer does not hash.
    pub password: String,
}

impl TryFrom<&CustomDbRow> for User {
    type Error = LightbnbDbError;

    fn try_from(row: &CustomDbRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: required_int(row, "id")?,
            name: required_text(row, "name")?,
            email: required_text(row, "email")?,
            password: required_text(row, "password")?,
        })
    }
}

/// Fields for a user that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Ordered `(column, value)` pairs for a new `properties` row.
///
/// Insertion order is the INSERT column order. Setting a column twice keeps
/// its original position and replaces the value.
///
/// ```rust
/// use lightbnb_db::prelude::*;
///
/// let attrs = PropertyAttributes::new()
///     .with("owner_id", 1)
///     .with("city", "Vancouver")
///     .with("cost_per_night", 9300);
/// assert_eq!(attrs.columns().collect::<Vec<_>>(), ["owner_id", "city", "cost_per_night"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyAttributes {
    entries: Vec<(String, RowValues)>,
}

impl PropertyAttributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<RowValues>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<RowValues>) {
        let column = column.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == column) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((column, value)),
        }
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&RowValues> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RowValues)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<RowValues>> FromIterator<(K, V)> for PropertyAttributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (column, value) in iter {
            attrs.insert(column, value);
        }
        attrs
    }
}

/// A `properties` row, optionally with its `average_rating`.
#[derive(Debug, Clone)]
pub struct PropertyListing(pub CustomDbRow);

impl PropertyListing {
    #[must_use]
    pub fn id(&self) -> Option<i64> {
        self.0.get("id").and_then(RowValues::as_int).copied()
    }

    #[must_use]
    pub fn owner_id(&self) -> Option<i64> {
        self.0.get("owner_id").and_then(RowValues::as_int).copied()
    }

    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.0.get("city").and_then(RowValues::as_text)
    }

    /// Nightly cost in cents.
    #[must_use]
    pub fn cost_per_night(&self) -> Option<i64> {
        self.0.get("cost_per_night").and_then(RowValues::as_int).copied()
    }

    /// `None` for rows that were not aggregated (e.g. freshly inserted ones).
    #[must_use]
    pub fn average_rating(&self) -> Option<f64> {
        self.0.get("average_rating").and_then(RowValues::as_float)
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&RowValues> {
        self.0.get(column)
    }

    #[must_use]
    pub fn row(&self) -> &CustomDbRow {
        &self.0
    }
}

impl Serialize for PropertyListing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.rows.len()))?;
        for (column, value) in self.0.iter() {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// A `reservations.*, properties.*, average_rating` row.
///
/// Both tables contribute an `id`; the reservation's comes first.
#[derive(Debug, Clone)]
pub struct ReservationListing(pub CustomDbRow);

impl ReservationListing {
    #[must_use]
    pub fn reservation_id(&self) -> Option<i64> {
        self.0.get_first("id").and_then(RowValues::as_int).copied()
    }

    #[must_use]
    pub fn property_id(&self) -> Option<i64> {
        self.0.get("property_id").and_then(RowValues::as_int).copied()
    }

    #[must_use]
    pub fn guest_id(&self) -> Option<i64> {
        self.0.get("guest_id").and_then(RowValues::as_int).copied()
    }

    #[must_use]
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.0.get("start_date").and_then(RowValues::as_date)
    }

    #[must_use]
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.0.get("end_date").and_then(RowValues::as_date)
    }

    #[must_use]
    pub fn average_rating(&self) -> Option<f64> {
        self.0.get("average_rating").and_then(RowValues::as_float)
    }

    /// The reserved property; its `id` is the property's.
    #[must_use]
    pub fn property(&self) -> PropertyListing {
        PropertyListing(self.0.clone())
    }

    #[must_use]
    pub fn row(&self) -> &CustomDbRow {
        &self.0
    }
}

impl Serialize for ReservationListing {
    /// The first `id` is emitted as `reservation_id` so keys stay unique.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.rows.len()))?;
        let mut renamed = false;
        for (column, value) in self.0.iter() {
            if column == "id" && !renamed {
                renamed = true;
                map.serialize_entry("reservation_id", value)?;
            } else {
                map.serialize_entry(column, value)?;
            }
        }
        map.end()
    }
}
