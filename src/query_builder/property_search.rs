use serde::{Deserialize, Serialize};

use super::AVERAGE_RATING;
use crate::error::LightbnbDbError;
use crate::query::QueryAndParams;
use crate::types::RowValues;

/// Result cap used when the caller has no preference.
pub const DEFAULT_LIMIT: i64 = 10;

/// Optional filters for a property search. `None` means "not filtered".
///
/// ```rust
/// use lightbnb_db::prelude::*;
///
/// let search = PropertySearch::default()
///     .with_city("'Vancouver'")
///     .with_minimum_rating(4.0);
/// let qp = build_property_search(&search, DEFAULT_LIMIT)?;
/// assert_eq!(qp.params.len(), 3);
/// # Ok::<(), LightbnbDbError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertySearch {
    /// Substring of the city. The first and last characters are dropped
    /// before matching, since callers pass the value still wrapped in quotes.
    pub city: Option<String>,
    pub owner_id: Option<i64>,
    /// Dollars per night; compared against `cost_per_night` in cents.
    pub minimum_price_per_night: Option<f64>,
    /// Dollars per night; compared against `cost_per_night` in cents.
    pub maximum_price_per_night: Option<f64>,
    pub minimum_rating: Option<f64>,
}

impl PropertySearch {
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    #[must_use]
    pub fn with_owner_id(mut self, owner_id: i64) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    #[must_use]
    pub fn with_minimum_price_per_night(mut self, dollars: f64) -> Self {
        self.minimum_price_per_night = Some(dollars);
        self
    }

    #[must_use]
    pub fn with_maximum_price_per_night(mut self, dollars: f64) -> Self {
        self.maximum_price_per_night = Some(dollars);
        self
    }

    #[must_use]
    pub fn with_minimum_rating(mut self, rating: f64) -> Self {
        self.minimum_rating = Some(rating);
        self
    }

    /// Rejects NaN, infinite and out-of-range numbers, which have no
    /// meaningful comparison in SQL.
    ///
    /// # Errors
    /// Returns `LightbnbDbError::ParameterError` naming the first bad field.
    pub fn validate(&self) -> Result<(), LightbnbDbError> {
        let prices = [
            ("minimum_price_per_night", self.minimum_price_per_night),
            ("maximum_price_per_night", self.maximum_price_per_night),
        ];
        for (field, dollars) in prices {
            if let Some(dollars) = dollars {
                if !dollars.is_finite() || (dollars * 100.0).abs() >= MAX_CENTS {
                    return Err(LightbnbDbError::ParameterError(format!(
                        "{field} must be a finite dollar amount, got {dollars}"
                    )));
                }
            }
        }
        if let Some(rating) = self.minimum_rating {
            if !rating.is_finite() {
                return Err(LightbnbDbError::ParameterError(format!(
                    "minimum_rating must be finite, got {rating}"
                )));
            }
        }
        Ok(())
    }
}

#[allow(clippy::cast_precision_loss)]
const MAX_CENTS: f64 = i64::MAX as f64;

/// Parameters and conditions collected so far. Ordinals are positions in
/// `params`, so a condition must be pushed right after its value.
#[derive(Default)]
struct Clauses {
    params: Vec<RowValues>,
    conditions: Vec<String>,
}

impl Clauses {
    fn bind(&mut self, value: RowValues) -> usize {
        self.params.push(value);
        self.params.len()
    }

    fn push(&mut self, value: RowValues, condition: impl FnOnce(usize) -> String) {
        let ordinal = self.bind(value);
        self.conditions.push(condition(ordinal));
    }
}

type Predicate = fn(&PropertySearch, &mut Clauses);

// WHERE order is part of the statement contract.
const WHERE_PREDICATES: [Predicate; 4] = [
    city_predicate,
    owner_predicate,
    minimum_price_predicate,
    maximum_price_predicate,
];

fn city_predicate(options: &PropertySearch, clauses: &mut Clauses) {
    if let Some(city) = &options.city {
        let pattern = format!("%{}%", strip_outer_chars(city));
        clauses.push(RowValues::Text(pattern), |n| format!("(city LIKE ${n})"));
    }
}

fn owner_predicate(options: &PropertySearch, clauses: &mut Clauses) {
    if let Some(owner_id) = options.owner_id {
        clauses.push(RowValues::Int(owner_id), |n| {
            format!("(properties.owner_id = ${n})")
        });
    }
}

fn minimum_price_predicate(options: &PropertySearch, clauses: &mut Clauses) {
    if let Some(dollars) = options.minimum_price_per_night {
        clauses.push(RowValues::Int(dollars_to_cents(dollars)), |n| {
            format!("(properties.cost_per_night >= ${n})")
        });
    }
}

fn maximum_price_predicate(options: &PropertySearch, clauses: &mut Clauses) {
    if let Some(dollars) = options.maximum_price_per_night {
        clauses.push(RowValues::Int(dollars_to_cents(dollars)), |n| {
            format!("(properties.cost_per_night <= ${n})")
        });
    }
}

/// Drop the first and last character. Values shorter than two characters
/// become empty, which turns the filter into `%%`.
fn strip_outer_chars(value: &str) -> &str {
    let mut chars = value.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

// Callers validate first; out-of-range input would saturate.
#[allow(clippy::cast_possible_truncation)]
fn dollars_to_cents(dollars: f64) -> i64 {
    (dollars * 100.0).round() as i64
}

/// Build the property search statement.
///
/// Parameter layout: WHERE values in predicate order, then the minimum
/// rating (if any), then `limit`, always last.
///
/// # Errors
/// Returns `LightbnbDbError::ParameterError` if [`PropertySearch::validate`] fails.
pub fn build_property_search(
    options: &PropertySearch,
    limit: i64,
) -> Result<QueryAndParams, LightbnbDbError> {
    options.validate()?;

    let mut query = format!(
        "SELECT properties.*, {AVERAGE_RATING} AS average_rating\n\
         FROM properties\n\
         JOIN property_reviews ON property_reviews.property_id = properties.id\n"
    );

    let mut clauses = Clauses::default();
    for predicate in WHERE_PREDICATES {
        predicate(options, &mut clauses);
    }

    if !clauses.conditions.is_empty() {
        query.push_str("WHERE ");
        query.push_str(&clauses.conditions.join(" AND "));
        query.push('\n');
    }

    query.push_str("GROUP BY properties.id\n");

    if let Some(rating) = options.minimum_rating {
        let n = clauses.bind(RowValues::Float(rating));
        query.push_str(&format!("HAVING {AVERAGE_RATING} >= ${n}\n"));
    }

    let n = clauses.bind(RowValues::Int(limit));
    query.push_str(&format!("ORDER BY cost_per_night\nLIMIT ${n};"));

    Ok(QueryAndParams::new(query, clauses.params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_one_character_from_each_end() {
        assert_eq!(strip_outer_chars("'Vancouver'"), "Vancouver");
        assert_eq!(strip_outer_chars("ab"), "");
        assert_eq!(strip_outer_chars("a"), "");
        assert_eq!(strip_outer_chars(""), "");
        assert_eq!(strip_outer_chars("«Montréal»"), "Montréal");
    }

    #[test]
    fn prices_round_to_whole_cents() {
        assert_eq!(dollars_to_cents(50.0), 5000);
        assert_eq!(dollars_to_cents(19.99), 1999);
        assert_eq!(dollars_to_cents(0.0), 0);
    }

    #[test]
    fn owner_filter_binds_exact_id() {
        let qp = build_property_search(&PropertySearch::default().with_owner_id(3), 2).unwrap();
        assert!(qp.query.contains("WHERE (properties.owner_id = $1)\n"));
        assert_eq!(qp.params, vec![RowValues::Int(3), RowValues::Int(2)]);
    }

    #[test]
    fn conditions_are_joined_with_and() {
        let search = PropertySearch::default()
            .with_city("'Van'")
            .with_maximum_price_per_night(150.0);
        let qp = build_property_search(&search, DEFAULT_LIMIT).unwrap();
        assert!(
            qp.query
                .contains("WHERE (city LIKE $1) AND (properties.cost_per_night <= $2)\n")
        );
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let cases = [
            PropertySearch::default().with_maximum_price_per_night(f64::NAN),
            PropertySearch::default().with_minimum_price_per_night(f64::INFINITY),
            PropertySearch::default().with_minimum_price_per_night(1e30),
            PropertySearch::default().with_minimum_rating(f64::NAN),
        ];
        for search in cases {
            assert!(
                matches!(
                    build_property_search(&search, DEFAULT_LIMIT),
                    Err(LightbnbDbError::ParameterError(_))
                ),
                "{search:?}"
            );
        }
    }
}
