use std::sync::LazyLock;

use regex::Regex;

use super::AVERAGE_RATING;
use crate::error::LightbnbDbError;
use crate::models::{NewUser, PropertyAttributes};
use crate::query::QueryAndParams;
use crate::types::RowValues;

// Column names are spliced into the INSERT text, so only plain identifiers pass.
static COLUMN_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("column name pattern is valid")
});

#[must_use]
pub fn user_with_email(email: &str) -> QueryAndParams {
    QueryAndParams::new(
        "SELECT *\nFROM users\nWHERE users.email = $1;",
        vec![RowValues::Text(email.to_string())],
    )
}

#[must_use]
pub fn user_with_id(id: i64) -> QueryAndParams {
    QueryAndParams::new(
        "SELECT *\nFROM users\nWHERE users.id = $1;",
        vec![RowValues::Int(id)],
    )
}

#[must_use]
pub fn insert_user(user: &NewUser) -> QueryAndParams {
    QueryAndParams::new(
        "INSERT INTO users (name, email, password)\nVALUES ($1, $2, $3)\nRETURNING *;",
        vec![
            RowValues::Text(user.name.clone()),
            RowValues::Text(user.email.clone()),
            RowValues::Text(user.password.clone()),
        ],
    )
}

/// A guest's reservations with the reserved property and its average rating,
/// earliest start date first.
#[must_use]
pub fn reservations_for_guest(guest_id: i64, limit: i64) -> QueryAndParams {
    QueryAndParams::new(
        format!(
            "SELECT reservations.*, properties.*, {AVERAGE_RATING} AS average_rating\n\
             FROM reservations\n\
             JOIN properties ON properties.id = reservations.property_id\n\
             JOIN property_reviews ON property_reviews.property_id = properties.id\n\
             WHERE reservations.guest_id = $1\n\
             GROUP BY properties.id, reservations.id\n\
             ORDER BY start_date\n\
             LIMIT $2;"
        ),
        vec![RowValues::Int(guest_id), RowValues::Int(limit)],
    )
}

/// `INSERT INTO properties (...) VALUES ($1, ...) RETURNING *` with one column
/// per attribute, in insertion order.
///
/// # Errors
/// Returns `LightbnbDbError::ParameterError` if there are no attributes or a column
/// name is not a plain identifier.
pub fn insert_property(property: &PropertyAttributes) -> Result<QueryAndParams, LightbnbDbError> {
    if property.is_empty() {
        return Err(LightbnbDbError::ParameterError(
            "a property needs at least one attribute".to_string(),
        ));
    }

    let mut columns = Vec::with_capacity(property.len());
    let mut placeholders = Vec::with_capacity(property.len());
    let mut params = Vec::with_capacity(property.len());

    for (column, value) in property.iter() {
        if !COLUMN_NAME.is_match(column) {
            return Err(LightbnbDbError::ParameterError(format!(
                "{column:?} is not a valid column name"
            )));
        }
        columns.push(column);
        params.push(value.clone());
        placeholders.push(format!("${}", params.len()));
    }

    Ok(QueryAndParams::new(
        format!(
            "INSERT INTO properties ({})\nVALUES ({})\nRETURNING *;",
            columns.join(", "),
            placeholders.join(", ")
        ),
        params,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_lookups_bind_one_value() {
        let qp = user_with_email("tristanjacobs@gmail.com");
        assert!(qp.query.contains("WHERE users.email = $1"));
        assert_eq!(qp.params, vec![RowValues::Text("tristanjacobs@gmail.com".into())]);

        let qp = user_with_id(1);
        assert!(qp.query.contains("WHERE users.id = $1"));
        assert_eq!(qp.placeholder_count(), 1);
    }

    #[test]
    fn insert_user_binds_name_email_password() {
        let qp = insert_user(&NewUser::new("Eva", "eva@example.com", "password"));
        assert!(qp.query.starts_with("INSERT INTO users (name, email, password)"));
        assert!(qp.query.contains("RETURNING *"));
        assert_eq!(
            qp.params,
            vec![
                RowValues::Text("Eva".into()),
                RowValues::Text("eva@example.com".into()),
                RowValues::Text("password".into()),
            ]
        );
    }

    #[test]
    fn reservations_limit_is_second() {
        let qp = reservations_for_guest(4, 5);
        assert!(qp.query.contains("WHERE reservations.guest_id = $1"));
        assert!(qp.query.contains("GROUP BY properties.id, reservations.id"));
        assert!(qp.query.contains("ORDER BY start_date\nLIMIT $2;"));
        assert_eq!(qp.params, vec![RowValues::Int(4), RowValues::Int(5)]);
    }

    #[test]
    fn insert_property_rejects_bad_columns() {
        let bad = PropertyAttributes::new().with("city; DROP TABLE users", "x");
        assert!(matches!(
            insert_property(&bad),
            Err(LightbnbDbError::ParameterError(_))
        ));
        assert!(matches!(
            insert_property(&PropertyAttributes::new()),
            Err(LightbnbDbError::ParameterError(_))
        ));
    }
}
