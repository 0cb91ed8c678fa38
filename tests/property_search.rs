use lightbnb_db::prelude::*;
use lightbnb_db::query_builder::insert_property;

fn all_searches() -> Vec<PropertySearch> {
    let mut searches = Vec::new();
    for mask in 0u8..32 {
        let mut s = PropertySearch::default();
        if mask & 1 != 0 {
            s = s.with_city("'Vancouver'");
        }
        if mask & 2 != 0 {
            s = s.with_owner_id(7);
        }
        if mask & 4 != 0 {
            s = s.with_minimum_price_per_night(50.0);
        }
        if mask & 8 != 0 {
            s = s.with_maximum_price_per_night(150.0);
        }
        if mask & 16 != 0 {
            s = s.with_minimum_rating(4.0);
        }
        searches.push(s);
    }
    searches
}

fn condition_count(query: &str) -> usize {
    let where_conditions = query
        .lines()
        .find_map(|line| line.strip_prefix("WHERE "))
        .map_or(0, |clause| clause.split(" AND ").count());
    let having = usize::from(query.contains("\nHAVING "));
    where_conditions + having
}

#[test]
fn param_count_is_conditions_plus_limit() {
    for search in all_searches() {
        let qp = build_property_search(&search, DEFAULT_LIMIT).unwrap();
        assert_eq!(
            qp.params.len(),
            condition_count(&qp.query) + 1,
            "search {search:?} built {}",
            qp.query
        );
        assert_eq!(qp.placeholder_count(), qp.params.len());
        assert_eq!(qp.params.last(), Some(&RowValues::Int(DEFAULT_LIMIT)));
        assert!(qp.query.contains(&format!("LIMIT ${};", qp.params.len())));
    }
}

#[test]
fn every_search_groups_and_orders() {
    for search in all_searches() {
        let qp = build_property_search(&search, 3).unwrap();
        assert!(qp.query.contains("JOIN property_reviews ON property_reviews.property_id = properties.id"));
        assert!(qp.query.contains("GROUP BY properties.id\n"));
        assert!(qp.query.contains("ORDER BY cost_per_night\n"));
    }
}

#[test]
fn quoted_city_is_stripped_and_wrapped() {
    let search = PropertySearch::default().with_city("'Vancouver'");
    let qp = build_property_search(&search, DEFAULT_LIMIT).unwrap();
    assert!(qp.query.contains("WHERE (city LIKE $1)"));
    assert_eq!(qp.params[0], RowValues::Text("%Vancouver%".into()));
}

#[test]
fn short_city_matches_everything() {
    let search = PropertySearch::default().with_city("V");
    let qp = build_property_search(&search, DEFAULT_LIMIT).unwrap();
    assert_eq!(qp.params[0], RowValues::Text("%%".into()));
}

#[test]
fn prices_bind_in_cents_in_order() {
    let search = PropertySearch::default()
        .with_minimum_price_per_night(50.0)
        .with_maximum_price_per_night(150.0);
    let qp = build_property_search(&search, DEFAULT_LIMIT).unwrap();
    assert!(qp.query.contains("(properties.cost_per_night >= $1)"));
    assert!(qp.query.contains("(properties.cost_per_night <= $2)"));
    assert_eq!(
        qp.params,
        vec![RowValues::Int(5000), RowValues::Int(15000), RowValues::Int(10)]
    );
}

#[test]
fn rating_alone_uses_having_without_where() {
    let search = PropertySearch::default().with_minimum_rating(4.0);
    let qp = build_property_search(&search, DEFAULT_LIMIT).unwrap();
    assert!(!qp.query.contains("WHERE"));
    assert!(qp.query.contains("GROUP BY properties.id"));
    assert!(qp.query.contains("HAVING avg(property_reviews.rating)::float8 >= $1"));
    assert!(qp.query.contains("LIMIT $2;"));
    assert_eq!(qp.params, vec![RowValues::Float(4.0), RowValues::Int(10)]);
}

#[test]
fn rating_follows_every_where_param() {
    let search = PropertySearch::default()
        .with_city("'Van'")
        .with_owner_id(2)
        .with_minimum_rating(3.5);
    let qp = build_property_search(&search, 20).unwrap();
    assert!(qp.query.contains("(city LIKE $1) AND (properties.owner_id = $2)"));
    assert!(qp.query.contains(">= $3\n"));
    assert_eq!(
        qp.params,
        vec![
            RowValues::Text("%Van%".into()),
            RowValues::Int(2),
            RowValues::Float(3.5),
            RowValues::Int(20),
        ]
    );
}

#[test]
fn zero_valued_options_are_still_applied() {
    let search = PropertySearch::default()
        .with_owner_id(0)
        .with_minimum_price_per_night(0.0)
        .with_minimum_rating(0.0);
    let qp = build_property_search(&search, DEFAULT_LIMIT).unwrap();
    assert!(
        qp.query
            .contains("WHERE (properties.owner_id = $1) AND (properties.cost_per_night >= $2)\n")
    );
    assert!(qp.query.contains(">= $3\n"));
    assert_eq!(
        qp.params,
        vec![
            RowValues::Int(0),
            RowValues::Int(0),
            RowValues::Float(0.0),
            RowValues::Int(10),
        ]
    );
}

#[test]
fn empty_city_is_applied_as_match_all() {
    let search = PropertySearch::default().with_city("");
    let qp = build_property_search(&search, DEFAULT_LIMIT).unwrap();
    assert!(qp.query.contains("WHERE (city LIKE $1)"));
    assert_eq!(qp.params[0], RowValues::Text("%%".into()));
}

#[test]
fn nan_price_is_a_parameter_error() {
    let search = PropertySearch::default().with_maximum_price_per_night(f64::NAN);
    assert!(matches!(
        build_property_search(&search, DEFAULT_LIMIT),
        Err(LightbnbDbError::ParameterError(msg)) if msg.contains("maximum_price_per_night")
    ));
}

#[test]
fn no_options_binds_only_the_limit() {
    let qp = build_property_search(&PropertySearch::default(), DEFAULT_LIMIT).unwrap();
    assert_eq!(qp.params, vec![RowValues::Int(10)]);
    assert!(!qp.query.contains("WHERE"));
    assert!(!qp.query.contains("HAVING"));
    assert!(qp.query.contains("LIMIT $1;"));
}

#[test]
fn add_property_keeps_attribute_order() {
    let attrs = PropertyAttributes::new()
        .with("city", "Vancouver")
        .with("cost_per_night", 9300);
    let qp = insert_property(&attrs).unwrap();
    assert!(qp.query.starts_with("INSERT INTO properties (city, cost_per_night)\nVALUES ($1, $2)"));
    assert!(qp.query.ends_with("RETURNING *;"));
    assert_eq!(
        qp.params,
        vec![RowValues::Text("Vancouver".into()), RowValues::Int(9300)]
    );
}
