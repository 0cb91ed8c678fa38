#![cfg(feature = "live-postgres-tests")]

// Runs against the database named by the LIGHTBNB_PG_* variables; the
// LightBnB tables in it are dropped and recreated.

use lightbnb_db::prelude::*;

const SCHEMA: &str = "
DROP TABLE IF EXISTS property_reviews;
DROP TABLE IF EXISTS reservations;
DROP TABLE IF EXISTS properties;
DROP TABLE IF EXISTS users;

CREATE TABLE users (
  id SERIAL PRIMARY KEY NOT NULL,
  name VARCHAR(255) NOT NULL,
  email VARCHAR(255) NOT NULL UNIQUE,
  password VARCHAR(255) NOT NULL
);

CREATE TABLE properties (
  id SERIAL PRIMARY KEY NOT NULL,
  owner_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
  title VARCHAR(255) NOT NULL DEFAULT '',
  cost_per_night INTEGER NOT NULL DEFAULT 0,
  city VARCHAR(255) NOT NULL DEFAULT '',
  active BOOLEAN NOT NULL DEFAULT TRUE,
  deposit NUMERIC(10, 2) NOT NULL DEFAULT 0
);

CREATE TABLE reservations (
  id SERIAL PRIMARY KEY NOT NULL,
  start_date DATE NOT NULL,
  end_date DATE NOT NULL,
  property_id INTEGER NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
  guest_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE
);

CREATE TABLE property_reviews (
  id SERIAL PRIMARY KEY NOT NULL,
  guest_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
  property_id INTEGER NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
  reservation_id INTEGER NOT NULL REFERENCES reservations(id) ON DELETE CASCADE,
  rating SMALLINT NOT NULL DEFAULT 0,
  message TEXT
);
";

#[test]
fn live_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let settings = DbSettings::from_env()?;
        let cap = ConfigAndPool::from_settings(&settings).await?;
        cap.get_connection().await?.execute_batch(SCHEMA).await?;
        let store = Store::new(cap.clone());

        let owner = store
            .add_user(&NewUser::new("Devin Sanders", "tristanjacobs@gmail.com", "password"))
            .await?;
        let guest = store
            .add_user(&NewUser::new("Eva Stanley", "sebastianguerra@ymail.com", "password"))
            .await?;
        assert_eq!(
            store.get_user_with_email("tristanjacobs@gmail.com").await?,
            Some(owner.clone())
        );
        assert_eq!(store.get_user_with_id(guest.id).await?, Some(guest.clone()));
        assert_eq!(store.get_user_with_email("nobody@example.com").await?, None);

        // Duplicate email violates the unique constraint.
        assert!(
            store
                .add_user(&NewUser::new("Dup", "tristanjacobs@gmail.com", "x"))
                .await
                .is_err()
        );

        let cheap = store
            .add_property(
                &PropertyAttributes::new()
                    .with("owner_id", owner.id)
                    .with("title", "Speed lamp")
                    .with("city", "Vancouver")
                    .with("cost_per_night", 5000),
            )
            .await?;
        let pricey = store
            .add_property(
                &PropertyAttributes::new()
                    .with("owner_id", owner.id)
                    .with("title", "Blank corner")
                    .with("city", "Victoria")
                    .with("cost_per_night", "20000")
                    .with("active", "t"),
            )
            .await?;
        let cheap_id = cheap[0].id().expect("id");
        // numeric is not decoded
        assert_eq!(cheap[0].get("deposit"), Some(&RowValues::Null));
        assert_eq!(pricey[0].cost_per_night(), Some(20000));
        assert_eq!(pricey[0].get("active"), Some(&RowValues::Bool(true)));
        let pricey_id = pricey[0].id().expect("id");

        cap.get_connection()
            .await?
            .execute_batch(&format!(
                "INSERT INTO reservations (start_date, end_date, property_id, guest_id)
                 VALUES ('2018-09-11', '2018-09-26', {cheap_id}, {g}),
                        ('2019-01-04', '2019-02-01', {pricey_id}, {g});
                 INSERT INTO property_reviews (guest_id, property_id, reservation_id, rating)
                 VALUES ({g}, {cheap_id}, 1, 5), ({g}, {pricey_id}, 2, 3);",
                g = guest.id
            ))
            .await?;

        let reservations = store.get_all_reservations(guest.id, DEFAULT_LIMIT).await?;
        assert_eq!(reservations.len(), 2);
        assert_eq!(reservations[0].reservation_id(), Some(1));
        assert_eq!(reservations[0].property().id(), Some(cheap_id));
        assert_eq!(reservations[0].average_rating(), Some(5.0));

        let in_vancouver = store
            .get_all_properties(&PropertySearch::default().with_city("'ancouve'"), DEFAULT_LIMIT)
            .await?;
        assert_eq!(in_vancouver.len(), 1);
        assert_eq!(in_vancouver[0].id(), Some(cheap_id));

        let well_rated = store
            .get_all_properties(
                &PropertySearch::default()
                    .with_owner_id(owner.id)
                    .with_minimum_price_per_night(10.0)
                    .with_maximum_price_per_night(250.0)
                    .with_minimum_rating(4.0),
                DEFAULT_LIMIT,
            )
            .await?;
        assert_eq!(well_rated.len(), 1);
        assert_eq!(well_rated[0].cost_per_night(), Some(5000));

        let all = store
            .get_all_properties(&PropertySearch::default(), 1)
            .await?;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id(), Some(cheap_id));

        Ok::<(), LightbnbDbError>(())
    })?;
    Ok(())
}
