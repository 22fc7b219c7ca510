//! Integration tests for the follow graph, itinerary store, and feeds
//!
//! These tests run against an in-memory SQLite database, so they need no
//! external services.

use chrono::{TimeZone, Utc};
use common::database::init_schema;
use common::pagination::PageRequest;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use api::models::{NewActivity, NewItinerary, NewUser, UpdateActivity, User};
use api::repositories::{FeedRepository, FollowRepository, ItineraryRepository, UserRepository};

async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("pool init failed");
    init_schema(&pool).await.expect("schema setup failed");
    pool
}

async fn register(pool: &SqlitePool, username: &str) -> User {
    UserRepository::new(pool.clone())
        .create(&NewUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: "correct horse battery".to_string(),
        })
        .await
        .expect("registration failed")
}

fn itinerary(name: &str) -> NewItinerary {
    NewItinerary {
        name: name.to_string(),
        city: "Rome".to_string(),
        picture: None,
    }
}

/// Pin an itinerary's creation time for deterministic ordering checks
async fn set_timestamp(pool: &SqlitePool, itinerary_id: i64, unix_secs: i64) {
    sqlx::query("UPDATE itineraries SET timestamp = $1 WHERE id = $2")
        .bind(Utc.timestamp_opt(unix_secs, 0).unwrap())
        .bind(itinerary_id)
        .execute(pool)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_follow_is_idempotent() {
    let pool = test_pool().await;
    let alice = register(&pool, "alice").await;
    let bob = register(&pool, "bob").await;
    let follows = FollowRepository::new(pool.clone());

    follows.follow(alice.id, bob.id).await.unwrap();
    follows.follow(alice.id, bob.id).await.unwrap();

    assert!(follows.is_following(alice.id, bob.id).await.unwrap());

    let edges: i64 = sqlx::query_scalar("SELECT count(*) FROM followers")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(edges, 1, "repeated follow must leave exactly one edge");
}

#[tokio::test]
async fn test_unfollow_is_idempotent() {
    let pool = test_pool().await;
    let alice = register(&pool, "alice").await;
    let bob = register(&pool, "bob").await;
    let follows = FollowRepository::new(pool.clone());

    follows.follow(alice.id, bob.id).await.unwrap();
    follows.unfollow(alice.id, bob.id).await.unwrap();
    // Second unfollow is a no-op, not an error
    follows.unfollow(alice.id, bob.id).await.unwrap();

    assert!(!follows.is_following(alice.id, bob.id).await.unwrap());
}

#[tokio::test]
async fn test_followed_users_contents() {
    let pool = test_pool().await;
    let alice = register(&pool, "alice").await;
    let bob = register(&pool, "bob").await;
    let carol = register(&pool, "carol").await;
    let follows = FollowRepository::new(pool.clone());

    follows.follow(alice.id, bob.id).await.unwrap();
    follows.follow(alice.id, carol.id).await.unwrap();
    follows.follow(bob.id, alice.id).await.unwrap();

    let followed = follows.followed_users(alice.id).await.unwrap();
    let names: Vec<&str> = followed.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["bob", "carol"]);
}

#[tokio::test]
async fn test_self_follow_does_not_error_at_this_layer() {
    // The route layer rejects self-follow as a policy violation; the
    // graph itself stays indifferent.
    let pool = test_pool().await;
    let alice = register(&pool, "alice").await;
    let follows = FollowRepository::new(pool.clone());

    follows.follow(alice.id, alice.id).await.unwrap();
    assert!(follows.is_following(alice.id, alice.id).await.unwrap());
    follows.unfollow(alice.id, alice.id).await.unwrap();
}

#[tokio::test]
async fn test_feed_includes_own_itineraries_without_follows() {
    let pool = test_pool().await;
    let alice = register(&pool, "alice").await;
    let itineraries = ItineraryRepository::new(pool.clone());
    let feed = FeedRepository::new(pool.clone());

    itineraries
        .create(alice.id, &itinerary("Solo trip"))
        .await
        .unwrap();

    let page = feed
        .followed_itineraries(alice.id, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name, "Solo trip");
}

#[tokio::test]
async fn test_feed_merges_and_orders_by_timestamp_desc() {
    let pool = test_pool().await;
    let alice = register(&pool, "alice").await;
    let bob = register(&pool, "bob").await;
    let itineraries = ItineraryRepository::new(pool.clone());
    let follows = FollowRepository::new(pool.clone());
    let feed = FeedRepository::new(pool.clone());

    follows.follow(alice.id, bob.id).await.unwrap();

    let i1 = itineraries.create(bob.id, &itinerary("I1")).await.unwrap();
    let i2 = itineraries.create(bob.id, &itinerary("I2")).await.unwrap();
    let i3 = itineraries.create(alice.id, &itinerary("I3")).await.unwrap();
    set_timestamp(&pool, i1.id, 10).await;
    set_timestamp(&pool, i2.id, 20).await;
    set_timestamp(&pool, i3.id, 15).await;

    let page = feed
        .followed_itineraries(alice.id, PageRequest::default())
        .await
        .unwrap();
    let names: Vec<&str> = page.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["I2", "I3", "I1"]);

    // Bob does not follow Alice, so his feed holds only his own
    let bob_page = feed
        .followed_itineraries(bob.id, PageRequest::default())
        .await
        .unwrap();
    let bob_names: Vec<&str> = bob_page.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(bob_names, vec!["I2", "I1"]);
}

#[tokio::test]
async fn test_feed_breaks_timestamp_ties_by_id_desc() {
    let pool = test_pool().await;
    let alice = register(&pool, "alice").await;
    let itineraries = ItineraryRepository::new(pool.clone());
    let feed = FeedRepository::new(pool.clone());

    let first = itineraries.create(alice.id, &itinerary("First")).await.unwrap();
    let second = itineraries.create(alice.id, &itinerary("Second")).await.unwrap();
    set_timestamp(&pool, first.id, 100).await;
    set_timestamp(&pool, second.id, 100).await;

    let page = feed
        .followed_itineraries(alice.id, PageRequest::default())
        .await
        .unwrap();
    let names: Vec<&str> = page.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Second", "First"]);
}

#[tokio::test]
async fn test_ownerless_itineraries_appear_only_in_explore() {
    let pool = test_pool().await;
    let alice = register(&pool, "alice").await;
    let itineraries = ItineraryRepository::new(pool.clone());
    let feed = FeedRepository::new(pool.clone());

    itineraries.create(alice.id, &itinerary("Mine")).await.unwrap();

    // Legacy row with no owner
    sqlx::query(
        "INSERT INTO itineraries (name, timestamp, user_id, city, picture) \
         VALUES ('Orphan', $1, NULL, 'Nowhere', NULL)",
    )
    .bind(Utc.timestamp_opt(1, 0).unwrap())
    .execute(&pool)
    .await
    .unwrap();

    let followed = feed
        .followed_itineraries(alice.id, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(followed.items.len(), 1);
    assert_eq!(followed.items[0].name, "Mine");

    let explore = feed.explore(PageRequest::default()).await.unwrap();
    assert_eq!(explore.items.len(), 2);
    assert!(explore.items.iter().any(|i| i.name == "Orphan"));
}

#[tokio::test]
async fn test_activities_keep_insertion_order() {
    let pool = test_pool().await;
    let alice = register(&pool, "alice").await;
    let itineraries = ItineraryRepository::new(pool.clone());

    let trip = itineraries.create(alice.id, &itinerary("Trip")).await.unwrap();

    let x = itineraries
        .add_activity(
            trip.id,
            &NewActivity {
                name: "X".to_string(),
                description: "first".to_string(),
            },
        )
        .await
        .unwrap();
    let y = itineraries
        .add_activity(
            trip.id,
            &NewActivity {
                name: "Y".to_string(),
                description: "second".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(x.order_id, 1);
    assert_eq!(y.order_id, 2, "order keys must increase monotonically");

    let ordered = itineraries.activities_ordered(trip.id).await.unwrap();
    let names: Vec<&str> = ordered.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["X", "Y"]);
}

#[tokio::test]
async fn test_order_keys_are_scoped_per_itinerary() {
    let pool = test_pool().await;
    let alice = register(&pool, "alice").await;
    let itineraries = ItineraryRepository::new(pool.clone());

    let first = itineraries.create(alice.id, &itinerary("First")).await.unwrap();
    let second = itineraries.create(alice.id, &itinerary("Second")).await.unwrap();

    for name in ["a", "b", "c"] {
        itineraries
            .add_activity(
                first.id,
                &NewActivity {
                    name: name.to_string(),
                    description: String::new(),
                },
            )
            .await
            .unwrap();
    }

    let fresh = itineraries
        .add_activity(
            second.id,
            &NewActivity {
                name: "solo".to_string(),
                description: String::new(),
            },
        )
        .await
        .unwrap();
    assert_eq!(fresh.order_id, 1, "keys restart per itinerary");
}

#[tokio::test]
async fn test_edit_activity_preserves_order_key() {
    let pool = test_pool().await;
    let alice = register(&pool, "alice").await;
    let itineraries = ItineraryRepository::new(pool.clone());

    let trip = itineraries.create(alice.id, &itinerary("Trip")).await.unwrap();
    let activity = itineraries
        .add_activity(
            trip.id,
            &NewActivity {
                name: "Museum".to_string(),
                description: "old text".to_string(),
            },
        )
        .await
        .unwrap();

    let edited = itineraries
        .edit_activity(
            activity.id,
            &UpdateActivity {
                name: "Gallery".to_string(),
                description: "new text".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(edited.name, "Gallery");
    assert_eq!(edited.description, "new text");
    assert_eq!(edited.order_id, activity.order_id);
    assert_eq!(edited.timestamp, activity.timestamp);
}

#[tokio::test]
async fn test_feed_pagination_slices_and_flags() {
    let pool = test_pool().await;
    let alice = register(&pool, "alice").await;
    let itineraries = ItineraryRepository::new(pool.clone());
    let feed = FeedRepository::new(pool.clone());

    for n in 1..=45 {
        let created = itineraries
            .create(alice.id, &itinerary(&format!("Trip {}", n)))
            .await
            .unwrap();
        set_timestamp(&pool, created.id, n).await;
    }

    // Page size 20, 45 items: page 3 holds the 5 oldest
    let page = feed
        .followed_itineraries(alice.id, PageRequest::new(3, 20))
        .await
        .unwrap();
    assert_eq!(page.total, 45);
    assert_eq!(page.items.len(), 5);
    assert!(!page.has_next);
    assert!(page.has_prev);

    let names: Vec<&str> = page.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Trip 5", "Trip 4", "Trip 3", "Trip 2", "Trip 1"]);

    let first_page = feed
        .followed_itineraries(alice.id, PageRequest::new(1, 20))
        .await
        .unwrap();
    assert!(first_page.has_next);
    assert!(!first_page.has_prev);
    assert_eq!(first_page.items[0].name, "Trip 45");
}
