use rowbind::{filter, gte, order_by, Context, Map};
use tests::{schema, setup};

use pretty_assertions::assert_eq;

#[derive(Debug, Default, Clone, PartialEq, rowbind::Record)]
struct User {
    #[column("id")]
    id: i64,
    #[column("name")]
    name: String,
    #[column("age")]
    age: u8,
}

/// SQLite keeps text that does not look like a number as text, even in an
/// integer column.
async fn seed(s: &tests::Setup) {
    s.db.driver()
        .exec(
            &Context::background(),
            "insert into users (id, name, age) values (1, 'alice', 30), (2, 'bob', 'old'), (3, 'carol', 45)",
            &[],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn stops_at_the_first_bad_row() {
    let s = setup(schema::USERS);
    seed(&s).await;

    let mut users: Vec<User> = vec![];
    let err = s
        .db
        .table("users")
        .select(&mut users, order_by(["id"]))
        .await
        .unwrap_err();

    assert!(err.is_type_conversion());
    assert_eq!(err.partial_count(), Some(1));
    assert_eq!(
        err.to_string(),
        "scan stopped after 1 rows: column `age`: cannot convert String to U8: invalid text \"old\""
    );

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "alice");
}

#[tokio::test]
async fn maps_take_values_as_is() {
    let s = setup(schema::USERS);
    seed(&s).await;

    let mut rows: Vec<Map> = vec![];
    let count = s
        .db
        .table("users")
        .select(&mut rows, filter(gte("id", 2)))
        .await
        .unwrap();

    assert_eq!(count, 2);
    assert_eq!(rows[0]["age"], rowbind::Value::from("old"));
}

#[tokio::test]
async fn single_record_reports_the_column() {
    let s = setup(schema::USERS);
    seed(&s).await;

    let mut user = User::default();
    let err = s
        .db
        .table("users")
        .select(&mut user, filter(rowbind::eq("id", 2)))
        .await
        .unwrap_err();

    assert!(err.is_type_conversion());
    assert_eq!(err.partial_count(), None);
    assert!(err.to_string().starts_with("column `age`"));
}
