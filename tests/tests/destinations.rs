use rowbind::{eq, fields, filter, map, order_by, Map, Value};
use tests::{schema, setup, Setup};

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

async fn seeded() -> Setup {
    let s = setup(schema::USERS);

    let rows: Vec<Map> = vec![
        map! { "id" => 1, "name" => "alice", "age" => 30 },
        map! { "id" => 2, "name" => "bob", "age" => 17 },
        map! { "id" => 3, "name" => "carol", "age" => 45 },
    ];
    s.db.table("users").insert(&rows, ()).await.unwrap();
    s.log.clear();

    s
}

#[tokio::test]
async fn boxed_records() {
    let s = seeded().await;

    let mut users: Vec<Box<User>> = vec![];
    let count = s
        .db
        .table("users")
        .select(&mut users, order_by(["id"]))
        .await
        .unwrap();

    assert_eq!(count, 3);
    assert_eq!(users[2].name, "carol");
    assert_eq!(*users[0], User { id: 1, name: "alice".into(), age: 30 });
}

#[tokio::test]
async fn vec_destinations_append() {
    let s = seeded().await;
    let users = s.db.table("users");

    let mut found = vec![User {
        id: 99,
        ..User::default()
    }];
    users
        .select(&mut found, filter(eq("id", 2)))
        .await
        .unwrap();

    assert_eq!(found.len(), 2);
    assert_eq!(found[0].id, 99);
    assert_eq!(found[1].name, "bob");
}

#[tokio::test]
async fn single_map() {
    let s = seeded().await;

    let mut row = map! { "extra" => true };
    let count = s
        .db
        .table("users")
        .select(&mut row, [fields(["name", "age"]), filter(eq("id", 3))])
        .await
        .unwrap();

    assert_eq!(count, 1);
    assert_eq!(
        row,
        map! { "extra" => true, "name" => "carol", "age" => Value::I64(45) }
    );
}

#[tokio::test]
async fn maps_without_fields_select_star() {
    let s = seeded().await;

    let mut rows: Vec<Map> = vec![];
    s.db.table("users")
        .select(&mut rows, order_by(["id desc"]))
        .await
        .unwrap();

    assert_eq!(s.log.pop_sql(), "select * from `users` order by id desc");
    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows[0].keys().map(String::as_str).collect::<Vec<_>>(),
        ["id", "name", "age"]
    );
    assert_eq!(rows[0]["name"], Value::from("carol"));
}

#[tokio::test]
async fn scalar_values() {
    let s = seeded().await;
    let users = s.db.table("users");

    let mut total = 0u32;
    users
        .select(&mut total, fields(["count(*)"]))
        .await
        .unwrap();
    assert_eq!(total, 3);

    let mut oldest = 0.0f64;
    users
        .select(&mut oldest, fields(["max(age)"]))
        .await
        .unwrap();
    assert_eq!(oldest, 45.0);

    let mut name = String::new();
    users
        .select(&mut name, [fields(["name"]), filter(eq("id", 2))])
        .await
        .unwrap();
    assert_eq!(name, "bob");

    assert_eq!(s.log.pop_sql(), "select count(*) from `users`");
    assert_eq!(s.log.pop_sql(), "select max(age) from `users`");
}

#[tokio::test]
async fn scalar_rejects_column_counts_other_than_one() {
    let s = seeded().await;
    let users = s.db.table("users");

    let mut name = String::new();
    let err = users.select(&mut name, ()).await.unwrap_err();
    assert!(err.is_invalid_argument());

    let err = users
        .select(&mut name, fields(["name", "age"]))
        .await
        .unwrap_err();
    assert!(err.is_invalid_argument());

    assert!(s.log.is_empty());
}

#[tokio::test]
async fn unknown_field_is_rejected_before_the_driver() {
    let s = seeded().await;

    let mut users: Vec<User> = vec![];
    let err = s
        .db
        .table("users")
        .select(&mut users, fields(["email"]))
        .await
        .unwrap_err();

    assert!(err.is_invalid_argument());
    assert!(s.log.is_empty());
}
