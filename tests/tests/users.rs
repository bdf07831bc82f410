use rowbind::{eq, fields, filter, gt, limit, order_by};
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

fn user(id: i64, name: &str, age: u8) -> User {
    User {
        id,
        name: name.to_string(),
        age,
    }
}

#[tokio::test]
async fn crud_lifecycle() {
    let s = setup(schema::USERS);
    let users = s.db.table("users");

    // Create
    let alice = user(1, "alice", 30);
    assert_eq!(users.insert(&alice, ()).await.unwrap(), 1);
    assert_eq!(
        s.log.pop_sql(),
        "insert into `users` (`id`,`name`,`age`) values (?,?,?)"
    );

    // Read back into a single record
    let mut found = User::default();
    let count = users.select(&mut found, filter(eq("id", 1))).await.unwrap();
    assert_eq!(count, 1);
    assert_eq!(found, alice);
    assert_eq!(
        s.log.pop_sql(),
        "select `id`,`name`,`age` from `users` where `id`=?"
    );

    // Update one column
    let older = user(1, "ignored", 31);
    let affected = users
        .update(&older, [fields(["age"]), filter(eq("id", 1))])
        .await
        .unwrap();
    assert_eq!(affected, 1);

    let exec = s.log.pop();
    assert_eq!(exec.sql, "update `users` set `age`=? where `id`=?");
    assert_eq!(exec.args, [rowbind::Value::U8(31), rowbind::Value::I32(1)]);

    users.select(&mut found, filter(eq("id", 1))).await.unwrap();
    assert_eq!(found, user(1, "alice", 31));

    // Delete
    assert_eq!(users.delete(filter(eq("id", 1))).await.unwrap(), 1);

    let mut total = -1i64;
    users
        .select(&mut total, fields(["count(*)"]))
        .await
        .unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn select_many_with_clauses() {
    let s = setup(schema::USERS);
    let users = s.db.table("users");

    let batch = vec![
        user(1, "alice", 30),
        user(2, "bob", 17),
        user(3, "carol", 45),
        user(4, "dave", 22),
    ];
    assert_eq!(users.insert(&batch, ()).await.unwrap(), 4);

    let mut adults: Vec<User> = vec![];
    let count = users
        .select(
            &mut adults,
            [order_by(["age desc"]), limit(2), filter(gt("age", 18))],
        )
        .await
        .unwrap();

    assert_eq!(count, 2);
    assert_eq!(adults, [user(3, "carol", 45), user(1, "alice", 30)]);

    s.log.pop();
    assert_eq!(
        s.log.pop_sql(),
        "select `id`,`name`,`age` from `users` where `age`>? order by age desc limit ?"
    );
}

#[tokio::test]
async fn missing_row_is_not_an_error() {
    let s = setup(schema::USERS);

    let mut found = user(9, "unchanged", 9);
    let count = s
        .db
        .table("users")
        .select(&mut found, filter(eq("id", 404)))
        .await
        .unwrap();

    assert_eq!(count, 0);
    assert_eq!(found, user(9, "unchanged", 9));
}

#[tokio::test]
async fn driver_errors_surface() {
    let s = setup(schema::USERS);

    let mut rows: Vec<User> = vec![];
    let err = s
        .db
        .table("no_such_table")
        .select(&mut rows, ())
        .await
        .unwrap_err();

    assert!(err.is_driver());
    assert!(err.to_string().contains("no_such_table"));
}

#[tokio::test]
async fn duplicate_key_is_a_driver_error() {
    let s = setup(schema::USERS);
    let users = s.db.table("users");

    users.insert(&user(1, "alice", 30), ()).await.unwrap();
    let err = users.insert(&user(1, "again", 1), ()).await.unwrap_err();
    assert!(err.is_driver());

    // Replace overwrites instead
    let replaced = users
        .clone()
        .replace_into()
        .insert(&user(1, "again", 1), ())
        .await
        .unwrap();
    assert_eq!(replaced, 1);

    let mut name = String::new();
    users
        .select(&mut name, [fields(["name"]), filter(eq("id", 1))])
        .await
        .unwrap();
    assert_eq!(name, "again");
}
