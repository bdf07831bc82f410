use rowbind::{
    eq, fields, filter,
    mock::{Mocks, Outcome, Rule},
    Db, Error, Rows, Value,
};
use tests::{schema, setup_with};

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

#[tokio::test]
async fn scripted_outcomes_replace_the_driver() {
    let mocks = Mocks::new();
    mocks
        .push(Rule::new(
            "users",
            "select",
            Outcome::Rows(
                Rows::new(["id", "name", "age"])
                    .with_row(vec![Value::I64(1), "mocked".into(), Value::I64(20)])
                    .with_row(vec![Value::I64(2), "twice".into(), Value::Null]),
            ),
        ))
        .push(Rule::new("USERS", "Update", Outcome::Affected(5)))
        .push(Rule::new(
            "user*",
            "delete",
            Outcome::Error(Error::invalid_argument("scripted failure")),
        ));

    let s = setup_with(Db::builder().mocks(mocks.clone()), schema::USERS);
    let users = s.db.table("users");

    let mut rows: Vec<User> = vec![];
    users.select(&mut rows, ()).await.unwrap();
    assert_eq!(
        rows,
        [
            User { id: 1, name: "mocked".into(), age: 20 },
            User { id: 2, name: "twice".into(), age: 0 },
        ]
    );

    let affected = users
        .update(&User::default(), [fields(["name"]), filter(eq("id", 1))])
        .await
        .unwrap();
    assert_eq!(affected, 5);

    let err = users.delete(filter(eq("id", 1))).await.unwrap_err();
    assert_eq!(err.to_string(), "invalid argument: scripted failure");

    // Nothing reached SQLite.
    assert!(s.log.is_empty());
    mocks.verify().unwrap();
}

#[tokio::test]
async fn unmatched_calls_reach_the_driver() {
    let mocks = Mocks::new();
    mocks.push(Rule::new("orders", "*", Outcome::Affected(1)));

    let s = setup_with(Db::builder().mocks(mocks.clone()), schema::USERS);

    let inserted = s
        .db
        .table("users")
        .insert(&User { id: 1, name: "real".into(), age: 3 }, ())
        .await
        .unwrap();
    assert_eq!(inserted, 1);
    assert_eq!(s.log.len(), 1);

    let err = mocks.verify().unwrap_err();
    assert!(err.is_mock());
}

#[tokio::test]
async fn caller_patterns_pick_the_call_site() {
    let mocks = Mocks::new();
    mocks
        .push(Rule::new("*", "select", Outcome::Rows(Rows::new(["name"]))).caller("*nowhere.rs:*"))
        .push(Rule::new("*", "select", Outcome::Rows(Rows::new(["name"]))).caller("*mocks.rs:*"));

    let s = setup_with(Db::builder().mocks(mocks.clone()), schema::USERS);

    // The empty scripted result leaves the destination untouched.
    let mut name = String::from("before");
    let count = s
        .db
        .table("users")
        .select(&mut name, fields(["name"]))
        .await
        .unwrap();

    assert_eq!(count, 0);
    assert_eq!(name, "before");
    assert_eq!(mocks.remaining(), 1);
}
