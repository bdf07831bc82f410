use rowbind::{eq, fields, filter, Db, Reuse, SharedStore, Value};
use tests::{schema, setup_with};

use pretty_assertions::assert_eq;
use std::sync::Arc;

#[derive(Debug, Default, Clone, PartialEq, rowbind::Record)]
struct User {
    #[column("id")]
    id: i64,
    #[column("name")]
    name: String,
    #[column("age")]
    age: u8,
}

fn with_store() -> (tests::Setup, Arc<SharedStore>) {
    let store = Arc::new(SharedStore::new());
    let s = setup_with(Db::builder().store(store.clone()), schema::USERS);
    (s, store)
}

#[tokio::test]
async fn warm_calls_reuse_sql_and_rebind() {
    let (s, store) = with_store();
    let users = s.db.table("users").reuse(Reuse::CallSite);

    for id in 1..=3i64 {
        let user = User {
            id,
            name: format!("user{id}"),
            age: id as u8,
        };
        users.insert(&user, ()).await.unwrap();
    }
    assert_eq!(store.len(), 1);

    // Each call scans into a different destination through the same plan.
    let mut found = vec![User::default(), User::default()];
    for (index, slot) in found.iter_mut().enumerate() {
        users
            .select(slot, filter(eq("id", index as i64 + 2)))
            .await
            .unwrap();
    }

    assert_eq!(store.len(), 2);
    assert_eq!(found[0].name, "user2");
    assert_eq!(found[1].name, "user3");
}

#[tokio::test]
async fn shape_mode_keys_by_column_list() {
    let (s, store) = with_store();
    let users = s.db.table("users").reuse(Reuse::Shape);

    users
        .insert(&User { id: 1, name: "alice".into(), age: 30 }, ())
        .await
        .unwrap();

    let mut found = User::default();
    for columns in [vec!["name"], vec!["age"], vec!["name"]] {
        users
            .select(&mut found, [fields(columns), filter(eq("id", 1))])
            .await
            .unwrap();
    }

    // One insert entry plus two select shapes
    assert_eq!(store.len(), 3);
    assert_eq!(found, User { id: 0, name: "alice".into(), age: 30 });
}

#[tokio::test]
async fn shape_mode_update_per_column_list() {
    let (s, store) = with_store();
    let users = s.db.table("users").reuse(Reuse::Shape);

    users
        .insert(&User { id: 1, name: "alice".into(), age: 30 }, ())
        .await
        .unwrap();
    s.log.clear();

    let changed = User { id: 1, name: "bob".into(), age: 41 };
    for columns in [vec!["name"], vec!["name", "age"]] {
        let affected = users
            .update(&changed, [fields(columns), filter(eq("id", 1))])
            .await
            .unwrap();
        assert_eq!(affected, 1);
    }

    assert_eq!(store.len(), 3);

    let exec = s.log.pop();
    assert_eq!(exec.sql, "update `users` set `name`=? where `id`=?");
    assert_eq!(exec.args, [Value::from("bob"), Value::I32(1)]);

    let exec = s.log.pop();
    assert_eq!(exec.sql, "update `users` set `name`=?,`age`=? where `id`=?");
    assert_eq!(exec.args, [Value::from("bob"), Value::U8(41), Value::I32(1)]);

    let mut found = User::default();
    users.select(&mut found, filter(eq("id", 1))).await.unwrap();
    assert_eq!(found, changed);
}

#[tokio::test]
async fn off_never_stores() {
    let (s, store) = with_store();
    let users = s.db.table("users");

    let mut rows: Vec<User> = vec![];
    users.select(&mut rows, ()).await.unwrap();
    users.select(&mut rows, ()).await.unwrap();

    assert!(store.is_empty());
    assert_eq!(s.log.len(), 2);
}

#[tokio::test]
async fn batch_sizes_get_their_own_entries() {
    let (s, store) = with_store();
    let users = s.db.table("users").reuse(Reuse::CallSite);

    let mut next = 0;
    for size in [1, 3, 3, 1] {
        let batch: Vec<User> = (0..size)
            .map(|_| {
                next += 1;
                User {
                    id: next,
                    ..User::default()
                }
            })
            .collect();

        assert_eq!(users.insert(&batch, ()).await.unwrap(), size as u64);
    }

    assert_eq!(store.len(), 2);
    assert_eq!(
        s.log.pop_sql(),
        "insert into `users` (`id`,`name`,`age`) values (?,?,?)"
    );
    assert_eq!(
        s.log.pop_sql(),
        "insert into `users` (`id`,`name`,`age`) values (?,?,?),(?,?,?),(?,?,?)"
    );

    store.clear();
    assert!(store.is_empty());
}
