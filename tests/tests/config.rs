use rowbind::{eq, fields, filter, Config, Db, InsertMode, Reuse, Value};
use tests::{schema, setup, setup_with};

use pretty_assertions::assert_eq;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, PartialEq, rowbind::Record)]
struct Event {
    #[column("id")]
    id: i64,
    #[column("kind")]
    kind: String,
    #[column("happened_at")]
    happened_at: SystemTime,
}

impl Default for Event {
    fn default() -> Self {
        Event {
            id: 0,
            kind: String::new(),
            happened_at: UNIX_EPOCH,
        }
    }
}

fn launch() -> Event {
    Event {
        id: 1,
        kind: "launch".into(),
        happened_at: UNIX_EPOCH + Duration::from_secs(1_551_428_952),
    }
}

#[tokio::test]
async fn epoch_time_binds_integers() {
    let s = setup(schema::EVENTS);
    let events = s.db.table("events").epoch_time(true);

    events.insert(&launch(), ()).await.unwrap();
    assert_eq!(
        s.log.pop().args,
        [
            Value::I64(1),
            Value::from("launch"),
            Value::I64(1_551_428_952)
        ]
    );

    // Stored as an integer, scanned back into an instant.
    let mut found = Event::default();
    events
        .select(&mut found, filter(eq("id", 1)))
        .await
        .unwrap();
    assert_eq!(found, launch());

    let mut row = rowbind::Map::new();
    events
        .select(&mut row, fields(["happened_at"]))
        .await
        .unwrap();
    assert_eq!(row["happened_at"], Value::I64(1_551_428_952));
}

#[tokio::test]
async fn text_times_by_default() {
    let s = setup(schema::EVENTS);
    let events = s.db.table("events");

    events.insert(&launch(), ()).await.unwrap();
    assert_eq!(s.log.pop().args[2], Value::from("2019-03-01 08:29:12"));

    let mut found = Event::default();
    events
        .select(&mut found, filter(eq("happened_at", launch().happened_at)))
        .await
        .unwrap();
    assert_eq!(found, launch());
}

#[derive(Debug, Default, Clone, PartialEq, rowbind::Record)]
struct Audit {
    kind: String,
    #[column("happened_at")]
    at: i64,
}

#[derive(Debug, Default, Clone, PartialEq, rowbind::Record)]
struct Entry {
    #[column("id")]
    id: i64,
    #[flatten]
    audit: Audit,
    #[column(ignore)]
    notes: Vec<String>,
}

#[tokio::test]
async fn fallback_flatten_and_ignore() {
    let s = setup(schema::EVENTS);

    // Without the fallback the untagged `kind` is not bound.
    let tagged_only = s.db.table("events");
    let err = tagged_only
        .insert(
            &Entry {
                id: 1,
                audit: Audit { kind: "x".into(), at: 10 },
                notes: vec!["never stored".into()],
            },
            (),
        )
        .await
        .unwrap_err();
    // `kind` is not null in the table.
    assert!(err.is_driver());
    assert_eq!(
        s.log.pop_sql(),
        "insert into `events` (`id`,`happened_at`) values (?,?)"
    );

    let events = s.db.table("events").field_name_fallback(true);
    let entry = Entry {
        id: 2,
        audit: Audit { kind: "deploy".into(), at: 20 },
        notes: vec![],
    };
    events.insert(&entry, ()).await.unwrap();
    assert_eq!(
        s.log.pop_sql(),
        "insert into `events` (`id`,`kind`,`happened_at`) values (?,?,?)"
    );

    let mut found = Entry {
        notes: vec!["kept".into()],
        ..Entry::default()
    };
    events
        .select(&mut found, filter(eq("id", 2)))
        .await
        .unwrap();

    assert_eq!(found.audit, entry.audit);
    assert_eq!(found.notes, ["kept"]);
}

#[tokio::test]
async fn db_wide_config_from_json() {
    let config: Config = serde_json::from_str(
        r#"{ "reuse": "call_site", "debug": true, "insert_mode": "replace" }"#,
    )
    .unwrap();

    let s = setup_with(Db::builder().config(config), schema::EVENTS);
    let events = s.db.table("events");

    assert_eq!(events.config().reuse, Reuse::CallSite);
    assert_eq!(events.config().insert_mode, InsertMode::Replace);

    for _ in 0..2 {
        assert_eq!(events.insert(&launch(), ()).await.unwrap(), 1);
    }

    assert_eq!(s.log.count("replace into `events`"), 2);

    let mut total = 0i64;
    events
        .select(&mut total, fields(["count(*)"]))
        .await
        .unwrap();
    assert_eq!(total, 1);
}
