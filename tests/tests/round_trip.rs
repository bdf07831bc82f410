use rowbind::{eq, fields, filter, Map, Value};
use tests::{schema, setup};

use pretty_assertions::assert_eq;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, PartialEq, rowbind::Record)]
struct Sample {
    #[column("id")]
    id: i64,
    #[column("flag")]
    flag: bool,
    #[column("tiny")]
    tiny: i8,
    #[column("small")]
    small: i16,
    #[column("medium")]
    medium: i32,
    #[column("large")]
    large: i64,
    #[column("utiny")]
    utiny: u8,
    #[column("usmall")]
    usmall: u16,
    #[column("umedium")]
    umedium: u32,
    #[column("ularge")]
    ularge: u64,
    #[column("single")]
    single: f32,
    #[column("double")]
    double: f64,
    #[column("label")]
    label: String,
    #[column("payload")]
    payload: Vec<u8>,
    #[column("created_at")]
    created_at: SystemTime,
}

// `SystemTime` has no `Default`.
impl Default for Sample {
    fn default() -> Self {
        Sample {
            id: 0,
            flag: false,
            tiny: 0,
            small: 0,
            medium: 0,
            large: 0,
            utiny: 0,
            usmall: 0,
            umedium: 0,
            ularge: 0,
            single: 0.0,
            double: 0.0,
            label: String::new(),
            payload: vec![],
            created_at: UNIX_EPOCH,
        }
    }
}

fn extremes() -> Sample {
    Sample {
        id: 1,
        flag: true,
        tiny: i8::MIN,
        small: i16::MAX,
        medium: i32::MIN,
        large: i64::MAX,
        utiny: u8::MAX,
        usmall: u16::MAX,
        umedium: u32::MAX,
        ularge: u64::MAX,
        single: 1.5,
        double: -0.25,
        label: "héllo, world".to_string(),
        payload: vec![0, 159, 146, 150, 255],
        created_at: UNIX_EPOCH + Duration::from_secs(1_551_428_952),
    }
}

#[tokio::test]
async fn every_supported_type() {
    let s = setup(schema::SAMPLES);
    let samples = s.db.table("samples");

    let sample = extremes();
    samples.insert(&sample, ()).await.unwrap();

    let mut found = Sample::default();
    samples
        .select(&mut found, filter(eq("id", 1)))
        .await
        .unwrap();

    assert_eq!(found, sample);
}

#[tokio::test]
async fn times_are_stored_as_text() {
    let s = setup(schema::SAMPLES);
    let samples = s.db.table("samples");

    samples.insert(&extremes(), ()).await.unwrap();

    let mut text = String::new();
    samples
        .select(&mut text, fields(["created_at"]))
        .await
        .unwrap();
    assert_eq!(text, "2019-03-01 08:29:12");

    // Date text coerces into integer destinations as epoch seconds.
    let mut epoch = 0i64;
    samples
        .select(&mut epoch, fields(["created_at"]))
        .await
        .unwrap();
    assert_eq!(epoch, 1_551_428_952);
}

#[tokio::test]
async fn bools_are_stored_as_integers() {
    let s = setup(schema::SAMPLES);
    let samples = s.db.table("samples");

    samples.insert(&extremes(), ()).await.unwrap();

    let mut row = Map::new();
    samples
        .select(&mut row, fields(["flag", "single"]))
        .await
        .unwrap();

    assert_eq!(row["flag"], Value::I64(1));
    assert_eq!(row["single"], Value::F64(1.5));

    let mut flag = String::new();
    samples.select(&mut flag, fields(["flag"])).await.unwrap();
    assert_eq!(flag, "1");
}

#[tokio::test]
async fn nulls_reset_to_zero_values() {
    let s = setup(schema::SAMPLES);
    let samples = s.db.table("samples");

    s.db.driver()
        .exec(
            &rowbind::Context::background(),
            "insert into samples (id) values (7)",
            &[],
        )
        .await
        .unwrap();

    let mut found = extremes();
    samples
        .select(&mut found, filter(eq("id", 7)))
        .await
        .unwrap();

    assert_eq!(
        found,
        Sample {
            id: 7,
            ..Sample::default()
        }
    );
}
