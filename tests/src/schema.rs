//! Table definitions shared by the integration tests.

pub const USERS: &str = "
    create table users (
        id integer primary key,
        name text not null default '',
        age integer not null default 0
    );
";

/// One column per supported field type.
pub const SAMPLES: &str = "
    create table samples (
        id integer primary key,
        flag integer,
        tiny integer,
        small integer,
        medium integer,
        large integer,
        utiny integer,
        usmall integer,
        umedium integer,
        ularge integer,
        single real,
        double real,
        label text,
        payload blob,
        created_at text
    );
";

pub const EVENTS: &str = "
    create table events (
        id integer primary key,
        kind text not null,
        happened_at
    );
";
