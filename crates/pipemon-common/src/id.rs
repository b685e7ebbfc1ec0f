use snowflake::SnowflakeIdBucket;
use std::sync::Mutex;

static ID_GENERATOR: Mutex<Option<SnowflakeIdBucket>> = Mutex::new(None);

/// Configure the Snowflake ID generator.
///
/// `machine_id` and `node_id` must each be in 0-31. Calling this is
/// optional; `mint` falls back to (1, 1) when unconfigured.
pub fn configure(machine_id: i32, node_id: i32) {
    let mut gen = ID_GENERATOR.lock().unwrap();
    *gen = Some(SnowflakeIdBucket::new(machine_id, node_id));
}

/// Mint a fresh opaque ID (string form of a Snowflake i64).
pub fn mint() -> String {
    let mut gen = ID_GENERATOR.lock().unwrap();
    let bucket = gen.get_or_insert_with(|| SnowflakeIdBucket::new(1, 1));
    bucket.get_id().to_string()
}
