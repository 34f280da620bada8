use iso8601_timestamp::{Duration, Timestamp};

/// Current time truncated to the millisecond precision BSON dates can hold
pub fn now() -> Timestamp {
    let elapsed = Timestamp::now_utc()
        .duration_since(Timestamp::UNIX_EPOCH)
        .whole_milliseconds() as i64;

    Timestamp::UNIX_EPOCH + Duration::milliseconds(elapsed)
}
