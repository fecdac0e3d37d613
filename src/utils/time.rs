use chrono::{DateTime, Utc};

pub fn time_millis() -> i64 {
    let time: DateTime<Utc> = Utc::now();
    time.timestamp_millis()
}
