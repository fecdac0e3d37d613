pub mod time;

pub use time::time_millis;

/// Random url-safe id, used for anonymous agent sessions.
pub fn shortid() -> String {
    nanoid::nanoid!(12)
}
