//! Storage layer for persisting workflows and portal preferences.
//!
//! Provides an abstraction over key-value media, the Rust counterpart of
//! browser local storage:
//! - `MemKv`: In-memory storage for tests and ephemeral sessions
//! - `FileKv`: One JSON document per key inside a directory

mod db;
mod store;

use std::error::Error;

use strum::{AsRefStr, EnumIter};

use crate::{KisanflowError, Result};

pub use db::{FileKv, MemKv};
pub use store::WorkflowStore;

/// Maps medium errors to KisanflowError.
fn map_db_err(err: impl Error) -> KisanflowError {
    KisanflowError::Store(err.to_string())
}

/// Well-known keys in the key-value medium.
#[derive(Debug, Clone, AsRefStr, PartialEq, Hash, Eq, EnumIter)]
pub enum StoreKey {
    /// Flat JSON array of saved workflows.
    #[strum(serialize = "workflows")]
    Workflows,
    /// Language code chosen by the user.
    #[strum(serialize = "preferred-language")]
    PreferredLanguage,
}

/// String-keyed, string-valued persistence medium.
///
/// Writes replace the whole value; there are no transactions and no version
/// checks, so concurrent writers race and the last one wins.
pub trait KvStore: Send + Sync {
    /// Reads the value stored under `key`.
    fn get_item(
        &self,
        key: &str,
    ) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(
        &self,
        key: &str,
        value: &str,
    ) -> Result<()>;

    /// Removes `key`; removing an absent key is not an error.
    fn remove_item(
        &self,
        key: &str,
    ) -> Result<()>;
}
