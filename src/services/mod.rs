//! Remote services the portal talks to.

pub mod agent;
pub mod sensor;
pub mod translation;
pub mod weather;
