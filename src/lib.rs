//! # Kisanflow
//!
//! Kisanflow is the workflow core of a smart-farming portal, written in Rust.
//! Farmers compose short browser-automation scripts (navigate, fill, click,
//! prompt, if, loop) on a graph canvas; the crate turns that canvas into an
//! ordered step list, stores it by intent and hands it to an external agent.
//!
//! ## Core Features
//!
//! - **Workflow Builder**: Editor state that keeps the canvas a single chain from the start node
//! - **Pluggable Storage**: In-memory or file-backed key-value media
//! - **Page Schema**: Named page elements offered as `fill`/`click` targets
//! - **Portal Services**: Agent API, translation with an explicit cache, weather and sensor polling
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kisanflow::{ActionKind, PortalBuilder, workflow::START_NODE_ID};
//!
//! let portal = PortalBuilder::new().build()?;
//!
//! let mut builder = portal.new_builder();
//! let nav = builder.add_node(ActionKind::Navigate);
//! builder.set_field(&nav, "target", "/market-trends")?;
//! builder.connect(START_NODE_ID, &nav)?;
//!
//! let workflow = portal.save_builder(&builder, "check tomato prices")?;
//! ```

mod builder;
mod common;
mod config;
mod error;
mod model;
pub mod notify;
mod plan;
mod portal;
pub mod schema;
pub mod services;
pub mod store;
mod utils;
pub mod workflow;

use std::sync::{Arc, RwLock};

pub use builder::PortalBuilder;
pub use config::{AgentConfig, Config, DEMO_API_KEY, SchemaConfig, SensorConfig, StoreConfig, StoreType, TranslationConfig, WeatherConfig};
pub use error::KisanflowError;
pub use model::*;
pub use plan::{Feature, Plan};
pub use portal::{Poller, Portal, Snapshot, Source};

/// Result type alias for Kisanflow operations.
pub type Result<T> = std::result::Result<T, KisanflowError>;

/// Thread-safe shared lock wrapper using Arc<RwLock<T>>.
pub(crate) type ShareLock<T> = Arc<RwLock<T>>;
