//! Vantiq Connector - bridges an integration-bus runtime and a Vantiq system.
//!
//! The connector translates host-runtime operations (connect, publish,
//! query, metadata discovery) into Vantiq REST calls and translates Vantiq
//! responses back into the host's data and error models.
//!
//! # Architecture
//!
//! ```text
//! Integration-bus host runtime
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │       VantiqConnector                    │
//! │  - connect / disconnect                  │
//! │  - publish data / topics                 │
//! │  - one-shot queries                      │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │       Metadata discovery                 │
//! │  - list data types                       │
//! │  - fetch schema → MetadataModel          │
//! └─────────────────────────────────────────┘
//!          ↓
//!     Vantiq REST API (vantiq crate)
//! ```
//!
//! # Core Types
//!
//! - [`VantiqConnector`] - connection lifecycle and connector operations
//! - [`ConnectorConfig`] - server, API version, adapter topic, timeout
//! - [`TypeSchema`] - wire shape of a Vantiq data type schema
//! - [`MetadataModel`] - host-side field metadata produced by [`translate`]

pub mod config;
pub mod connector;
pub mod discovery;
pub mod metadata;
pub mod schema;

// Re-export public types
pub use config::{load_config, ConnectorConfig};
pub use connector::{ConnectionError, VantiqConnector};
pub use metadata::{translate, FieldKind, MetadataModel, Translation, TranslationWarning};
pub use schema::{PropertyDef, TypeSchema};
