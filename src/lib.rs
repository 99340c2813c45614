//! School Index Builder
//!
//! Compiles the human-edited school catalogue into a single protobuf artifact
//! consumed by the timetable import client.
//!
//! ## Inputs
//!
//! ```text
//! index/
//! └── root_index.yaml        # schools: [{id, name, initial, resource_folder}]
//! resources/
//! ├── HNSF/
//! │   └── adapters.yaml      # adapters: [{adapter_id, adapter_name, category, ...}]
//! └── SHZQ/
//!     └── adapters.yaml
//! ```
//!
//! ## Output
//!
//! `school_index.pb`: a `SchoolIndex` message (see `proto/school_index.proto`)
//! stamped with `PROTOCOL_VERSION` and a per-build `version_id`.

pub mod builder;
pub mod checksum;
pub mod config;
pub mod error;
pub mod loader;
pub mod mapper;
pub mod schema;
pub mod version;
pub mod writer;

pub use builder::{BuildReport, IndexBuilder};
pub use checksum::Checksum;
pub use config::BuildConfig;
pub use error::{BuildError, Result};
pub use schema::{Adapter, AdapterCategory, School, SchoolIndex, PROTOCOL_VERSION};
pub use version::VersionStamp;
