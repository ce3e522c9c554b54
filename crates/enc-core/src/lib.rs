//! Foundational filesystem utilities shared across ENC crates.
//!
//! Provides the filesystem port consumed by the catalog and publisher, atomic
//! text writes, deterministic JSON rendering, and time helpers.

pub mod atomic_io;
pub mod fs_port;
pub mod json_output;
pub mod time_utils;

pub use atomic_io::write_text_atomic;
pub use fs_port::{CatalogFs, DirEntryInfo, DirEntryKind, LocalFs};
pub use json_output::{render_pretty_json, write_pretty_json};
pub use time_utils::{current_unix_timestamp_ms, elapsed_ms_since};
