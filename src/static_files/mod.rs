//! Static asset subsystem.
//!
//! # Data Flow
//! ```text
//! /static/<path>
//!     → service.rs (strip prefix, decode, redirect bare directories)
//!     → neutered.rs (directory must contain index.html)
//!     → fs.rs (clean path, open under the static root)
//!     → tower_http ServeDir (serve file or directory index)
//! ```

pub mod fs;
pub mod neutered;
pub mod service;

pub use fs::{Dir, FileSystem, OpenFile};
pub use neutered::{NeuteredFileSystem, INDEX_DOCUMENT};
pub use service::StaticFiles;
