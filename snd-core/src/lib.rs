#![forbid(unsafe_code)]

pub mod context;
pub mod diag;
pub mod error;
pub mod key;
pub mod policy;
pub mod wave;

pub mod util {
    pub mod endian;
}

pub mod container {
    pub mod header;
    pub mod record;
}

pub mod store {
    pub mod blobs;
}

pub mod index {
    pub mod catalog;
}

pub mod read {
    pub mod open;
    pub mod walker;
}

pub mod archive;
pub mod domain;
pub mod errlog;
pub mod export;
pub mod list;
pub mod resolve;
pub mod stats;

// Re-exports: stable API surface
pub use archive::{SndArchive, SoundData};
pub use context::Context;
pub use error::{Diagnostic, ErrorKind, Result, SndError};
pub use export::{export_all, export_sound};
pub use list::list;
pub use policy::{Config, ErrorPolicy};
