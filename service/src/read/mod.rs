//! Read models definitions.

pub mod record;

pub use self::record::Snapshot;
