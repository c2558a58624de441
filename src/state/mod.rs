//! Generic persisted-record layer.
//!
//! A [`Backend`] reads and writes a single structured record at one store
//! address. The record type drives the format through the [`StateRecord`]
//! capability trait: it knows its initial value, how to encode itself, and
//! how to decode itself. The lock protocol in [`crate::vault`] and the
//! progress persistence in [`TrackerStore`] are both built on this one
//! read/write-with-default pattern.

mod backend;
mod record;
mod tracker;

#[cfg(test)]
mod tests;

pub use backend::Backend;
pub use record::StateRecord;
pub use tracker::TrackerStore;
