//! Data structures for weapon and gun descriptors.
//!
//! This module contains pure data structures that define fire sources and
//! rotating guns. All structs are designed to be deserialized from RON
//! files.
//!
//! **Note:** This module contains no IO - it only defines data types.
//! File loading is handled by `dustfront_data`.

mod gun_data;
mod weapon_data;

pub use gun_data::GunData;
pub use weapon_data::{FireSourceData, PresencePolicy};
