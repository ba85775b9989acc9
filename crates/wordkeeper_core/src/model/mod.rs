//! Vocabulary domain model.
//!
//! # Responsibility
//! - Define the value types shared by stores, services and FFI.
//! - Host the legacy cursor read contract for categories.
//!
//! # Invariants
//! - Every record is identified by a stable 64-bit id.
//! - Domain values are copies read from storage, never live views into it.
//! - `Word::category` holds a category name, not a category id.

pub mod category;
pub mod cursor;
pub mod word;
