//! Core use-case services.
//!
//! # Responsibility
//! - Expose domain-shaped category and word operations.
//! - Keep FFI/UI layers decoupled from storage details.
//!
//! # Invariants
//! - Services delegate to repositories and surface their errors unchanged.

pub mod category_service;
pub mod word_service;
