//! # folio-core
//!
//! Core types, validation, and error types for Folio.
//!
//! This crate provides the foundational types shared across all Folio crates:
//! - Entity structs for the persisted records (projects, sessions, contact
//!   messages, profile)
//! - Project identifiers and local id synthesis
//! - Field and preference enums
//! - The form/validation layer that turns raw submissions into validated drafts
//! - Image payload encoding and the technology tag list
//! - A `Clock` seam so time-dependent code can be driven from tests

pub mod clock;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod image;
pub mod tags;
pub mod validation;
