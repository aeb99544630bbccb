//! # lb-core
//!
//! Core types, form validation, and session history for Lifeboat.
//!
//! This crate provides the foundational types shared across all Lifeboat crates:
//! - Passenger attribute enums (sex, class, port, title) and the survival label
//! - `PassengerInput`, `PredictionResult`, and `HistoryRecord` entities
//! - The passenger form collector that turns raw field values into validated input
//! - Title extraction from passenger names
//! - The append-only, session-scoped `History` store
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod form;
pub mod history;
pub mod title;
