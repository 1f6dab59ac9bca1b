//! Database models for persisted patch records.

pub mod patch;
