//! Pipeline services: upstream clients, extraction, persistence and orchestration.

pub mod github;
pub mod nvd;
pub mod patch;
pub mod pipeline;
pub mod reference;
