//! Core types & traits: tool contracts, error taxonomy and the result envelope.

pub mod envelope;
pub mod error;
pub mod tool;
