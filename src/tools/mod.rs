//! Raindrop tool catalog and dispatch.

pub mod args;
pub mod catalog;
pub mod collections;
pub mod operation;
pub mod raindrops;
pub mod registry;
pub mod tags;
pub mod user;

pub use registry::Dispatcher;
