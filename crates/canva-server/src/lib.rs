//! Canva tool server library
//!
//! Hosts the Canva endpoint methods as HTTP-invocable tools. Exposed as a
//! library so the router can be exercised in tests.

pub mod api;
pub mod config;
pub mod error;
