//! Reflection Coach - hybrid dialogue engine for course reflection
//!
//! Students talk through why they chose their courses. Replies come from a
//! live language model when one is configured and answers in time, and from
//! deterministic bilingual scripts otherwise, so the conversation never
//! stalls on an upstream failure.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
