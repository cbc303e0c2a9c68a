//! Core domain types
//!
//! This module contains the records flowing through the worker. Submission,
//! phase, and queue message types mirror the wire shapes the platform API
//! serves; the worker treats them as read-only inputs.

pub mod evaluation;
pub mod message;
pub mod phase;
pub mod submission;
