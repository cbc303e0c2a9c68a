//! Gauntlet Core
//!
//! Core types for the Gauntlet remote evaluation worker.
//!
//! This crate contains:
//! - Domain types: the records the challenge platform serves (submissions,
//!   challenge phases, queue messages) and the evaluator's output
//! - DTOs: the update payloads the worker pushes back to the platform

pub mod domain;
pub mod dto;
