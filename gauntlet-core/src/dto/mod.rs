//! Data transfer objects for worker → platform communication
//!
//! DTOs are the request payloads the worker pushes back to the platform.
//! They are kept separate from the domain records the platform serves,
//! because the two sides of the wire disagree on shape (most visibly on
//! status casing).

pub mod submission;
