//! Monthly KPI review toolkit for boiler plant shift managers.
//!
//! The [`review`] module carries the domain: the fixed rubric catalog, the
//! scoring engine, evaluation session state, and report assembly. The
//! remaining modules provide the service plumbing (configuration, telemetry,
//! application errors) shared by the HTTP and CLI frontends.

pub mod config;
pub mod error;
pub mod review;
pub mod telemetry;
