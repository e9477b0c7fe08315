//! Logic core for a scholarship ("becas") call and application workflow.
//!
//! Administrators publish funding calls, applicants submit against open
//! calls, and evaluators score submissions across a three-axis rubric that
//! drives the application state machine. All state lives behind the
//! [`store::KeyValueStore`] trait; the crate ships an in-memory store and a
//! JSON-file store. There is no server and no CLI; a UI layer is expected
//! to call the services directly.

pub mod config;
pub mod store;
pub mod telemetry;
pub mod workflows;
