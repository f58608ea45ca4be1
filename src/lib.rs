//! Pointdeck - Collaborative story-point estimation session core.
//!
//! This crate owns the session/participant/leadership state machine of a
//! group estimation tool: session lifecycle, leader authorization and
//! rotation, participant presence tracking, and voting-state coherence.
//! Transport (HTTP/WebSocket) and authentication live outside this crate
//! and invoke the operations in `application::handlers`.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
