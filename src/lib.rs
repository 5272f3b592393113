//! Study planner backend core.
//!
//! - `codec`: study plan <-> event description text, plus the JSON storage envelope
//! - `recommend`: ranking of the five study-material types for an event
//! - Axum HTTP API over both, with optional OpenAI-backed plan, quiz and
//!   summary generation and local fallbacks when no model is configured

pub mod codec;
pub mod config;
pub mod domain;
pub mod error;
pub mod logic;
pub mod openai;
pub mod protocol;
pub mod recommend;
pub mod routes;
pub mod seeds;
pub mod state;
pub mod telemetry;
pub mod util;
