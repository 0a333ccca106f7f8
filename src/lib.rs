//! Toroidal snake: a tick-driven arcade game on a wrap-around grid
//!
//! This library provides:
//! - Core game logic (game module): grid, snake, apple and the tick engine
//! - Key-event decoding (input module)
//! - TUI rendering over the per-tick grid snapshot (render module)
//! - The playable arcade loop (modes module)
//! - Session stats (metrics module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
