//! # Engine Module
//!
//! The capability boundary between this crate and a native simulation
//! engine. Everything the orchestration layer needs from an engine is
//! expressed as four narrow traits; a production binding implements them
//! against the real engine, while [`memory`] ships an in-memory adapter used
//! by the test suite and as a reference for binding authors.
//!
//! ## Overview
//!
//! - **Capability traits** ([`traits`]) - `Engine`, `InputSource`,
//!   `TrajectoryModule`, `FrameRunner`
//! - **Stream options** ([`options`]) - the immutable per-stream snapshot
//!   handed to runner initialization
//! - **Error type** ([`error`]) - opaque pass-through failures from the
//!   engine side of the boundary
//! - **In-memory adapter** ([`memory`]) - scripted engine with observable
//!   lifecycle counters and failure injection

pub mod error;
pub mod memory;
pub mod options;
pub mod traits;
