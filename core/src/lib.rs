//! Rock / paper / scissors arena simulation core.
//!
//! Three kinds roam a bounded arena. Each kind hunts one other kind and
//! flees the third; a caught entity converts to its hunter's kind. The
//! game ends when every entity shares one kind.
//!
//! Entry point is [`engine::SimEngine`]. Presentation hooks in through
//! [`snapshot::FrameSink`].

pub mod arena;
pub mod clock;
pub mod command;
pub mod config;
pub mod conversion;
pub mod engine;
pub mod error;
pub mod event;
pub mod kind;
pub mod neighbor;
pub mod rng;
pub mod snapshot;
pub mod steering_subsystem;
pub mod store;
pub mod subsystem;
pub mod termination;
pub mod types;
