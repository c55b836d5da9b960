//! # sk-engine: Slot Kit spin resolution engine
//!
//! Resolves slot machine spins: fills a reels × rows grid from a pluggable
//! random source, scores every active payline, and reports the outcome to
//! subscribers.
//!
//! ## Features
//!
//! - **Pluggable randomness**: seeded ChaCha for reproducible sessions,
//!   scripted sequences for tests
//! - **Left-anchored line wins**: identity-matched runs from the first cell
//! - **Spin guard**: one spin at a time, shareable across threads
//! - **Lifecycle notifications**: started / completed channels
//! - **Config files**: JSON or YAML table definitions
//!
//! ## Architecture
//!
//! ```text
//! SlotEngine
//!     │
//!     ├── SlotConfig (grid, symbols, paylines, min match)
//!     ├── RandomProvider (ChaChaRandom, SequenceRandom, ...)
//!     ├── PayTable (active paylines)
//!     └── SpinEvents (started / completed)
//!           │
//!           v
//!     ReelGrid → EvaluationResult → SpinResult
//! ```

pub mod config;
pub mod engine;
pub mod events;
pub mod paytable;
pub mod reels;
pub mod rng;
pub mod spin;
pub mod symbols;

pub use config::*;
pub use engine::*;
pub use events::*;
pub use paytable::*;
pub use reels::*;
pub use rng::*;
pub use spin::*;
pub use symbols::*;
