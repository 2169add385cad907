//! # Core Application Logic
//!
//! This module contains Cardraw's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Deck (load/merge)    │
//!                    │  • draw() (lookup)      │
//!                    │  • State + update()     │
//!                    │                         │
//!                    │  No terminal. Pure.     │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │    CLI     │
//!     │  Adapter   │                          │ draw/merge │
//!     │ (ratatui)  │                          │  (clap)    │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`deck`]: The `Deck` model, JSON load and save
//! - [`merge`]: Merging two deck documents
//! - [`draw`]: The draw engine and its random index sources
//! - [`display`]: Text for a draw result
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: Config file, env and CLI resolution

pub mod action;
pub mod config;
pub mod deck;
pub mod display;
pub mod draw;
pub mod merge;
pub mod state;

// Re-export commonly used types for convenience
pub use deck::{CategoryDeck, Deck, LoadError};
pub use draw::{DrawResult, IndexSource, draw};
