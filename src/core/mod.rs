//! # Core Application Logic
//!
//! This module contains the post browser's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • App (state)          │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • screens + queries    │
//!                    │                         │
//!                    │  No I/O. No UI.         │
//!                    └───────────┬─────────────┘
//!                                │ Effect::Fetch
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │    API     │
//!     │  Adapter   │ ── spawns requests ────▶ │  (reqwest) │
//!     │ (ratatui)  │ ◀── Action::*Fetched ─── │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`navigation`]: Routes and the screen stack
//! - [`screen`]: The list and detail screens and their view projections
//! - [`query`]: Per-screen keyed request state
//! - [`config`]: Settings resolution

pub mod action;
pub mod config;
pub mod navigation;
pub mod query;
pub mod screen;
pub mod state;
