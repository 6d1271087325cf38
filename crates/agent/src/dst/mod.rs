//! Dialogue State Tracking for the reservation form
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ReservationDraft                         │
//! │  - one Option<String> per slot, in collection order         │
//! │  - next missing slot, completeness                          │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    CrossTurnState                           │
//! │  - accepted arrival date, read by departure validation      │
//! │  - cleared once a departure date is accepted                │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod draft;
pub mod state;

pub use draft::ReservationDraft;
pub use state::CrossTurnState;
