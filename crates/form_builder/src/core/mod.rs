//! Core of the interactive app: root state, reducer, effects and the
//! background executor. The event loop in `app.rs` feeds actions through
//! `reducer::reduce` and interprets the returned effects.
pub mod effects;
pub mod executor;
pub mod reducer;
pub mod state;
