//! State and events of the explorer page.
//!
//! - `event`: user events (`AppEvent`) and the views they can ask for.
//! - `app_state`: the state container owned by the event loop and its transitions.
pub mod app_state;
pub mod event;
