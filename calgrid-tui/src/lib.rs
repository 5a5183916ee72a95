//! Terminal month-calendar client over a remote event store.
//!
//! `client` wraps the store's REST endpoints, `app` owns the application
//! state and the event loop, `ui` renders the month grid and the day modal.

pub mod app;
pub mod client;
pub mod ui;
