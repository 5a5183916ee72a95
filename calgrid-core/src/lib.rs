//! Core types for the calgrid month calendar.
//!
//! This crate provides the parts of the calendar that need no I/O:
//! - `CalendarEvent` and `EventDraft`, matching the remote store's wire shape
//! - `month` for the cursor and the padded day grid
//! - `view` and `editor`, the state machines driven by the `calgrid` binary
//!
//! Every transition in the state machines is a plain method call that hands
//! any required remote work back to the caller, so the whole crate is
//! testable without a network or a terminal.

pub mod editor;
pub mod error;
pub mod event;
pub mod month;
pub mod view;

pub use editor::{Editor, EditorIntent, EditorMode, Field};
pub use error::{StoreError, StoreResult};
pub use event::{CalendarEvent, EventDraft};
pub use month::{MonthCursor, month_grid};
pub use view::{LoadState, MonthView, ViewCommand};
