//! View-state machine for the displayed month.
//!
//! The machine is pure: every transition is a method call that mutates the
//! struct and hands back the remote work the caller must run. The event
//! cache is replaced wholesale by a completed fetch and never patched in
//! place; a failed fetch keeps the previous cache so the grid stays
//! populated while the failure is reported.

use chrono::NaiveDate;

use crate::error::{StoreError, StoreResult};
use crate::event::CalendarEvent;
use crate::month::{GridCell, MonthCursor, month_grid};

/// Remote work requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCommand {
    /// Fetch every event in the cursor's month.
    FetchMonth(MonthCursor),
}

/// Load state of the displayed month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing requested yet.
    Idle,
    /// A month fetch is outstanding.
    Loading,
    /// The cache mirrors the last successful fetch.
    Ready,
    /// The last fetch failed; the cache is from before it.
    Failed,
}

/// Navigation cursor, load state and event cache for the month grid.
#[derive(Debug)]
pub struct MonthView {
    cursor: MonthCursor,
    state: LoadState,
    events: Vec<CalendarEvent>,
}

impl MonthView {
    pub fn new(cursor: MonthCursor) -> Self {
        MonthView {
            cursor,
            state: LoadState::Idle,
            events: Vec::new(),
        }
    }

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    /// Request the initial fetch for the starting month.
    pub fn open(&mut self) -> ViewCommand {
        self.state = LoadState::Loading;
        ViewCommand::FetchMonth(self.cursor)
    }

    pub fn prev_month(&mut self) -> ViewCommand {
        self.show(self.cursor.prev())
    }

    pub fn next_month(&mut self) -> ViewCommand {
        self.show(self.cursor.next())
    }

    fn show(&mut self, cursor: MonthCursor) -> ViewCommand {
        self.cursor = cursor;
        self.state = LoadState::Loading;
        ViewCommand::FetchMonth(cursor)
    }

    /// Apply a completed month fetch.
    ///
    /// Completions for a month other than the displayed one belong to a
    /// fetch issued before a navigation and are dropped. Returns the error
    /// to surface when the fetch failed; the cache is left untouched then.
    pub fn month_loaded(
        &mut self,
        cursor: MonthCursor,
        result: StoreResult<Vec<CalendarEvent>>,
    ) -> Option<StoreError> {
        if cursor != self.cursor {
            return None;
        }
        match result {
            Ok(events) => {
                self.events = events;
                self.state = LoadState::Ready;
                None
            }
            Err(err) => {
                self.state = LoadState::Failed;
                Some(err)
            }
        }
    }

    /// Re-fetch the displayed month after a completed mutation.
    pub fn reconcile(&mut self) -> ViewCommand {
        self.state = LoadState::Loading;
        ViewCommand::FetchMonth(self.cursor)
    }

    /// The padded grid for the displayed month.
    pub fn grid(&self) -> Vec<GridCell> {
        month_grid(self.cursor)
    }

    /// First cached event on `date`, if any.
    pub fn event_on(&self, date: NaiveDate) -> Option<&CalendarEvent> {
        crate::month::event_on(&self.events, date)
    }

    /// All cached events on `date`.
    pub fn events_on(&self, date: NaiveDate) -> impl Iterator<Item = &CalendarEvent> {
        crate::month::events_on(&self.events, date)
    }
}
