//! Editor state machine for the selected day's entry.
//!
//! The editor opens on a day click, prefilled from the month cache, and
//! walks through view/edit/create sub-modes. Submitting produces a mutation
//! intent for the caller to run against the store; the editor itself never
//! touches the network, so a failed mutation simply leaves it in its
//! current mode with the fields intact.

use chrono::NaiveDate;

use crate::error::{StoreError, StoreResult};
use crate::event::{CalendarEvent, EventDraft};

/// Which sub-form the modal is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// An entry exists; read-only view.
    Viewing,
    /// Form fields open over an existing entry.
    Editing,
    /// No entry on this day; create form.
    Empty,
}

/// Form field holding input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
}

/// Mutation requested by a submitted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorIntent {
    Create(EventDraft),
    Update { id: i64, draft: EventDraft },
    Delete { id: i64 },
}

/// Modal state for one selected day.
#[derive(Debug)]
pub struct Editor {
    date: NaiveDate,
    stored: Option<CalendarEvent>,
    mode: EditorMode,
    title: String,
    description: String,
    focus: Field,
}

impl Editor {
    /// Open the modal for `date`, prefilled from the cached entry if any.
    pub fn open(date: NaiveDate, stored: Option<CalendarEvent>) -> Self {
        match stored {
            Some(event) => Editor {
                date,
                title: event.title.clone(),
                description: event.description.clone(),
                stored: Some(event),
                mode: EditorMode::Viewing,
                focus: Field::Title,
            },
            None => Editor {
                date,
                stored: None,
                mode: EditorMode::Empty,
                title: String::new(),
                description: String::new(),
                focus: Field::Title,
            },
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    /// Whether the form fields accept input.
    pub fn is_editing(&self) -> bool {
        matches!(self.mode, EditorMode::Editing | EditorMode::Empty)
    }

    /// Switch from the read-only view to the edit form.
    pub fn begin_edit(&mut self) {
        if self.mode == EditorMode::Viewing {
            self.mode = EditorMode::Editing;
            self.focus = Field::Title;
        }
    }

    /// Leave the edit form, restoring the fields to the stored entry.
    pub fn cancel_edit(&mut self) {
        if self.mode == EditorMode::Editing {
            if let Some(event) = &self.stored {
                self.title = event.title.clone();
                self.description = event.description.clone();
            }
            self.mode = EditorMode::Viewing;
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Field::Title => Field::Description,
            Field::Description => Field::Title,
        };
    }

    pub fn insert_char(&mut self, c: char) {
        if !self.is_editing() {
            return;
        }
        match self.focus {
            Field::Title => self.title.push(c),
            Field::Description => self.description.push(c),
        }
    }

    pub fn delete_char(&mut self) {
        if !self.is_editing() {
            return;
        }
        match self.focus {
            Field::Title => {
                self.title.pop();
            }
            Field::Description => {
                self.description.pop();
            }
        }
    }

    /// Validate the form and produce the mutation to run.
    ///
    /// Fails with `EmptyEvent` before any intent is produced, leaving the
    /// fields untouched; no remote call happens for an invalid form.
    pub fn submit(&self) -> StoreResult<EditorIntent> {
        let draft = self.draft();
        draft.validate()?;
        match self.mode {
            EditorMode::Empty => Ok(EditorIntent::Create(draft)),
            EditorMode::Editing => {
                let id = self.stored_id().ok_or(StoreError::NoSelection)?;
                Ok(EditorIntent::Update { id, draft })
            }
            EditorMode::Viewing => Err(StoreError::NoSelection),
        }
    }

    /// Request deletion of the stored entry.
    pub fn request_delete(&self) -> StoreResult<EditorIntent> {
        match self.stored_id() {
            Some(id) if self.mode == EditorMode::Viewing => Ok(EditorIntent::Delete { id }),
            _ => Err(StoreError::NoSelection),
        }
    }

    fn draft(&self) -> EventDraft {
        EventDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            date: self.date,
        }
    }

    fn stored_id(&self) -> Option<i64> {
        self.stored.as_ref().and_then(|e| e.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn stored_event() -> CalendarEvent {
        CalendarEvent {
            id: Some(7),
            title: "A".to_string(),
            description: "details".to_string(),
            date: day(),
        }
    }

    fn type_text(editor: &mut Editor, text: &str) {
        for c in text.chars() {
            editor.insert_char(c);
        }
    }

    #[test]
    fn opening_with_an_entry_starts_viewing_prefilled() {
        let editor = Editor::open(day(), Some(stored_event()));
        assert_eq!(editor.mode(), EditorMode::Viewing);
        assert_eq!(editor.title(), "A");
        assert_eq!(editor.description(), "details");
        assert!(!editor.is_editing());
    }

    #[test]
    fn opening_without_an_entry_starts_the_create_form() {
        let editor = Editor::open(day(), None);
        assert_eq!(editor.mode(), EditorMode::Empty);
        assert_eq!(editor.title(), "");
        assert!(editor.is_editing());
    }

    #[test]
    fn cancel_restores_the_pre_edit_snapshot() {
        let mut editor = Editor::open(day(), Some(stored_event()));
        editor.begin_edit();
        assert_eq!(editor.mode(), EditorMode::Editing);

        editor.delete_char();
        type_text(&mut editor, "B");
        assert_eq!(editor.title(), "B");

        editor.cancel_edit();
        assert_eq!(editor.mode(), EditorMode::Viewing);
        assert_eq!(editor.title(), "A");
        assert_eq!(editor.description(), "details");
    }

    #[test]
    fn blank_form_is_rejected_before_any_intent() {
        let editor = Editor::open(day(), None);
        assert_eq!(editor.submit(), Err(StoreError::EmptyEvent));

        let mut editor = Editor::open(day(), None);
        type_text(&mut editor, "   ");
        assert_eq!(editor.submit(), Err(StoreError::EmptyEvent));
    }

    #[test]
    fn submitting_the_create_form_yields_a_create_intent() {
        let mut editor = Editor::open(day(), None);
        type_text(&mut editor, "Dentist");
        editor.toggle_focus();
        type_text(&mut editor, "bring the referral letter");

        let intent = editor.submit().unwrap();
        assert_eq!(
            intent,
            EditorIntent::Create(EventDraft {
                title: "Dentist".to_string(),
                description: "bring the referral letter".to_string(),
                date: day(),
            })
        );
    }

    #[test]
    fn submitting_an_edit_yields_an_update_for_the_stored_id() {
        let mut editor = Editor::open(day(), Some(stored_event()));
        editor.begin_edit();
        editor.delete_char();
        type_text(&mut editor, "B");

        match editor.submit().unwrap() {
            EditorIntent::Update { id, draft } => {
                assert_eq!(id, 7);
                assert_eq!(draft.title, "B");
                assert_eq!(draft.date, day());
            }
            other => panic!("expected an update intent, got {other:?}"),
        }
    }

    #[test]
    fn delete_requires_a_persisted_entry() {
        let editor = Editor::open(day(), None);
        assert_eq!(editor.request_delete(), Err(StoreError::NoSelection));

        let mut unsaved = stored_event();
        unsaved.id = None;
        let editor = Editor::open(day(), Some(unsaved));
        assert_eq!(editor.request_delete(), Err(StoreError::NoSelection));

        let editor = Editor::open(day(), Some(stored_event()));
        assert_eq!(
            editor.request_delete(),
            Ok(EditorIntent::Delete { id: 7 })
        );
    }

    #[test]
    fn input_goes_to_the_focused_field_only_while_editing() {
        let mut editor = Editor::open(day(), Some(stored_event()));
        type_text(&mut editor, "ignored");
        assert_eq!(editor.title(), "A", "viewing mode takes no input");

        editor.begin_edit();
        assert_eq!(editor.focus(), Field::Title);
        type_text(&mut editor, "!");
        editor.toggle_focus();
        assert_eq!(editor.focus(), Field::Description);
        type_text(&mut editor, "!");
        assert_eq!(editor.title(), "A!");
        assert_eq!(editor.description(), "details!");
    }
}
