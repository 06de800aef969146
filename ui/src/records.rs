//! Record table and editor state for the selected collection.
//!
//! Every list load is tagged with a [`LoadTicket`]. Only the result of the
//! most recent load is applied, so a slow response for a previously
//! selected collection can never replace the current one.

use chrono::NaiveDate;

use crate::form::{FormState, RequiredPolicy, SaveError};
use crate::schema::CollectionSchema;
use crate::types::{Record, RecordId};

pub const DELETE_FAILED: &str = "Error deleting record";
pub const SAVE_SUCCEEDED: &str = "Record saved successfully!";
pub const MISSING_ID: &str = "Record has no identifier";

// ============================================================================
// List State
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum RecordsView {
    NoCollection,
    Loading { collection: String },
    Loaded { collection: String, records: Vec<Record> },
    Failed { collection: String, message: String },
}

/// Handle for one in-flight list request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    pub collection: String,
}

// ============================================================================
// Editor State
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Editor {
    #[default]
    Closed,
    Adding(FormState),
    Editing { id: RecordId, form: FormState },
}

impl Editor {
    pub fn is_open(&self) -> bool {
        !matches!(self, Editor::Closed)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Editor::Editing { .. } => "Edit Record",
            _ => "Add New Record",
        }
    }

    pub fn form(&self) -> Option<&FormState> {
        match self {
            Editor::Closed => None,
            Editor::Adding(form) | Editor::Editing { form, .. } => Some(form),
        }
    }

    fn form_mut(&mut self) -> Option<&mut FormState> {
        match self {
            Editor::Closed => None,
            Editor::Adding(form) | Editor::Editing { form, .. } => Some(form),
        }
    }
}

/// A validated write, ready to be sent
#[derive(Clone, Debug, PartialEq)]
pub enum WriteRequest {
    Create { collection: String, payload: Record },
    Update { collection: String, id: RecordId, payload: Record },
}

impl WriteRequest {
    pub fn collection(&self) -> &str {
        match self {
            WriteRequest::Create { collection, .. } | WriteRequest::Update { collection, .. } => collection,
        }
    }
}

// ============================================================================
// Combined State
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct RecordsState {
    view: RecordsView,
    generation: u64,
    /// Bumped on every change to `view`; editor changes leave it alone
    revision: u64,
    pub editor: Editor,
    pub saving: bool,
    pub save_error: Option<String>,
    pub delete_target: Option<RecordId>,
    pub deleting: bool,
}

impl Default for RecordsState {
    fn default() -> Self {
        Self {
            view: RecordsView::NoCollection,
            generation: 0,
            revision: 0,
            editor: Editor::Closed,
            saving: false,
            save_error: None,
            delete_target: None,
            deleting: false,
        }
    }
}

impl RecordsState {
    pub fn view(&self) -> &RecordsView {
        &self.view
    }

    pub fn collection(&self) -> Option<&str> {
        match &self.view {
            RecordsView::NoCollection => None,
            RecordsView::Loading { collection }
            | RecordsView::Loaded { collection, .. }
            | RecordsView::Failed { collection, .. } => Some(collection),
        }
    }

    pub fn records(&self) -> &[Record] {
        match &self.view {
            RecordsView::Loaded { records, .. } => records,
            _ => &[],
        }
    }

    pub fn view_revision(&self) -> u64 {
        self.revision
    }

    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        matches!(self.view, RecordsView::Loading { .. })
    }

    /// Column set for the current list
    pub fn schema(&self, declared: Option<&[String]>, id_field: &str) -> Option<CollectionSchema> {
        self.collection()?;
        CollectionSchema::resolve(declared, self.records(), id_field)
    }

    /// Drop everything that belongs to the previous collection.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.set_view(RecordsView::NoCollection);
        self.reset_editing();
    }

    /// Switch to (or reload) `collection`. The current list is cleared
    /// right away.
    pub fn begin_load(&mut self, collection: &str) -> LoadTicket {
        if self.collection() != Some(collection) {
            self.reset_editing();
        }
        self.generation += 1;
        self.set_view(RecordsView::Loading {
            collection: collection.to_string(),
        });
        LoadTicket {
            generation: self.generation,
            collection: collection.to_string(),
        }
    }

    /// Apply a list response. Returns `false` for stale tickets.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<Record>, String>) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.set_view(match result {
            Ok(records) => RecordsView::Loaded {
                collection: ticket.collection,
                records,
            },
            Err(message) => RecordsView::Failed {
                collection: ticket.collection,
                message,
            },
        });
        true
    }

    fn set_view(&mut self, view: RecordsView) {
        self.view = view;
        self.revision += 1;
    }

    fn reset_editing(&mut self) {
        self.editor = Editor::Closed;
        self.saving = false;
        self.save_error = None;
        self.delete_target = None;
        self.deleting = false;
    }

    // ------------------------------------------------------------------
    // Create / Edit
    // ------------------------------------------------------------------

    /// Open the dialog in add mode. Needs a field list to build the form.
    pub fn handle_add_new(&mut self, schema: Option<&CollectionSchema>, today: NaiveDate) -> bool {
        match schema {
            Some(schema) if !schema.is_empty() && self.collection().is_some() => {
                self.editor = Editor::Adding(FormState::for_create(&schema.fields, today));
                self.save_error = None;
                true
            }
            _ => false,
        }
    }

    /// Open the dialog in edit mode with a clone of `record`.
    pub fn handle_edit(&mut self, record: &Record, id_field: &str) -> Result<(), &'static str> {
        let id = RecordId::of(record, id_field).ok_or(MISSING_ID)?;
        self.editor = Editor::Editing {
            id,
            form: FormState::for_edit(record),
        };
        self.save_error = None;
        Ok(())
    }

    pub fn update_field(&mut self, field: &str, value: String) {
        if let Some(form) = self.editor.form_mut() {
            form.set(field, value);
        }
    }

    /// Cancel: discard the form.
    pub fn close_editor(&mut self) {
        self.editor = Editor::Closed;
        self.saving = false;
        self.save_error = None;
    }

    /// Validate the form and build the request. Local failures are stored
    /// as the dialog error and no request is produced.
    pub fn prepare_save(&mut self, id_field: &str, policy: RequiredPolicy) -> Result<WriteRequest, SaveError> {
        let result = self.build_write(id_field, policy);
        match &result {
            Ok(_) => {
                self.saving = true;
                self.save_error = None;
            }
            Err(err) => self.save_error = Some(err.to_string()),
        }
        result
    }

    fn build_write(&self, id_field: &str, policy: RequiredPolicy) -> Result<WriteRequest, SaveError> {
        let collection = self.collection().ok_or(SaveError::NoCollection)?.to_string();
        match &self.editor {
            Editor::Closed => Err(SaveError::EmptyPayload),
            Editor::Adding(form) => Ok(WriteRequest::Create {
                collection,
                payload: form.payload(id_field, policy)?,
            }),
            Editor::Editing { id, form } => Ok(WriteRequest::Update {
                collection,
                id: id.clone(),
                payload: form.payload(id_field, policy)?,
            }),
        }
    }

    /// The write went through: close the dialog and reload the list.
    pub fn save_succeeded(&mut self, collection: &str) -> Option<LoadTicket> {
        if self.collection() != Some(collection) {
            return None;
        }
        self.close_editor();
        Some(self.begin_load(collection))
    }

    /// The write failed: keep the dialog and the user's input.
    pub fn save_failed(&mut self, message: &str) {
        self.saving = false;
        self.save_error = Some(format!("Error saving record: {}", message));
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Ask for confirmation before deleting `record`.
    pub fn request_delete(&mut self, record: &Record, id_field: &str) -> Result<(), &'static str> {
        let id = RecordId::of(record, id_field).ok_or(MISSING_ID)?;
        self.delete_target = Some(id);
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.delete_target = None;
        self.deleting = false;
    }

    /// Confirmed: returns what to delete.
    pub fn confirm_delete(&mut self) -> Option<(String, RecordId)> {
        let collection = self.collection()?.to_string();
        let id = self.delete_target.clone()?;
        self.deleting = true;
        Some((collection, id))
    }

    pub fn delete_succeeded(&mut self, collection: &str) -> Option<LoadTicket> {
        self.cancel_delete();
        if self.collection() != Some(collection) {
            return None;
        }
        Some(self.begin_load(collection))
    }

    /// No optimistic removal happened, so only the dialog state changes.
    pub fn delete_failed(&mut self) {
        self.cancel_delete();
    }
}

// ============================================================================
// Success Banner
// ============================================================================

/// Transient success message. Each `show` supersedes the previous one, so
/// an expiry issued for an older message leaves the newer one in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Notice {
    message: Option<String>,
    serial: u64,
}

impl Notice {
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Display `message`; returns the serial to pass to [`Notice::expire`].
    pub fn show(&mut self, message: impl Into<String>) -> u64 {
        self.serial += 1;
        self.message = Some(message.into());
        self.serial
    }

    /// Hide the message shown under `serial`, if it is still the current one.
    pub fn expire(&mut self, serial: u64) {
        if serial == self.serial {
            self.message = None;
        }
    }
}
