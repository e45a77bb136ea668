//! List and form state of the todo page, kept in step with the server.
//!
//! There is no incremental cache: every mutation is followed by a full
//! re-fetch of the list, and the re-fetch only starts once the mutation's
//! response has arrived.

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::form::{validate, FieldError, FormValues};
use crate::http::Transport;
use crate::types::Todo;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Update,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub visible: bool,
    pub mode: FormMode,
    pub values: FormValues,
}

/// What happened to a form submission that did not fail outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Invalid(FieldError),
    /// The server answered with an `error`; the form stays open.
    Rejected(String),
    /// The server accepted the change; the form was dismissed.
    Saved(Todo),
}

/// Client-side controller for the todo list page.
pub struct TodoApp<T> {
    client: TodoClient,
    transport: T,
    todos: Vec<Todo>,
    form: FormState,
    field_error: Option<FieldError>,
    process_error: Option<String>,
}

impl<T: Transport> TodoApp<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self {
            client,
            transport,
            todos: Vec::new(),
            form: FormState::default(),
            field_error: None,
            process_error: None,
        }
    }

    /// The list as of the last successful fetch.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Replaces what is typed into the form.
    pub fn set_values(&mut self, values: FormValues) {
        self.form.values = values;
    }

    /// Inline message for the first invalid field, if any.
    pub fn field_error(&self) -> Option<&FieldError> {
        self.field_error.as_ref()
    }

    /// `error` of the last rejected create or edit.
    pub fn process_error(&self) -> Option<&str> {
        self.process_error.as_deref()
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches the whole list and replaces the local copy.
    pub fn refresh(&mut self) -> Result<&[Todo], ApiError> {
        let request = self.client.build_list_todos()?;
        let todos = self.client.parse_list_todos(self.transport.execute(request)?)?;
        tracing::debug!(count = todos.len(), "list refreshed");
        self.todos = todos;
        Ok(&self.todos)
    }

    /// Reads a single todo straight from the server.
    pub fn get_by_id(&mut self, id: i32) -> Result<Todo, ApiError> {
        let request = self.client.build_get_by_id(id)?;
        self.client.parse_get_by_id(self.transport.execute(request)?)
    }

    /// Shows an empty form for a new todo.
    pub fn open_create_form(&mut self) {
        self.form = FormState {
            visible: true,
            mode: FormMode::Create,
            values: FormValues::default(),
        };
        self.clear_errors();
    }

    /// Shows the form pre-filled with a listed todo.
    ///
    /// Returns `false` when `id` is not in the current list.
    pub fn start_update(&mut self, id: i32) -> bool {
        let Some(todo) = self.todos.iter().find(|t| t.id == Some(id)) else {
            return false;
        };
        self.form = FormState {
            visible: true,
            mode: FormMode::Update,
            values: FormValues::from(todo),
        };
        self.clear_errors();
        true
    }

    pub fn cancel_form(&mut self) {
        self.form.visible = false;
        self.form.mode = FormMode::Create;
    }

    /// Validates and sends the form, then re-fetches the list.
    ///
    /// Invalid input is reported without any request. A response whose
    /// `error` is set keeps the form open; otherwise the form is dismissed.
    /// The form reflects the mutation's response even when the re-fetch
    /// that follows fails; that failure is still returned as `Err`.
    pub fn submit(&mut self) -> Result<SubmitOutcome, ApiError> {
        let valid = match validate(&self.form.values) {
            Ok(valid) => valid,
            Err(err) => {
                tracing::debug!(field = ?err.field, "form rejected locally");
                self.field_error = Some(err.clone());
                self.process_error = None;
                return Ok(SubmitOutcome::Invalid(err));
            }
        };
        self.field_error = None;

        let todo = match self.form.mode {
            FormMode::Create => {
                let request = self.client.build_create_todo(&valid.to_create())?;
                self.client.parse_create_todo(self.transport.execute(request)?)?
            }
            FormMode::Update => {
                let request = self.client.build_edit_todo(&valid.to_edit())?;
                self.client.parse_edit_todo(self.transport.execute(request)?)?
            }
        };

        let outcome = match todo.error.clone() {
            Some(error) => {
                tracing::debug!(%error, "server rejected submission");
                self.process_error = Some(error.clone());
                SubmitOutcome::Rejected(error)
            }
            None => {
                self.process_error = None;
                self.form = FormState::default();
                SubmitOutcome::Saved(todo)
            }
        };
        self.refresh()?;
        Ok(outcome)
    }

    /// Deletes a todo, then re-fetches the list.
    pub fn delete(&mut self, id: i32) -> Result<bool, ApiError> {
        let request = self.client.build_delete_todo(Some(id))?;
        let deleted = self.client.parse_delete_todo(self.transport.execute(request)?)?;
        self.refresh()?;
        Ok(deleted)
    }

    fn clear_errors(&mut self) {
        self.field_error = None;
        self.process_error = None;
    }
}
