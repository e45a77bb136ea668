//! Client-side validation of the create/update form.
//!
//! Runs before any request is built. Checks happen in a fixed order and
//! stop at the first failure, so at most one inline message is shown.

use crate::types::{CreateTodo, EditTodo, Todo};

/// Raw form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub id: Option<String>,
    pub description: Option<String>,
    pub is_finished: bool,
}

impl FormValues {
    pub fn new(id: &str, description: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            description: Some(description.to_string()),
            is_finished: false,
        }
    }
}

impl From<&Todo> for FormValues {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.map(|id| id.to_string()),
            description: todo.description.clone(),
            is_finished: todo.is_finished.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    Required,
    IsNumber,
}

/// An inline message attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FieldError {
    pub field: Field,
    pub kind: FieldErrorKind,
    pub message: &'static str,
}

impl FieldError {
    const ID_REQUIRED: Self = Self {
        field: Field::Id,
        kind: FieldErrorKind::Required,
        message: "* Id is required",
    };

    const ID_NOT_A_NUMBER: Self = Self {
        field: Field::Id,
        kind: FieldErrorKind::IsNumber,
        message: "* Id must be a number",
    };

    const DESCRIPTION_REQUIRED: Self = Self {
        field: Field::Description,
        kind: FieldErrorKind::Required,
        message: "* description is required",
    };
}

/// Form input that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTodo {
    pub id: i32,
    pub description: String,
    pub is_finished: bool,
}

impl ValidTodo {
    pub fn to_create(&self) -> CreateTodo {
        CreateTodo {
            id: self.id,
            description: self.description.clone(),
        }
    }

    pub fn to_edit(&self) -> EditTodo {
        EditTodo {
            id: self.id,
            description: self.description.clone(),
            is_finished: self.is_finished,
        }
    }
}

/// Validates the form: id present, id an integer, description present.
pub fn validate(values: &FormValues) -> Result<ValidTodo, FieldError> {
    let id = values
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(FieldError::ID_REQUIRED)?;
    let id: i32 = id.parse().map_err(|_| FieldError::ID_NOT_A_NUMBER)?;

    let description = values
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .ok_or(FieldError::DESCRIPTION_REQUIRED)?;

    Ok(ValidTodo {
        id,
        description: description.to_string(),
        is_finished: values.is_finished,
    })
}
