//! Contact form state.
//!
//! Three editable fields, one focus, one submission state. Submission
//! itself lives in [`crate::services::submit`]; this module only owns
//! what the user sees and types.

use crate::services::submit::ContactPayload;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Message => "Message",
        }
    }

    fn next(&self) -> FormField {
        match self {
            FormField::Name => FormField::Email,
            FormField::Email => FormField::Message,
            FormField::Message => FormField::Name,
        }
    }

    fn prev(&self) -> FormField {
        match self {
            FormField::Name => FormField::Message,
            FormField::Email => FormField::Name,
            FormField::Message => FormField::Email,
        }
    }
}

/// Rendered as one line of text under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Pending,
    Success(String),
    Failure(String),
}

#[derive(Debug, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    focus: Option<FormField>,
    state: SubmitState,
}

impl Default for SubmitState {
    fn default() -> Self {
        SubmitState::Idle
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> Option<FormField> {
        self.focus
    }

    /// True while keystrokes should edit the form instead of navigating
    /// the page.
    pub fn is_editing(&self) -> bool {
        self.focus.is_some()
    }

    pub fn focus_first(&mut self) {
        self.focus = Some(FormField::Name);
    }

    pub fn focus_next(&mut self) {
        self.focus = Some(match self.focus {
            None => FormField::Name,
            Some(f) => f.next(),
        });
    }

    pub fn focus_prev(&mut self) {
        self.focus = Some(match self.focus {
            None => FormField::Message,
            Some(f) => f.prev(),
        });
    }

    pub fn blur(&mut self) {
        self.focus = None;
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(field) = self.focus {
            self.field_mut(field).push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focus {
            self.field_mut(field).pop();
        }
    }

    pub fn field_value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Message => &self.message,
        }
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Message => &mut self.message,
        }
    }

    pub fn payload(&self) -> ContactPayload {
        ContactPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
        }
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    pub fn set_state(&mut self, state: SubmitState) {
        self.state = state;
    }

    /// Clear the fields after an accepted submission.
    pub fn clear_fields(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
    }
}
