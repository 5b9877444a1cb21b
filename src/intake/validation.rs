use crate::{
    error::{IntakeError, Result},
    models::{Category, Priority},
};

/// Raw form fields as the UI collected them.
#[derive(Debug, Clone, Default)]
pub struct FeedbackForm {
    pub text: String,
    pub category: String,
    pub priority: String,
}

/// A submission that passed validation; `text` is already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFeedback {
    pub text: String,
    pub category: Category,
    pub priority: Priority,
}

impl FeedbackForm {
    pub fn new(
        text: impl Into<String>,
        category: impl Into<String>,
        priority: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
            priority: priority.into(),
        }
    }

    pub fn validate(&self) -> Result<ValidatedFeedback> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(IntakeError::validation("text", "Please fill in all fields"));
        }

        let category = required("category", &self.category)?
            .parse::<Category>()
            .map_err(|message| IntakeError::validation("category", message))?;
        let priority = required("priority", &self.priority)?
            .parse::<Priority>()
            .map_err(|message| IntakeError::validation("priority", message))?;

        Ok(ValidatedFeedback {
            text: text.to_string(),
            category,
            priority,
        })
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        Err(IntakeError::validation(field, "Please fill in all fields"))
    } else {
        Ok(value)
    }
}
