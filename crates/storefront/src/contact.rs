//! Contact form validation.
//!
//! Delivery of the message is handled by an external mail service; this
//! module only decides whether a submission is complete and shapes the
//! fields that get sent.

use std::collections::BTreeMap;

use mrseafarm_core::Email;
use serde::{Deserialize, Serialize};

/// Placeholder sent when the optional phone number is left blank.
pub const PHONE_NOT_PROVIDED: &str = "Not provided";

/// A contact form submission as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
}

/// A submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub message: String,
}

/// Per-field validation messages, keyed by form field name.
pub type ContactErrors = BTreeMap<&'static str, &'static str>;

impl ContactForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns every failing field with the message to show beside it.
    pub fn validate(&self) -> Result<ContactMessage, ContactErrors> {
        let mut errors = ContactErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert("name", "Name is required");
        }

        // Blank means missing, but padding around an address is not accepted.
        let parsed_email = if self.email.trim().is_empty() {
            errors.insert("email", "Email is required");
            None
        } else if let Ok(parsed) = Email::parse(&self.email) {
            Some(parsed)
        } else {
            errors.insert("email", "Invalid email format");
            None
        };

        let message = self.message.trim();
        if message.is_empty() {
            errors.insert("message", "Message is required");
        }

        match parsed_email {
            Some(email) if errors.is_empty() => Ok(ContactMessage {
                name: name.to_owned(),
                email,
                phone: self
                    .phone
                    .as_deref()
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .unwrap_or(PHONE_NOT_PROVIDED)
                    .to_owned(),
                message: message.to_owned(),
            }),
            _ => Err(errors),
        }
    }
}

impl ContactMessage {
    /// Plain-text body for the shop inbox.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        format!(
            "New contact form submission\n\nName: {}\nEmail: {}\nPhone: {}\n\nMessage:\n{}",
            self.name, self.email, self.phone, self.message
        )
    }
}
