//! Lead-capture forms: the contact page form and the free quote request.
//!
//! Submitted fields are trimmed, checked, and turned into an
//! [`OutboundMessage`] for the email relay.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const NAME_MAX: usize = 100;
const EMAIL_MAX: usize = 255;
const SUBJECT_MAX: usize = 200;
const MESSAGE_MAX: usize = 2000;

// Leading dots and consecutive dots are rejected separately
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .unwrap()
});

/// Which form a lead came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadKind {
    /// Contact page form
    Contact,
    /// Free quote request
    Quote,
}

impl LeadKind {
    /// Subject used when the submitter gives none.
    #[must_use]
    pub const fn default_subject(self) -> &'static str {
        match self {
            Self::Contact => "Contact Form Submission",
            Self::Quote => "Free Quote Request",
        }
    }

    /// Text shown after a successful send.
    #[must_use]
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::Contact => "Message sent successfully! We'll get back to you soon.",
            Self::Quote => "Quote request sent! We'll get back to you soon.",
        }
    }

    /// Text shown when the relay fails.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Contact => "Failed to send message. Please try again or call us directly.",
            Self::Quote => "Failed to send request. Please try again or call us directly.",
        }
    }
}

/// Validation failures keyed by field name, one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("{} form field(s) failed validation", .0.len())]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    fn add(&mut self, field: &'static str, message: &str) {
        self.0.entry(field).or_insert_with(|| message.to_string());
    }

    /// Message for a field, if it failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// True if no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// A validated message ready to relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    /// Originating form
    pub kind: LeadKind,
    /// Submitter name
    pub from_name: String,
    /// Submitter email
    pub reply_to: String,
    /// Subject line
    pub subject: String,
    /// Message body
    pub message: String,
}

/// Contact page form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    /// Your Name *
    pub name: String,
    /// Your Email *
    pub email: String,
    /// Subject
    pub subject: Option<String>,
    /// Your Message *
    pub message: String,
}

impl ContactForm {
    /// Checks the form and builds the outbound message.
    pub fn validate(&self) -> Result<OutboundMessage, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = check_name(&self.name, &mut errors);
        let email = check_email(&self.email, &mut errors);
        let subject = self.subject.as_deref().map(str::trim).unwrap_or_default();
        if subject.chars().count() > SUBJECT_MAX {
            errors.add("subject", "Subject must be less than 200 characters");
        }
        let message = check_message(&self.message, &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        let kind = LeadKind::Contact;
        Ok(OutboundMessage {
            kind,
            from_name: name.to_string(),
            reply_to: email.to_string(),
            subject: if subject.is_empty() {
                kind.default_subject().to_string()
            } else {
                subject.to_string()
            },
            message: message.to_string(),
        })
    }
}

/// Free quote request submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QuoteRequest {
    /// Your Name *
    pub name: String,
    /// Your Email *
    pub email: String,
    /// Project details *
    pub message: String,
}

impl QuoteRequest {
    /// Checks the request and builds the outbound message.
    pub fn validate(&self) -> Result<OutboundMessage, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = check_name(&self.name, &mut errors);
        let email = check_email(&self.email, &mut errors);
        let message = check_message(&self.message, &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        let kind = LeadKind::Quote;
        Ok(OutboundMessage {
            kind,
            from_name: name.to_string(),
            reply_to: email.to_string(),
            subject: kind.default_subject().to_string(),
            message: message.to_string(),
        })
    }
}

fn check_name<'a>(raw: &'a str, errors: &mut FieldErrors) -> &'a str {
    let name = raw.trim();
    if name.is_empty() {
        errors.add("name", "Name is required");
    } else if name.chars().count() > NAME_MAX {
        errors.add("name", "Name must be less than 100 characters");
    }
    name
}

fn check_email<'a>(raw: &'a str, errors: &mut FieldErrors) -> &'a str {
    let email = raw.trim();
    if !is_valid_email(email) {
        errors.add("email", "Please enter a valid email address");
    } else if email.chars().count() > EMAIL_MAX {
        errors.add("email", "Email must be less than 255 characters");
    }
    email
}

fn check_message<'a>(raw: &'a str, errors: &mut FieldErrors) -> &'a str {
    let message = raw.trim();
    if message.is_empty() {
        errors.add("message", "Message is required");
    } else if message.chars().count() > MESSAGE_MAX {
        errors.add("message", "Message must be less than 2000 characters");
    }
    message
}

/// Email syntax check.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_RE.is_match(email)
}
