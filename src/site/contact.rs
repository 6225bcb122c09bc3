use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::toast::Severity;

pub const RECIPIENT_EMAIL: &str = "hello@portfolio.dev";
pub const EMAILJS_SEND_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";
pub const PLACEHOLDER_PUBLIC_KEY: &str = "YOUR_EMAILJS_PUBLIC_KEY";
pub const FORM_RESET_MS: u32 = 3_000;
pub const SIMULATED_DELIVERY_MS: u32 = 1_500;

pub const INVALID_FORM_MESSAGE: &str = "Please fill in all required fields correctly.";
pub const SENT_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";
pub const FAILED_MESSAGE: &str = "Failed to send message. Please try again or email me directly.";

const NAME_MIN_CHARS: usize = 2;
const SUBJECT_MIN_CHARS: usize = 3;
const MESSAGE_MIN_CHARS: usize = 10;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name must have at least 2 characters")]
    NameTooShort,
    #[error("email address is malformed")]
    InvalidEmail,
    #[error("subject must have at least 3 characters")]
    SubjectTooShort,
    #[error("message must have at least 10 characters")]
    MessageTooShort,
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("delivery request failed: {0}")]
    Transport(String),
    #[error("delivery service answered with status {0}")]
    Status(u16),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl FormSubmission {
    pub fn template_params(&self) -> TemplateParams<'_> {
        TemplateParams {
            to_email: RECIPIENT_EMAIL,
            from_name: &self.name,
            from_email: &self.email,
            subject: &self.subject,
            message: &self.message,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct TemplateParams<'a> {
    pub to_email: &'a str,
    pub from_name: &'a str,
    pub from_email: &'a str,
    pub subject: &'a str,
    pub message: &'a str,
}

#[derive(Clone, Debug, Serialize)]
pub struct EmailJsRequest<'a> {
    pub service_id: &'a str,
    pub template_id: &'a str,
    pub user_id: &'a str,
    pub template_params: TemplateParams<'a>,
}

/// Delivery service identifiers, as published by the environment endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryCredentials {
    #[serde(rename = "VITE_EMAILJS_SERVICE_ID", default)]
    pub service_id: String,
    #[serde(rename = "VITE_EMAILJS_TEMPLATE_ID", default)]
    pub template_id: String,
    #[serde(rename = "VITE_EMAILJS_PUBLIC_KEY", default)]
    pub public_key: String,
}

impl DeliveryCredentials {
    pub fn is_configured(&self) -> bool {
        !self.service_id.is_empty()
            && !self.template_id.is_empty()
            && !self.public_key.is_empty()
            && self.public_key != PLACEHOLDER_PUBLIC_KEY
    }

    pub fn presence(value: &str) -> &'static str {
        if value.is_empty() {
            "empty"
        } else {
            "set"
        }
    }

    pub fn plan<'a>(&'a self, submission: &'a FormSubmission) -> DeliveryPlan<'a> {
        if !self.is_configured() {
            return DeliveryPlan::Simulate {
                delay_ms: SIMULATED_DELIVERY_MS,
            };
        }

        DeliveryPlan::Send(EmailJsRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            template_params: submission.template_params(),
        })
    }
}

#[derive(Clone, Debug)]
pub enum DeliveryPlan<'a> {
    Send(EmailJsRequest<'a>),
    /// No credentials: log the payload and pretend after a short pause.
    Simulate { delay_ms: u32 },
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn is_plausible_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain
            .char_indices()
            .any(|(index, ch)| ch == '.' && index > 0 && index + 1 < domain.len())
}

pub fn validate(fields: &ContactFields) -> Result<FormSubmission, ValidationError> {
    let name = fields.name.trim();
    let email = fields.email.trim();
    let subject = fields.subject.trim();
    let message = fields.message.trim();

    if char_len(name) < NAME_MIN_CHARS {
        return Err(ValidationError::NameTooShort);
    }
    if !is_plausible_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if char_len(subject) < SUBJECT_MIN_CHARS {
        return Err(ValidationError::SubjectTooShort);
    }
    if char_len(message) < MESSAGE_MIN_CHARS {
        return Err(ValidationError::MessageTooShort);
    }

    Ok(FormSubmission {
        name: name.to_string(),
        email: email.to_string(),
        subject: subject.to_string(),
        message: message.to_string(),
    })
}

pub fn validate_form(fields: &ContactFields) -> bool {
    validate(fields).is_ok()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Sending,
    Succeeded,
    Failed,
}

impl SubmitPhase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Send Message",
            Self::Sending => "Sending...",
            Self::Succeeded => "Message Sent!",
            Self::Failed => "Try Again",
        }
    }

    pub fn icon_class(self) -> &'static str {
        match self {
            Self::Idle => "fas fa-paper-plane",
            Self::Sending => "fas fa-spinner fa-spin",
            Self::Succeeded => "fas fa-check",
            Self::Failed => "fas fa-exclamation-triangle",
        }
    }

    pub fn disabled(self) -> bool {
        matches!(self, Self::Sending | Self::Succeeded)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContactEffect {
    Notify {
        message: &'static str,
        severity: Severity,
    },
    Deliver(FormSubmission),
    ClearFields,
    /// Diagnostics only; never shown to the visitor.
    LogFailure(String),
    ScheduleReset {
        after_ms: u32,
        token: u64,
    },
}

/// Submit button lifecycle of the contact form.
///
/// Each terminal transition hands out a reset token; a reset carrying a stale
/// token (the visitor retried in the meantime) is ignored.
#[derive(Clone, Debug, Default)]
pub struct ContactFlow {
    phase: SubmitPhase,
    reset_token: u64,
}

impl ContactFlow {
    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn submit(&mut self, fields: &ContactFields) -> Vec<ContactEffect> {
        if self.phase.disabled() {
            return Vec::new();
        }

        match validate(fields) {
            Ok(submission) => {
                self.phase = SubmitPhase::Sending;
                self.reset_token += 1;
                vec![ContactEffect::Deliver(submission)]
            }
            Err(_) => vec![ContactEffect::Notify {
                message: INVALID_FORM_MESSAGE,
                severity: Severity::Error,
            }],
        }
    }

    pub fn delivered(&mut self, outcome: Result<(), DeliveryError>) -> Vec<ContactEffect> {
        if self.phase != SubmitPhase::Sending {
            return Vec::new();
        }

        self.reset_token += 1;
        let reset = ContactEffect::ScheduleReset {
            after_ms: FORM_RESET_MS,
            token: self.reset_token,
        };

        match outcome {
            Ok(()) => {
                self.phase = SubmitPhase::Succeeded;
                vec![
                    ContactEffect::ClearFields,
                    ContactEffect::Notify {
                        message: SENT_MESSAGE,
                        severity: Severity::Success,
                    },
                    reset,
                ]
            }
            Err(error) => {
                self.phase = SubmitPhase::Failed;
                vec![
                    ContactEffect::LogFailure(error.to_string()),
                    ContactEffect::Notify {
                        message: FAILED_MESSAGE,
                        severity: Severity::Error,
                    },
                    reset,
                ]
            }
        }
    }

    pub fn reset(&mut self, token: u64) {
        if token == self.reset_token && matches!(self.phase, SubmitPhase::Succeeded | SubmitPhase::Failed) {
            self.phase = SubmitPhase::Idle;
        }
    }
}
