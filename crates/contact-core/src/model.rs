//! Contact message model
//!
//! A submission moves through three shapes:
//! - [`ContactSubmission`]: whatever the client sent, every field optional
//! - [`ValidatedSubmission`]: all four fields present and non-empty
//! - [`ContactMessage`]: a validated submission stamped with its creation time

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Fields every submission must carry, in form order
pub const REQUIRED_FIELDS: [&str; 4] = ["name", "email", "subject", "message"];

/// Candidate record as posted by the contact form
///
/// Scalar values follow form truthiness: a non-zero number or `true` is kept
/// in its text form (`42` becomes `"42"`), while `0`, `false` and `null` read
/// as absent. Objects and arrays are absent too. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default, deserialize_with = "string_or_absent")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "string_or_absent")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "string_or_absent")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "string_or_absent")]
    pub message: Option<String>,
}

impl ContactSubmission {
    /// Create a submission with all four fields set
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            subject: Some(subject.into()),
            message: Some(message.into()),
        }
    }

    /// Look up a field by its wire name
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => self.name.as_deref(),
            "email" => self.email.as_deref(),
            "subject" => self.subject.as_deref(),
            "message" => self.message.as_deref(),
            _ => None,
        }
    }
}

fn string_or_absent<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Bool(true) => Ok(Some("true".to_string())),
        serde_json::Value::Number(n) => Ok(number_text(&n)),
        _ => Ok(None),
    }
}

/// Text form of a non-zero number; zero is absent
fn number_text(n: &serde_json::Number) -> Option<String> {
    if let Some(i) = n.as_i64() {
        return (i != 0).then(|| i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return Some(u.to_string());
    }
    let f = n.as_f64()?;
    if f == 0.0 {
        None
    } else if f.fract() == 0.0 && f.abs() < 1e21 {
        // 1.0 is sent as 1
        Some(format!("{:.0}", f))
    } else {
        Some(f.to_string())
    }
}

/// A submission that passed validation
///
/// Only [`crate::SubmissionValidator`] can build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSubmission {
    name: String,
    email: String,
    subject: String,
    message: String,
}

impl ValidatedSubmission {
    pub(crate) fn new(name: String, email: String, subject: String, message: String) -> Self {
        Self {
            name,
            email,
            subject,
            message,
        }
    }
}

/// The persisted entity
///
/// Immutable once built; stores never update or delete it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    name: String,
    email: String,
    subject: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl ContactMessage {
    pub fn new(submission: ValidatedSubmission, created_at: DateTime<Utc>) -> Self {
        Self {
            name: submission.name,
            email: submission.email,
            subject: submission.subject,
            message: submission.message,
            created_at,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Identifier assigned by the store on insertion
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for MessageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
