//! Module for the responses returned by the API and their classification.

use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Deserializer};

/// Media type of the JSON responses
pub const JSON_MIME_TYPE: &str = "application/json";

/// Substring revealing an error envelope in a JSON response.
const ERROR_MARKER: &str = r#""type":"error""#;

/// A response as handed back by a [`Transport`](crate::prelude::Transport)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: Option<String>,
    pub content: Bytes,
}

impl Response {
    pub fn new(status: u16, content_type: Option<String>, content: impl Into<Bytes>) -> Self {
        Self {
            status,
            content_type,
            content: content.into(),
        }
    }

    /// The content as text, invalid UTF-8 sequences are replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }

    fn is_json(&self) -> bool {
        self.content_type.as_deref() == Some(JSON_MIME_TYPE)
    }
}

/// The type tag of an error envelope
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Error,
}

/// An error returned by the API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Error {
    /// Only set when the envelope is tagged as `error`, absent for any other tag.
    #[serde(rename = "type", default, deserialize_with = "deserialize_kind")]
    pub kind: Option<ErrorKind>,
    #[serde(default, deserialize_with = "deserialize_status")]
    pub status: Option<u16>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub help_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub request_id: Option<String>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message.as_deref().unwrap_or("unknown api error"))
    }
}

impl std::error::Error for Error {}

/// Several errors returned at once by the API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorCollection {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub total_count: Option<String>,
    #[serde(default)]
    pub entries: Vec<Error>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl TextOrNumber {
    fn into_text(self) -> String {
        match self {
            Self::Text(value) => value,
            Self::Number(value) => value.to_string(),
        }
    }
}

fn deserialize_kind<'de, D>(deserializer: D) -> Result<Option<ErrorKind>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Deserialize::deserialize(deserializer)?;
    Ok(value.filter(|tag| tag == "error").map(|_| ErrorKind::Error))
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<TextOrNumber> = Deserialize::deserialize(deserializer)?;
    Ok(value.map(TextOrNumber::into_text))
}

fn deserialize_status<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_text(deserializer)?.and_then(|value| value.parse().ok()))
}

/// The classification of a response
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The call failed, with the error sent by the API when it could be decoded.
    Failure(Option<Error>),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Failure(error) => error.as_ref(),
            Self::Success => None,
        }
    }

    pub fn into_error(self) -> Option<Error> {
        match self {
            Self::Failure(error) => error,
            Self::Success => None,
        }
    }
}

/// Decides whether a call succeeded.
///
/// A missing response is a failure without any detail. A JSON response whose
/// content contains `"type":"error"` is a failure, and the error is decoded
/// from it. Any other response is a success.
///
/// The check is done on the raw text: a successful payload containing that
/// exact substring in one of its values is reported as a failure.
pub fn evaluate(response: Option<&Response>) -> Outcome {
    let Some(response) = response else {
        return Outcome::Failure(None);
    };
    if response.is_json() && response.text().contains(ERROR_MARKER) {
        Outcome::Failure(decode_error(&response.content))
    } else {
        Outcome::Success
    }
}

fn decode_error(content: &[u8]) -> Option<Error> {
    let error = match serde_json::from_slice::<Error>(content) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!("unable to decode error: {err:?}");
            return None;
        }
    };
    if error.kind.is_some() {
        return Some(error);
    }
    match serde_json::from_slice::<ErrorCollection>(content) {
        Ok(collection) if collection.total_count.as_deref().is_some_and(|c| !c.is_empty()) => {
            match collection.entries.into_iter().next() {
                Some(first) => Some(first),
                None => {
                    tracing::warn!("error collection without entries");
                    Some(error)
                }
            }
        }
        Ok(_) => Some(error),
        Err(err) => {
            tracing::warn!("unable to decode error collection: {err:?}");
            Some(error)
        }
    }
}
