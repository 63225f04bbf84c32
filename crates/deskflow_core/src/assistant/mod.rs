//! AI content generation boundary.
//!
//! # Responsibility
//! - Define the request/response shapes exchanged with the generative
//!   service and the async port engines and UIs call through.
//! - Classify failures so callers can tell them apart.
//!
//! # Invariants
//! - Generation never touches board or page state; callers decide what, if
//!   anything, to insert from a successful result.
//! - One request per call: no retry, no cancellation.
//!
//! # See also
//! - `gemini.rs` for the HTTP implementation.

pub mod gemini;
pub mod state;

use crate::model::block::{DraftStatus, InstagramDraft};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Generated social post copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionDraft {
    pub caption: String,
    pub hashtags: Vec<String>,
}

impl CaptionDraft {
    /// Wraps the generated copy as an unpublished instagram draft record.
    pub fn into_instagram_draft(self, id: impl Into<String>) -> InstagramDraft {
        InstagramDraft {
            id: id.into(),
            caption: self.caption,
            hashtags: self.hashtags,
            status: DraftStatus::Draft,
        }
    }
}

/// Generated workspace assistant answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantReply {
    /// Markdown body.
    pub content: String,
    /// Short follow-up prompts.
    pub suggestions: Vec<String>,
}

/// Failure of one generation call.
#[derive(Debug)]
pub enum AssistantError {
    /// No API key configured.
    MissingApiKey,
    /// Topic or prompt is blank after trim.
    InvalidPrompt,
    /// Request could not be sent or the body could not be read.
    Transport(reqwest::Error),
    /// Service answered with a non-success status.
    HttpStatus { status: u16, body: String },
    /// Service answered without any generated text.
    EmptyResponse,
    /// Generated text is not the expected JSON shape.
    MalformedResponse(serde_json::Error),
}

impl Display for AssistantError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "generative API key is not configured"),
            Self::InvalidPrompt => write!(f, "prompt must not be blank"),
            Self::Transport(err) => write!(f, "generative API request failed: {err}"),
            Self::HttpStatus { status, body } => {
                write!(f, "generative API returned status {status}: {body}")
            }
            Self::EmptyResponse => write!(f, "AI returned no content"),
            Self::MalformedResponse(err) => write!(f, "AI returned malformed content: {err}"),
        }
    }
}

impl Error for AssistantError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::MalformedResponse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AssistantError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

impl From<serde_json::Error> for AssistantError {
    fn from(value: serde_json::Error) -> Self {
        Self::MalformedResponse(value)
    }
}

/// Port to a generative content service.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Writes a caption and hashtags for `topic`.
    async fn generate_caption(&self, topic: &str) -> Result<CaptionDraft, AssistantError>;

    /// Answers `prompt` with the surrounding workspace `context`.
    async fn assist(&self, prompt: &str, context: &str) -> Result<AssistantReply, AssistantError>;
}

pub(crate) fn require_prompt(value: &str) -> Result<&str, AssistantError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AssistantError::InvalidPrompt);
    }
    Ok(trimmed)
}
