use serde::{Deserialize, Serialize};

/// Body of a `generateContent` call: a single user turn with one text part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Error envelope the provider returns with non-success statuses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderErrorBody {
    #[serde(default)]
    pub error: Option<ProviderErrorDetail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Decoded outcome of a successful provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// `candidates[0].content.parts[0].text` was present (possibly empty).
    Text(String),
    /// The response was well-formed JSON but the text path was absent.
    Missing { finish_reason: Option<String> },
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.into()),
                }],
                role: None,
            }],
        }
    }
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if every level exists.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }

    pub fn into_completion(self) -> Completion {
        if let Some(text) = self.first_text() {
            return Completion::Text(text.to_string());
        }
        let finish_reason = self
            .candidates
            .and_then(|candidates| candidates.into_iter().next())
            .and_then(|candidate| candidate.finish_reason);
        Completion::Missing { finish_reason }
    }
}

impl ProviderErrorBody {
    pub fn message(&self) -> Option<&str> {
        self.error
            .as_ref()?
            .message
            .as_deref()
            .filter(|message| !message.is_empty())
    }

    /// Canonical status name such as `RESOURCE_EXHAUSTED`.
    pub fn status(&self) -> Option<&str> {
        self.error.as_ref()?.status.as_deref()
    }
}

impl Completion {
    /// Text handed to callers; an absent path degrades to an empty answer.
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Missing { .. } => String::new(),
        }
    }
}
