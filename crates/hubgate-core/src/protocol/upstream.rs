//! Upstream request spec, outcome, and the text lines relayed to callers.

use std::fmt;

use serde_json::Value;

use crate::credential::Credential;
use crate::error::UpstreamError;

/// Terminal line of a streamed collection response.
pub const DONE_LINE: &str = "Done.\n";

/// Identifier written when an element lacks the identifying field.
pub const UNKNOWN_IDENTIFIER: &str = "(unknown)";

/// Expected top-level JSON shape of an upstream response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    Object,
    Array,
}

/// Headers attached to every upstream call.
#[derive(Clone)]
pub struct FixedHeaders {
    pub user_agent: String,
    pub accept: String,
    authorization: String,
}

impl FixedHeaders {
    pub fn new(user_agent: impl Into<String>, accept: impl Into<String>, cred: &Credential) -> Self {
        Self {
            user_agent: user_agent.into(),
            accept: accept.into(),
            authorization: format!("token {}", cred.expose()),
        }
    }

    /// `Authorization` header value (`token <credential>`).
    pub fn authorization(&self) -> &str {
        &self.authorization
    }

    /// Header name/value pairs in the order they are attached.
    pub fn pairs(&self) -> [(&'static str, &str); 3] {
        [
            ("user-agent", self.user_agent.as_str()),
            ("accept", self.accept.as_str()),
            ("authorization", self.authorization.as_str()),
        ]
    }
}

impl fmt::Debug for FixedHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedHeaders")
            .field("user_agent", &self.user_agent)
            .field("accept", &self.accept)
            .field("authorization", &"token ****")
            .finish()
    }
}

/// One outbound call: target, headers, and the shape the caller expects back.
#[derive(Debug, Clone)]
pub struct UpstreamRequestSpec {
    pub uri: String,
    pub headers: FixedHeaders,
    pub shape: ResponseShape,
}

/// Raw 2xx body as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamBody {
    raw: String,
}

impl UpstreamBody {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Re-serialize JSON compactly; non-JSON bodies are relayed as-is.
    pub fn to_compact_json(&self) -> String {
        match serde_json::from_str::<Value>(&self.raw) {
            Ok(v) => v.to_string(),
            Err(_) => self.raw.clone(),
        }
    }

    /// Check the body against the shape the caller asked for.
    pub fn check_shape(&self, shape: ResponseShape) -> std::result::Result<(), UpstreamError> {
        let value: Value = serde_json::from_str(&self.raw)
            .map_err(|e| UpstreamError::Decode(format!("invalid json: {e}")))?;
        match (shape, &value) {
            (ResponseShape::Object, Value::Object(_)) | (ResponseShape::Array, Value::Array(_)) => Ok(()),
            (ResponseShape::Object, _) => Err(UpstreamError::Decode("expected a json object".into())),
            (ResponseShape::Array, _) => Err(UpstreamError::Decode("expected a json array".into())),
        }
    }

    /// Decode an array body and pull `field` out of every element, in order.
    pub fn identifiers(&self, field: &str) -> std::result::Result<Vec<String>, UpstreamError> {
        let value: Value = serde_json::from_str(&self.raw)
            .map_err(|e| UpstreamError::Decode(format!("invalid json: {e}")))?;
        let Value::Array(items) = value else {
            return Err(UpstreamError::Decode("expected a json array".into()));
        };

        Ok(items
            .iter()
            .map(|item| match item.get(field) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => UNKNOWN_IDENTIFIER.to_string(),
                Some(other) => other.to_string(),
            })
            .collect())
    }
}

/// Result of exactly one upstream call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamOutcome {
    Success(UpstreamBody),
    Failure(UpstreamError),
}

impl UpstreamOutcome {
    pub fn into_result(self) -> std::result::Result<UpstreamBody, UpstreamError> {
        match self {
            UpstreamOutcome::Success(b) => Ok(b),
            UpstreamOutcome::Failure(e) => Err(e),
        }
    }
}

/// `Repo: <identifier>\n`
pub fn repo_line(identifier: &str) -> String {
    format!("Repo: {identifier}\n")
}

/// `Error: <detail>`
pub fn error_text(err: &UpstreamError) -> String {
    format!("Error: {err}")
}

/// `Got: <json>`
pub fn got_text(body: &UpstreamBody) -> String {
    format!("Got: {}", body.to_compact_json())
}
