use std::fmt;

use serde::Deserialize;

/// Secret token authorizing use of the completion provider.
///
/// Never logged or echoed: no `Display`, no `Serialize`, and `Debug` is redacted.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the raw secret. Only the completion client should call this.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Uses `fallback` when this credential is empty. Pre-population from the
    /// server environment happens here, outside the pipeline.
    pub fn or_default_from(self, fallback: Option<&Credential>) -> Credential {
        match fallback {
            Some(fallback) if self.is_empty() => fallback.clone(),
            _ => self,
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("Credential(<empty>)")
        } else {
            f.write_str("Credential(<redacted>)")
        }
    }
}
