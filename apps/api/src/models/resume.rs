use serde::{Deserialize, Serialize};

/// Declares an opaque text newtype. The wrapped string is never parsed,
/// trimmed, or re-encoded; it is carried verbatim from input to prompt.
macro_rules! opaque_text {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        #[allow(dead_code)]
        impl $name {
            pub fn new(text: impl Into<String>) -> Self {
                Self(text.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl From<String> for $name {
            fn from(text: String) -> Self {
                Self(text)
            }
        }

        impl From<&str> for $name {
            fn from(text: &str) -> Self {
                Self(text.to_string())
            }
        }
    };
}

opaque_text!(
    /// The user's current resume, as pasted.
    ResumeText
);

opaque_text!(
    /// The target job description, as pasted.
    JobDescription
);

opaque_text!(
    /// Output of the tailoring completion. Lives only as long as the user action
    /// that produced it.
    TailoredResume
);

opaque_text!(
    /// Output of the analysis completion comparing original and tailored resumes.
    AnalysisReport
);
