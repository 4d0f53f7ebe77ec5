use serde::Serialize;

use crate::models::TailoredResume;

pub const DOWNLOAD_FILE_NAME: &str = "tailored_resume.txt";
pub const DOWNLOAD_CONTENT_TYPE: &str = "text/plain";

/// Plain-text file offered for download. The body is the tailored resume,
/// byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadArtifact {
    pub file_name: &'static str,
    pub content_type: &'static str,
    #[serde(skip)]
    pub body: String,
}

impl DownloadArtifact {
    pub fn from_tailored(tailored: &TailoredResume) -> Self {
        Self {
            file_name: DOWNLOAD_FILE_NAME,
            content_type: DOWNLOAD_CONTENT_TYPE,
            body: tailored.as_str().to_string(),
        }
    }

    /// `Content-Disposition` header value for this artifact.
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.file_name)
    }
}
