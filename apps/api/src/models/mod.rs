pub mod credential;
pub mod resume;

pub use credential::Credential;
pub use resume::{AnalysisReport, JobDescription, ResumeText, TailoredResume};
