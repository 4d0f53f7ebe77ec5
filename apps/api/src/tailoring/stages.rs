//! The two completion stages. Each wraps exactly one completion call and knows
//! nothing about the other; sequencing lives in the pipeline.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::llm_client::{complete_with_deadline, CompletionClient, ModelConfig};
use crate::models::{AnalysisReport, JobDescription, ResumeText, TailoredResume};
use crate::tailoring::error::TailorError;
use crate::tailoring::prompt_builder::{build_analysis_messages, build_tailoring_messages};

/// Rewrites the resume against the job description.
#[derive(Clone)]
pub struct TailoringStage {
    client: Arc<dyn CompletionClient>,
}

impl TailoringStage {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    pub async fn run(
        &self,
        resume: &ResumeText,
        job_description: &JobDescription,
        config: &ModelConfig,
    ) -> Result<TailoredResume, TailorError> {
        let messages = build_tailoring_messages(resume, job_description);
        debug!(
            "Tailoring call: model={}, resume_chars={}, jd_chars={}",
            config.model,
            resume.as_str().chars().count(),
            job_description.as_str().chars().count()
        );

        let text = complete_with_deadline(self.client.as_ref(), &messages, config)
            .await
            .map_err(|e| {
                warn!("Tailoring call failed: {e:#}");
                TailorError::from_completion(e)
            })?;

        Ok(TailoredResume::new(text))
    }
}

/// Explains what changed between the original and tailored resumes.
#[derive(Clone)]
pub struct AnalysisStage {
    client: Arc<dyn CompletionClient>,
}

impl AnalysisStage {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    pub async fn run(
        &self,
        original: &ResumeText,
        tailored: &TailoredResume,
        job_description: &JobDescription,
        config: &ModelConfig,
    ) -> Result<AnalysisReport, TailorError> {
        let messages = build_analysis_messages(original, tailored, job_description);
        debug!("Analysis call: model={}", config.model);

        let text = complete_with_deadline(self.client.as_ref(), &messages, config)
            .await
            .map_err(|e| {
                warn!("Analysis call failed: {e:#}");
                TailorError::from_completion(e)
            })?;

        Ok(AnalysisReport::new(text))
    }
}
