//! Pipeline orchestrator — validation, tailoring, then analysis on request.
//!
//! States: Idle → Validating → Tailoring → {Succeeded, Failed}, with the
//! optional Succeeded → AnalyzingOnDemand → {AnalysisSucceeded, AnalysisFailed}.
//!
//! Analysis can only be requested through a `TailoredSession`, and the only
//! way to obtain one is a successful tailoring run (or `resume_session`, which
//! re-validates a tailored resume handed back by the caller). Analysis never
//! starts on its own and its failure leaves the session untouched.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::llm_client::{CompletionClient, ModelConfig};
use crate::models::{AnalysisReport, Credential, JobDescription, ResumeText, TailoredResume};
use crate::tailoring::download::DownloadArtifact;
use crate::tailoring::error::TailorError;
use crate::tailoring::stages::{AnalysisStage, TailoringStage};
use crate::tailoring::validation::{validate_inputs, InputField, Validation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Validating,
    Tailoring,
    Succeeded,
    Failed,
    AnalyzingOnDemand,
    AnalysisSucceeded,
    AnalysisFailed,
}

impl PipelineState {
    pub fn can_transition_to(self, next: PipelineState) -> bool {
        use PipelineState::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Failed)
                | (Validating, Tailoring)
                | (Tailoring, Failed)
                | (Tailoring, Succeeded)
                | (Succeeded, AnalyzingOnDemand)
                | (AnalyzingOnDemand, AnalysisSucceeded)
                | (AnalyzingOnDemand, AnalysisFailed)
        )
    }

    /// Succeeded is terminal for the tailoring action but still admits the
    /// on-demand analysis sub-transition.
    pub fn is_terminal(self) -> bool {
        use PipelineState::*;
        matches!(
            self,
            Failed | Succeeded | AnalysisSucceeded | AnalysisFailed
        )
    }
}

/// Tracks the current state of one run and logs each step.
struct Tracker {
    state: PipelineState,
}

impl Tracker {
    fn starting_at(state: PipelineState) -> Self {
        Self { state }
    }

    fn advance(&mut self, next: PipelineState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal pipeline transition {:?} -> {:?}",
            self.state,
            next
        );
        if next.is_terminal() {
            info!("Pipeline finished in {:?}", next);
        } else {
            debug!("Pipeline state {:?} -> {:?}", self.state, next);
        }
        self.state = next;
    }
}

/// Model settings that stay fixed for the life of the process.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub model: String,
    pub timeout: Duration,
}

/// Inputs for one tailoring action. Built fresh per action and moved into the
/// pipeline; nothing is kept between actions.
#[derive(Debug, Clone)]
pub struct TailorRequest {
    pub credential: Credential,
    pub resume: ResumeText,
    pub job_description: JobDescription,
}

/// The product of a successful tailoring run.
#[derive(Debug, Clone)]
pub struct TailoredSession {
    run_id: Uuid,
    resume: ResumeText,
    job_description: JobDescription,
    config: ModelConfig,
    tailored: TailoredResume,
}

impl TailoredSession {
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn tailored(&self) -> &TailoredResume {
        &self.tailored
    }

    pub fn download(&self) -> DownloadArtifact {
        DownloadArtifact::from_tailored(&self.tailored)
    }
}

#[derive(Debug)]
pub enum TailorOutcome {
    Succeeded(TailoredSession),
    Failed(TailorError),
}

impl TailorOutcome {
    pub fn state(&self) -> PipelineState {
        match self {
            TailorOutcome::Succeeded(_) => PipelineState::Succeeded,
            TailorOutcome::Failed(_) => PipelineState::Failed,
        }
    }
}

#[derive(Debug)]
pub enum AnalysisOutcome {
    Succeeded(AnalysisReport),
    Failed(TailorError),
}

impl AnalysisOutcome {
    pub fn state(&self) -> PipelineState {
        match self {
            AnalysisOutcome::Succeeded(_) => PipelineState::AnalysisSucceeded,
            AnalysisOutcome::Failed(_) => PipelineState::AnalysisFailed,
        }
    }
}

pub struct PipelineOrchestrator {
    tailoring: TailoringStage,
    analysis: AnalysisStage,
    settings: PipelineSettings,
}

impl PipelineOrchestrator {
    pub fn new(client: Arc<dyn CompletionClient>, settings: PipelineSettings) -> Self {
        Self {
            tailoring: TailoringStage::new(client.clone()),
            analysis: AnalysisStage::new(client),
            settings,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Runs validation and the tailoring stage. Never panics or returns a raw
    /// error: every failure comes back as `TailorOutcome::Failed`.
    pub async fn run(&self, request: TailorRequest) -> TailorOutcome {
        let run_id = Uuid::new_v4();
        let span = info_span!("tailor", %run_id);
        self.run_inner(run_id, request).instrument(span).await
    }

    async fn run_inner(&self, run_id: Uuid, request: TailorRequest) -> TailorOutcome {
        let mut tracker = Tracker::starting_at(PipelineState::Idle);

        tracker.advance(PipelineState::Validating);
        if let Err(err) = check_inputs(&request) {
            warn!("Tailoring rejected: {}", err.code());
            let outcome = TailorOutcome::Failed(err);
            tracker.advance(outcome.state());
            return outcome;
        }

        let TailorRequest {
            credential,
            resume,
            job_description,
        } = request;
        let config = self.model_config(credential);

        tracker.advance(PipelineState::Tailoring);
        let outcome = match self.tailoring.run(&resume, &job_description, &config).await {
            Ok(tailored) => {
                info!(
                    "Resume tailored successfully ({} chars)",
                    tailored.as_str().chars().count()
                );
                TailorOutcome::Succeeded(TailoredSession {
                    run_id,
                    resume,
                    job_description,
                    config,
                    tailored,
                })
            }
            Err(err) => {
                warn!("Tailoring failed: {}", err.code());
                TailorOutcome::Failed(err)
            }
        };
        tracker.advance(outcome.state());
        outcome
    }

    /// Runs the analysis stage for a session the caller explicitly asked about.
    pub async fn analyze(&self, session: &TailoredSession) -> AnalysisOutcome {
        let span = info_span!("analyze", run_id = %session.run_id);

        async {
            let mut tracker = Tracker::starting_at(PipelineState::Succeeded);
            tracker.advance(PipelineState::AnalyzingOnDemand);

            let result = self
                .analysis
                .run(
                    &session.resume,
                    &session.tailored,
                    &session.job_description,
                    &session.config,
                )
                .await;

            let outcome = match result {
                Ok(report) => {
                    info!("Analysis produced ({} chars)", report.as_str().chars().count());
                    AnalysisOutcome::Succeeded(report)
                }
                Err(err) => {
                    warn!("Analysis failed: {}", err.code());
                    AnalysisOutcome::Failed(err)
                }
            };
            tracker.advance(outcome.state());
            outcome
        }
        .instrument(span)
        .await
    }

    /// Rebuilds a session from a tailored resume produced by an earlier action,
    /// so the caller can request analysis as a separate action. The original
    /// inputs are validated again.
    pub fn resume_session(
        &self,
        request: TailorRequest,
        tailored: TailoredResume,
    ) -> Result<TailoredSession, TailorError> {
        check_inputs(&request)?;

        let TailorRequest {
            credential,
            resume,
            job_description,
        } = request;

        Ok(TailoredSession {
            run_id: Uuid::new_v4(),
            resume,
            job_description,
            config: self.model_config(credential),
            tailored,
        })
    }

    fn model_config(&self, credential: Credential) -> ModelConfig {
        ModelConfig::new(self.settings.model.clone(), credential, self.settings.timeout)
    }
}

/// Credential problems are reported alone; text problems as one combined error.
fn check_inputs(request: &TailorRequest) -> Result<(), TailorError> {
    match validate_inputs(
        &request.credential,
        &request.resume,
        &request.job_description,
    ) {
        Validation::Valid => Ok(()),
        Validation::Invalid(missing) if missing.contains(InputField::Credential) => {
            Err(TailorError::MissingCredential)
        }
        Validation::Invalid(missing) => Err(TailorError::MissingInputs(missing)),
    }
}
