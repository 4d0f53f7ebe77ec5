//! Renders the fixed templates into message sequences. Every call yields
//! exactly two messages: the template's system instruction, then the
//! rendered user instruction.

use crate::llm_client::{Message, MessageSequence};
use crate::models::{JobDescription, ResumeText, TailoredResume};
use crate::tailoring::prompts::{PromptTemplate, ANALYSIS_TEMPLATE, TAILORING_TEMPLATE};

fn build(template: &PromptTemplate, vars: &[(&str, &str)]) -> MessageSequence {
    MessageSequence::new(vec![
        Message::system(template.system),
        Message::user(template.render(vars)),
    ])
}

pub fn build_tailoring_messages(
    resume: &ResumeText,
    job_description: &JobDescription,
) -> MessageSequence {
    build(
        &TAILORING_TEMPLATE,
        &[
            ("job_description", job_description.as_str()),
            ("resume", resume.as_str()),
        ],
    )
}

pub fn build_analysis_messages(
    original: &ResumeText,
    tailored: &TailoredResume,
    job_description: &JobDescription,
) -> MessageSequence {
    build(
        &ANALYSIS_TEMPLATE,
        &[
            ("original", original.as_str()),
            ("tailored", tailored.as_str()),
            ("job_description", job_description.as_str()),
        ],
    )
}
