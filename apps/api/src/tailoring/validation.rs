//! Input validation — runs before any network activity.
//!
//! "Missing" means the empty string. Whitespace-only input is accepted and
//! passed through as written.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::{Credential, JobDescription, ResumeText};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    Credential,
    Resume,
    JobDescription,
}

/// Set of fields found empty. Ordered so reports are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MissingFields(BTreeSet<InputField>);

impl MissingFields {
    pub fn contains(&self, field: InputField) -> bool {
        self.0.contains(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<InputField> for MissingFields {
    fn from_iter<I: IntoIterator<Item = InputField>>(iter: I) -> Self {
        MissingFields(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid(MissingFields),
}

/// Checks that the credential and both texts are present. Pure; no side effects.
pub fn validate_inputs(
    credential: &Credential,
    resume: &ResumeText,
    job_description: &JobDescription,
) -> Validation {
    let missing: MissingFields = [
        (credential.is_empty(), InputField::Credential),
        (resume.is_empty(), InputField::Resume),
        (job_description.is_empty(), InputField::JobDescription),
    ]
    .into_iter()
    .filter_map(|(is_missing, field)| is_missing.then_some(field))
    .collect();

    if missing.is_empty() {
        Validation::Valid
    } else {
        Validation::Invalid(missing)
    }
}
