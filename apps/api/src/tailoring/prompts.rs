// Prompt templates for the two completion stages. Both are fixed at compile
// time; user text only ever enters through `PromptTemplate::render`.

/// An immutable (system instruction, user instruction) pair. The user
/// instruction carries `{name}` placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    pub system: &'static str,
    pub user: &'static str,
}

impl PromptTemplate {
    /// Substitutes `{name}` placeholders in the user instruction in a single
    /// left-to-right pass. Substituted values are copied verbatim and never
    /// rescanned, so braces inside user text survive untouched. Placeholders
    /// with no matching variable are left as written.
    pub fn render(&self, vars: &[(&str, &str)]) -> String {
        let template = self.user;
        let extra: usize = vars.iter().map(|(_, value)| value.len()).sum();
        let mut out = String::with_capacity(template.len() + extra);
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            let substituted = after.find('}').and_then(|close| {
                let name = &after[..close];
                vars.iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| (close, *value))
            });

            match substituted {
                Some((close, value)) => {
                    out.push_str(value);
                    rest = &after[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        out
    }
}

pub const TAILORING_SYSTEM: &str = "You are an expert resume writer and career consultant. \
Your task is to tailor resumes to match job descriptions while maintaining authenticity.

Guidelines:
1. Analyze the job description to identify key skills, requirements, and keywords
2. Reorganize and rewrite the resume to highlight relevant experience
3. Use action verbs and quantifiable achievements
4. Match the tone and language of the job description
5. Ensure all information remains truthful - only reframe existing experience
6. Optimize for ATS (Applicant Tracking Systems) by including relevant keywords
7. Keep the same format structure but improve content clarity
8. Focus on impact and results

Important: Only use information from the original resume. Do not fabricate experience.";

/// Replace: {job_description}, {resume}
pub const TAILORING_USER_TEMPLATE: &str = "Job Description:
{job_description}

Current Resume:
{resume}

Please tailor this resume to match the job description. \
Provide a complete, polished resume that emphasizes relevant experience and skills.";

pub const ANALYSIS_SYSTEM: &str = "You are a resume analyst. \
Compare the original and tailored resumes and explain the key improvements.";

/// Replace: {original}, {tailored}, {job_description}
pub const ANALYSIS_USER_TEMPLATE: &str = "Original Resume:
{original}

Tailored Resume:
{tailored}

Job Description:
{job_description}

Provide a brief analysis of:
1. Key changes made
2. Skills and keywords emphasized
3. How it better matches the job description";

pub const TAILORING_TEMPLATE: PromptTemplate = PromptTemplate {
    system: TAILORING_SYSTEM,
    user: TAILORING_USER_TEMPLATE,
};

pub const ANALYSIS_TEMPLATE: PromptTemplate = PromptTemplate {
    system: ANALYSIS_SYSTEM,
    user: ANALYSIS_USER_TEMPLATE,
};
