//! Question generator: resume text + profile in, exactly `QUESTION_COUNT` questions out.

use tracing::{info, warn};

use crate::errors::AppError;
use crate::interview::models::{CandidateProfile, Question, QuestionSet, QUESTION_COUNT};
use crate::interview::prompts::{QUESTION_GENERATION_CONTENT, QUESTION_GENERATION_SYSTEM};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{complete_json, Completion};

/// Generates the interview questions.
///
/// A reply with fewer than `QUESTION_COUNT` questions is a validation error;
/// surplus questions are dropped.
pub async fn generate_questions(
    completion: &dyn Completion,
    resume_text: &str,
    profile: &CandidateProfile,
) -> Result<Vec<Question>, AppError> {
    let profile_json = serde_json::to_string(profile)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize profile: {e}")))?;

    let system = format!(
        "{}\n\n{JSON_ONLY_SYSTEM}",
        QUESTION_GENERATION_SYSTEM.replace("{question_count}", &QUESTION_COUNT.to_string())
    );
    let content = QUESTION_GENERATION_CONTENT
        .replace("{resume_text}", resume_text)
        .replace("{profile_json}", &profile_json);

    let set: QuestionSet = complete_json(completion, &system, &content)
        .await
        .map_err(|e| AppError::Generation(format!("Question generation failed: {e}")))?;

    let mut questions = set.questions;
    if questions.len() < QUESTION_COUNT {
        return Err(AppError::Validation(format!(
            "Question generator returned {} questions, expected {QUESTION_COUNT}",
            questions.len()
        )));
    }
    if questions.len() > QUESTION_COUNT {
        warn!(
            "Question generator returned {} questions, keeping the first {QUESTION_COUNT}",
            questions.len()
        );
        questions.truncate(QUESTION_COUNT);
    }

    info!("Generated {} interview questions", questions.len());
    Ok(questions)
}
