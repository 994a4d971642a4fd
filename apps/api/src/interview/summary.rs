//! Summary generator: scores a finished session and asks for a short write-up.

use tracing::{error, info};

use crate::errors::AppError;
use crate::interview::models::{CandidateProfile, ScoredResult};
use crate::interview::prompts::{SUMMARY_CONTENT, SUMMARY_FALLBACK, SUMMARY_SYSTEM};
use crate::interview::session::InterviewSession;
use crate::llm_client::Completion;

/// Scores `session` and requests the natural-language summary.
///
/// The score never depends on the collaborator: if the summary call fails the
/// result carries `SUMMARY_FALLBACK` instead.
pub async fn summarize(
    completion: &dyn Completion,
    session: &InterviewSession,
    profile: &CandidateProfile,
) -> Result<ScoredResult, AppError> {
    let correct_count = session.score()?;
    let total_questions = session.questions().len();

    let pairs: Vec<(&str, &str)> = session
        .questions()
        .iter()
        .zip(session.answers())
        .map(|(q, a)| (q.question.as_str(), a.as_str()))
        .collect();
    let answers_json = serde_json::to_string(&pairs)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize answers: {e}")))?;
    let profile_json = serde_json::to_string(&profile.professional_info)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize profile: {e}")))?;

    let system = SUMMARY_SYSTEM
        .replace("{correct_count}", &correct_count.to_string())
        .replace("{total}", &total_questions.to_string())
        .replace("{profile_json}", &profile_json)
        .replace("{answers_json}", &answers_json);

    let summary_text = match completion.complete(&system, SUMMARY_CONTENT).await {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            error!("Summary generation failed: {e}");
            SUMMARY_FALLBACK.to_string()
        }
    };

    info!("Interview scored {correct_count}/{total_questions}");
    Ok(ScoredResult {
        correct_count,
        total_questions,
        summary_text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::models::{AnswerLetter, QUESTION_COUNT};
    use crate::llm_client::LlmError;
    use crate::testing::{finished_session, profile, ScriptedCompletion};

    #[tokio::test]
    async fn test_summarize_scores_and_forwards_answers() {
        use crate::interview::models::AnswerLetter::{A, B};
        let session = finished_session(A, &[A, A, A, A, A, B, B, B, B, B]);
        let completion =
            ScriptedCompletion::new(vec![Ok("  Solid on Rust, revisit async.  ".into())]);

        let result = summarize(&completion, &session, &profile()).await.unwrap();

        assert_eq!(result.correct_count, 5);
        assert_eq!(result.total_questions, QUESTION_COUNT);
        assert_eq!(result.summary_text, "Solid on Rust, revisit async.");

        let calls = completion.calls();
        assert_eq!(calls[0].content, SUMMARY_CONTENT);
        assert!(calls[0].system.contains("scored 5/10"));
        assert!(calls[0].system.contains(r#"["Question 6","B"]"#));
        assert!(!calls[0].system.contains("Ada Lovelace"));
    }

    #[tokio::test]
    async fn test_summarize_falls_back_when_collaborator_fails() {
        let session = finished_session(AnswerLetter::C, &[AnswerLetter::C; QUESTION_COUNT]);
        let completion = ScriptedCompletion::new(vec![Err(LlmError::RateLimited { retries: 3 })]);

        let result = summarize(&completion, &session, &profile()).await.unwrap();

        assert_eq!(result.correct_count, QUESTION_COUNT);
        assert_eq!(result.summary_text, SUMMARY_FALLBACK);
    }

    #[tokio::test]
    async fn test_summarize_requires_summary_phase() {
        let session = InterviewSession::start();
        let completion = ScriptedCompletion::new(vec![]);
        let err = summarize(&completion, &session, &profile()).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
        assert!(completion.calls().is_empty());
    }
}
