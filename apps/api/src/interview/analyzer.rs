//! Profile analyzer: resume text in, `CandidateProfile` out.

use tracing::info;

use crate::errors::AppError;
use crate::interview::models::CandidateProfile;
use crate::interview::prompts::PROFILE_ANALYSIS_SYSTEM;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{complete_json, Completion};

pub async fn analyze_profile(
    completion: &dyn Completion,
    resume_text: &str,
) -> Result<CandidateProfile, AppError> {
    let system = format!("{PROFILE_ANALYSIS_SYSTEM}\n\n{JSON_ONLY_SYSTEM}");
    let profile: CandidateProfile = complete_json(completion, &system, resume_text)
        .await
        .map_err(|e| AppError::Generation(format!("Resume analysis failed: {e}")))?;

    info!(
        "Resume analyzed: {} technologies, {} achievements",
        profile.professional_info.tech_stack.len(),
        profile.professional_info.key_achievements.len()
    );
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use crate::testing::{profile_json, ScriptedCompletion};

    #[tokio::test]
    async fn test_analyze_profile_sends_resume_as_content() {
        let completion = ScriptedCompletion::new(vec![Ok(profile_json())]);
        let profile = analyze_profile(&completion, "Ada Lovelace\nRust, Tokio")
            .await
            .unwrap();

        assert_eq!(profile.basic_info.full_name.as_deref(), Some("Ada Lovelace"));
        let calls = completion.calls();
        assert_eq!(calls[0].content, "Ada Lovelace\nRust, Tokio");
        assert!(calls[0].system.contains("professional_info"));
    }

    #[tokio::test]
    async fn test_analyze_profile_rejects_missing_fields() {
        let completion =
            ScriptedCompletion::new(vec![Ok(r#"{"basic_info": {"full_name": "Ada"}}"#.into())]);
        let err = analyze_profile(&completion, "resume").await.unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));
    }

    #[tokio::test]
    async fn test_analyze_profile_reports_collaborator_failure() {
        let completion = ScriptedCompletion::new(vec![Err(LlmError::Api {
            status: 401,
            message: "invalid x-api-key".into(),
        })]);
        let err = analyze_profile(&completion, "resume").await.unwrap_err();
        match err {
            AppError::Generation(msg) => assert!(msg.contains("invalid x-api-key")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
