//! Test doubles and fixtures shared by the unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use crate::extraction::{ExtractionError, TextExtractor};
use crate::interview::models::{
    AnswerLetter, BasicInfo, CandidateProfile, ProfessionalInfo, Question,
};
use crate::interview::session::InterviewSession;
use crate::llm_client::{Completion, LlmError};

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system: String,
    pub content: String,
}

/// Completion collaborator that replays queued replies in order and records every call.
/// Runs dry with `LlmError::EmptyContent`.
pub struct ScriptedCompletion {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedCompletion {
    pub fn new(replies: Vec<Result<String, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Completion for ScriptedCompletion {
    async fn complete(&self, system: &str, content: &str) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            system: system.to_string(),
            content: content.to_string(),
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

/// Extractor returning fixed text, or failing when `text` is `None`.
pub struct StaticExtractor {
    pub text: Option<String>,
}

impl TextExtractor for StaticExtractor {
    fn extract(&self, _bytes: &[u8]) -> Result<String, ExtractionError> {
        self.text
            .clone()
            .ok_or_else(|| ExtractionError::Pdf("unreadable".to_string()))
    }
}

pub fn option_text(number: usize, letter: AnswerLetter) -> String {
    format!("{letter}) choice {letter} for question {number}")
}

/// Question `number` (1-based) whose correct option is `correct`.
pub fn question(number: usize, correct: AnswerLetter) -> Question {
    Question {
        question: format!("Question {number}"),
        options: AnswerLetter::ALL.map(|l| option_text(number, l)),
        correct_answer: correct,
        explanation: format!("Explanation {number}"),
    }
}

pub fn questions_all_correct(correct: AnswerLetter, count: usize) -> Vec<Question> {
    (1..=count).map(|n| question(n, correct)).collect()
}

/// Generator reply with `count` questions, all keyed to `correct`.
pub fn questions_json(count: usize, correct: AnswerLetter) -> String {
    json!({ "questions": questions_all_correct(correct, count) }).to_string()
}

pub fn profile() -> CandidateProfile {
    CandidateProfile {
        basic_info: BasicInfo {
            full_name: Some("Ada Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
            phone: None,
            current_position: Some("Staff Engineer".to_string()),
            location: Some("London".to_string()),
        },
        professional_info: ProfessionalInfo {
            years_of_experience: "12".to_string(),
            tech_stack: vec!["Rust".to_string(), "Tokio".to_string()],
            key_achievements: vec!["Built a distributed job scheduler".to_string()],
        },
    }
}

/// Analyzer reply for `profile()`, wrapped in a code fence the way models often answer.
pub fn profile_json() -> String {
    format!("```json\n{}\n```", json!(profile()))
}

/// Session in the Summary phase with every question keyed to `correct`.
pub fn finished_session(correct: AnswerLetter, answers: &[AnswerLetter]) -> InterviewSession {
    let mut session = InterviewSession::start();
    session
        .load_questions(questions_all_correct(correct, answers.len()))
        .unwrap();
    for (i, &letter) in answers.iter().enumerate() {
        session.submit_answer(&option_text(i + 1, letter)).unwrap();
        session.advance().unwrap();
    }
    session
}
