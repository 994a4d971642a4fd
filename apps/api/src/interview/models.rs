//! Interview data model: candidate profile, questions and answer letters.
//!
//! Everything the completion collaborator returns is decoded strictly into
//! these shapes; a reply that does not fit is a generation error.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Number of questions in every interview.
pub const QUESTION_COUNT: usize = 10;

/// Number of options per question.
pub const OPTION_COUNT: usize = 4;

// ────────────────────────────────────────────────────────────────────────────
// Candidate profile
// ────────────────────────────────────────────────────────────────────────────

/// Structured candidate information derived from resume text. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub basic_info: BasicInfo,
    pub professional_info: ProfessionalInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub current_position: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalInfo {
    /// Free text ("5 years", "3+"). Bare numbers from the model are accepted.
    #[serde(deserialize_with = "string_or_number")]
    pub years_of_experience: String,
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub key_achievements: Vec<String>,
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Questions
// ────────────────────────────────────────────────────────────────────────────

/// Option label. Position 0 in a question's options is `A`, position 3 is `D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum AnswerLetter {
    A,
    B,
    C,
    D,
}

impl AnswerLetter {
    pub const ALL: [AnswerLetter; OPTION_COUNT] =
        [AnswerLetter::A, AnswerLetter::B, AnswerLetter::C, AnswerLetter::D];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            AnswerLetter::A => 0,
            AnswerLetter::B => 1,
            AnswerLetter::C => 2,
            AnswerLetter::D => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AnswerLetter::A => "A",
            AnswerLetter::B => "B",
            AnswerLetter::C => "C",
            AnswerLetter::D => "D",
        }
    }
}

impl fmt::Display for AnswerLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for AnswerLetter {
    type Error = String;

    /// Accepts "A".."D", case-insensitive, with an optional trailing ')' label.
    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        let label = trimmed.strip_suffix(')').unwrap_or(trimmed).trim();
        match label.to_ascii_uppercase().as_str() {
            "A" => Ok(AnswerLetter::A),
            "B" => Ok(AnswerLetter::B),
            "C" => Ok(AnswerLetter::C),
            "D" => Ok(AnswerLetter::D),
            _ => Err(format!("correct_answer must be one of A, B, C, D (got {value:?})")),
        }
    }
}

/// A multiple-choice question. Fixed once generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(deserialize_with = "non_blank")]
    pub question: String,
    /// Exactly four distinct options, each carrying its own letter label ("A) ...").
    #[serde(deserialize_with = "labelled_options")]
    pub options: [String; OPTION_COUNT],
    pub correct_answer: AnswerLetter,
    pub explanation: String,
}

impl Question {
    /// Position of `text` among the options, if it is one of them.
    pub fn option_position(&self, text: &str) -> Option<usize> {
        self.options.iter().position(|o| o == text)
    }
}

fn non_blank<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if value.trim().is_empty() {
        return Err(serde::de::Error::custom("question text must not be empty"));
    }
    Ok(value)
}

/// Options must be labelled A) to D) in order, and no two may say the same thing.
fn labelled_options<'de, D>(deserializer: D) -> Result<[String; OPTION_COUNT], D::Error>
where
    D: Deserializer<'de>,
{
    let options = <[String; OPTION_COUNT]>::deserialize(deserializer)?;
    let mut bodies: Vec<String> = Vec::with_capacity(OPTION_COUNT);
    for (option, letter) in options.iter().zip(AnswerLetter::ALL) {
        let body = option_body(option, letter).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "option {option:?} must start with the label \"{letter})\""
            ))
        })?;
        let body = body.to_lowercase();
        if body.is_empty() {
            return Err(serde::de::Error::custom(format!("option {letter} is empty")));
        }
        if bodies.contains(&body) {
            return Err(serde::de::Error::custom(format!(
                "option {letter} duplicates an earlier option"
            )));
        }
        bodies.push(body);
    }
    Ok(options)
}

/// Text of `option` after its letter label, or `None` if the label is wrong.
fn option_body(option: &str, letter: AnswerLetter) -> Option<&str> {
    let rest = option.trim_start();
    let mut chars = rest.chars();
    let first = chars.next()?;
    if !first.eq_ignore_ascii_case(&letter.as_str().chars().next()?) {
        return None;
    }
    let rest = chars.as_str();
    rest.strip_prefix(')')
        .or_else(|| rest.strip_prefix('.'))
        .map(str::trim)
}

/// Wire shape of the question generator's reply.
#[derive(Debug, Deserialize)]
pub struct QuestionSet {
    pub questions: Vec<Question>,
}

// ────────────────────────────────────────────────────────────────────────────
// Results
// ────────────────────────────────────────────────────────────────────────────

/// Outcome of a completed interview. Computed once, in the Summary phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredResult {
    pub correct_count: usize,
    pub total_questions: usize,
    pub summary_text: String,
}

/// Shown to the candidate after each submitted answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerFeedback {
    pub selected: AnswerLetter,
    pub correct_answer: AnswerLetter,
    pub is_correct: bool,
    pub explanation: String,
}
