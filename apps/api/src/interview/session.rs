//! Interview session: the three-phase state machine behind one candidate's run.
//!
//! `Upload → Interview → Summary`, linear. Inside `Interview` every question
//! alternates between answering (`ready_for_next == true`) and reviewing
//! (`ready_for_next == false`). The only way back is `restart()`.

use serde::Serialize;
use thiserror::Error;

use crate::interview::models::{AnswerFeedback, AnswerLetter, Question, QUESTION_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Upload,
    Interview,
    Summary,
}

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("expected phase {expected:?} but session is in {actual:?}")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("expected {expected} questions, generator produced {actual}")]
    QuestionCount { expected: usize, actual: usize },

    #[error("{0:?} is not one of the current question's options")]
    UnknownOption(String),

    #[error("current question has already been answered; advance first")]
    AlreadyAnswered,

    #[error("current question has not been answered yet")]
    AnswerPending,

    #[error("{answers} answers recorded for {questions} questions")]
    IncompleteAnswers { answers: usize, questions: usize },
}

/// Session state owned by exactly one interactive run.
#[derive(Debug, Clone)]
pub struct InterviewSession {
    phase: Phase,
    questions: Vec<Question>,
    current_question_index: usize,
    answers: Vec<AnswerLetter>,
    ready_for_next: bool,
}

impl Default for InterviewSession {
    fn default() -> Self {
        Self::start()
    }
}

impl InterviewSession {
    /// Fresh session: Upload phase, no questions, no answers, ready for input.
    pub fn start() -> Self {
        Self {
            phase: Phase::Upload,
            questions: Vec::new(),
            current_question_index: 0,
            answers: Vec::new(),
            ready_for_next: true,
        }
    }

    /// Discards all progress.
    pub fn restart(&mut self) {
        *self = Self::start();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    pub fn answers(&self) -> &[AnswerLetter] {
        &self.answers
    }

    pub fn ready_for_next(&self) -> bool {
        self.ready_for_next
    }

    /// The question on screen, if the session is in the Interview phase.
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            Phase::Interview => self.questions.get(self.current_question_index),
            _ => None,
        }
    }

    /// Stores the generated questions and opens the interview.
    /// Anything other than exactly `QUESTION_COUNT` questions is rejected
    /// and the session stays in Upload.
    pub fn load_questions(&mut self, questions: Vec<Question>) -> Result<(), SessionError> {
        self.expect_phase(Phase::Upload)?;
        if questions.len() != QUESTION_COUNT {
            return Err(SessionError::QuestionCount {
                expected: QUESTION_COUNT,
                actual: questions.len(),
            });
        }

        self.questions = questions;
        self.current_question_index = 0;
        self.answers.clear();
        self.ready_for_next = true;
        self.phase = Phase::Interview;
        Ok(())
    }

    /// Records the letter of the selected option for the current question.
    pub fn submit_answer(&mut self, selected_option: &str) -> Result<AnswerFeedback, SessionError> {
        self.expect_phase(Phase::Interview)?;
        if !self.ready_for_next {
            return Err(SessionError::AlreadyAnswered);
        }

        let question = &self.questions[self.current_question_index];
        let selected = question
            .option_position(selected_option)
            .and_then(AnswerLetter::from_index)
            .ok_or_else(|| SessionError::UnknownOption(selected_option.to_string()))?;

        let feedback = AnswerFeedback {
            selected,
            correct_answer: question.correct_answer,
            is_correct: selected == question.correct_answer,
            explanation: question.explanation.clone(),
        };

        self.answers.push(selected);
        self.ready_for_next = false;
        debug_assert_eq!(self.answers.len(), self.current_question_index + 1);
        Ok(feedback)
    }

    /// Moves past a reviewed question. The last advance ends the interview.
    pub fn advance(&mut self) -> Result<Phase, SessionError> {
        self.expect_phase(Phase::Interview)?;
        if self.ready_for_next {
            return Err(SessionError::AnswerPending);
        }

        if self.current_question_index + 1 < self.questions.len() {
            self.current_question_index += 1;
            self.ready_for_next = true;
        } else {
            self.phase = Phase::Summary;
        }
        Ok(self.phase)
    }

    /// Number of answers matching the stored correct letters, position by position.
    pub fn score(&self) -> Result<usize, SessionError> {
        self.expect_phase(Phase::Summary)?;
        if self.answers.len() != self.questions.len() {
            return Err(SessionError::IncompleteAnswers {
                answers: self.answers.len(),
                questions: self.questions.len(),
            });
        }

        Ok(self
            .questions
            .iter()
            .zip(&self.answers)
            .filter(|(q, a)| q.correct_answer == **a)
            .count())
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), SessionError> {
        if self.phase != expected {
            return Err(SessionError::WrongPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }
}
