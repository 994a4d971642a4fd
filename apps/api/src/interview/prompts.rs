// Completion prompts for the interview pipeline.
// Templates use `{placeholder}` markers replaced before sending.

/// System prompt for resume analysis.
pub const PROFILE_ANALYSIS_SYSTEM: &str = r#"You are an experienced technical recruiter.
Analyze the resume provided by the user and return the candidate profile as a JSON object with this EXACT schema:
{
  "basic_info": {
    "full_name": "",
    "email": "",
    "phone": "",
    "current_position": "",
    "location": ""
  },
  "professional_info": {
    "years_of_experience": "",
    "tech_stack": [],
    "key_achievements": []
  }
}
Use an empty string for any basic_info field the resume does not mention.
Keep the analysis focused and concise."#;

/// System prompt for question generation. Replace `{question_count}` before sending.
pub const QUESTION_GENERATION_SYSTEM: &str = r#"You are a senior engineer running a technical screening interview.
Create {question_count} multiple choice questions that test the candidate's knowledge of their core tech stack and abilities.
Focus on their technical skills and pitch the difficulty at their experience level.

Return a JSON object with this EXACT schema:
{
  "questions": [
    {
      "question": "Technical question based on their experience",
      "options": ["A) option1", "B) option2", "C) option3", "D) option4"],
      "correct_answer": "A",
      "explanation": "Brief explanation of the correct answer"
    }
  ]
}

HARD RULES:
1. Exactly {question_count} questions
2. Exactly 4 options per question, labelled "A) ", "B) ", "C) ", "D) " in that order
3. `correct_answer` is the single letter of the correct option
4. Vary the position of the correct option across questions"#;

/// User content for question generation. Replace `{resume_text}` and `{profile_json}`.
pub const QUESTION_GENERATION_CONTENT: &str = "Resume Text: {resume_text}\nAnalysis: {profile_json}";

/// System prompt for the performance summary.
/// Replace `{correct_count}`, `{total}`, `{profile_json}`, `{answers_json}`.
pub const SUMMARY_SYSTEM: &str = r#"Write a concise performance summary (about 50 words) for a candidate who scored {correct_count}/{total} in a multiple choice technical interview.
Their profile: {profile_json}
Their answers as [question, selected option letter] pairs: {answers_json}

Focus on:
1. Strong areas
2. Areas for improvement
3. One key recommendation

Respond with plain prose only."#;

/// User content for the performance summary.
pub const SUMMARY_CONTENT: &str = "Generate the summary.";

/// Shown when the summary call fails; the score is still reported.
pub const SUMMARY_FALLBACK: &str = "Unable to generate summary.";
