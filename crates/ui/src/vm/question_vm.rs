use quiz_core::model::{AnswerValue, FeedbackKind, OptionId, QuestionType};
use services::QuizAttempt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionVerdict {
    Correct,
    Incorrect,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub id: OptionId,
    /// 1-based position, used as the keyboard shortcut.
    pub key: String,
    pub text: String,
    pub selected: bool,
    /// Set only while graded feedback is showing.
    pub verdict: Option<OptionVerdict>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FeedbackVm {
    pub headline: String,
    pub is_correct: Option<bool>,
    pub blocking: bool,
    pub hint: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuestionCardVm {
    pub index: usize,
    pub number_label: String,
    pub title: String,
    pub type_label: &'static str,
    pub difficulty_label: &'static str,
    pub points_label: String,
    pub options: Vec<OptionVm>,
    pub essay_text: Option<String>,
    pub editable: bool,
    /// Multiple-choice and essay answers need an explicit confirm.
    pub needs_confirm: bool,
    pub answered: bool,
    /// A saved essay was edited and not saved again.
    pub unsaved_edit: bool,
    pub skipped: bool,
    pub feedback: Option<FeedbackVm>,
}

fn type_label(question_type: QuestionType) -> &'static str {
    match question_type {
        QuestionType::SingleChoice => "Single choice",
        QuestionType::MultipleChoice => "Multiple choice",
        QuestionType::Essay => "Essay",
    }
}

fn points_label(points: u32) -> String {
    if points == 1 {
        "1 pt".to_string()
    } else {
        format!("{points} pts")
    }
}

#[must_use]
pub fn map_question_card(attempt: &QuizAttempt) -> Option<QuestionCardVm> {
    let index = attempt.current_index();
    let question = attempt.current_question()?;
    let state = attempt.current_answer()?;
    let selected = state.selected();

    let feedback = attempt
        .feedback()
        .filter(|feedback| feedback.question_index == index);
    let record = feedback.and_then(|feedback| feedback.record());

    let options = question
        .options()
        .iter()
        .enumerate()
        .map(|(position, option)| {
            let is_selected = selected.is_some_and(|value| value.contains(&option.id));
            let verdict = record.and_then(|record| {
                if record.correct_answer.contains(&option.id) {
                    Some(OptionVerdict::Correct)
                } else if is_selected {
                    Some(OptionVerdict::Incorrect)
                } else {
                    None
                }
            });
            OptionVm {
                id: option.id.clone(),
                key: (position + 1).to_string(),
                text: option.text.clone(),
                selected: is_selected,
                verdict,
            }
        })
        .collect();

    let essay_text = match selected {
        Some(AnswerValue::Essay(text)) => Some(text.clone()),
        _ => None,
    };

    let feedback = feedback.map(|feedback| match &feedback.kind {
        FeedbackKind::Graded(record) => FeedbackVm {
            headline: if record.is_correct {
                format!("Correct! +{} points", record.points_earned)
            } else {
                "Incorrect".to_string()
            },
            is_correct: Some(record.is_correct),
            blocking: true,
            hint: if feedback.advance_at.is_some() {
                Some("Moving to the next question...")
            } else {
                Some("Last question. Submit when ready.")
            },
        },
        FeedbackKind::Saved => FeedbackVm {
            headline: "Answer saved".to_string(),
            is_correct: None,
            blocking: false,
            hint: None,
        },
    });

    Some(QuestionCardVm {
        index,
        number_label: format!("Question {}", index + 1),
        title: question.title().to_string(),
        type_label: type_label(question.question_type()),
        difficulty_label: question.difficulty().as_str(),
        points_label: points_label(question.points()),
        options,
        essay_text,
        editable: attempt.can_edit_answer(),
        needs_confirm: question.question_type() != QuestionType::SingleChoice,
        answered: state.is_answered(),
        unsaved_edit: state.has_unsaved_edit(),
        skipped: state.is_skipped(),
        feedback,
    })
}
