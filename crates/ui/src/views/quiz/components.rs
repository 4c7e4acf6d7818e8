use dioxus::prelude::*;
use dioxus_router::Link;

use quiz_core::model::OptionId;

use crate::routes::Route;
use crate::vm::{
    FeedbackVm, OptionVerdict, QuestionCardVm, QuestionMarker, QuizHeaderVm, QuizIntent,
    QuizNavVm, QuizResultVm, ResultVerdict, TimeUrgency,
};

fn timer_class(urgency: TimeUrgency) -> &'static str {
    match urgency {
        TimeUrgency::Normal => "quiz-timer",
        TimeUrgency::Warning => "quiz-timer quiz-timer--warning",
        TimeUrgency::Critical => "quiz-timer quiz-timer--critical",
    }
}

fn marker_class(marker: QuestionMarker) -> &'static str {
    match marker {
        QuestionMarker::Current => "nav-cell nav-cell--current",
        QuestionMarker::Answered => "nav-cell nav-cell--answered",
        QuestionMarker::Skipped => "nav-cell nav-cell--skipped",
        QuestionMarker::Visited => "nav-cell nav-cell--visited",
        QuestionMarker::Unvisited => "nav-cell",
    }
}

fn option_class(selected: bool, verdict: Option<OptionVerdict>) -> &'static str {
    match (verdict, selected) {
        (Some(OptionVerdict::Correct), _) => "option option--correct",
        (Some(OptionVerdict::Incorrect), _) => "option option--incorrect",
        (None, true) => "option option--selected",
        (None, false) => "option",
    }
}

#[component]
pub fn QuizHeader(header: QuizHeaderVm) -> Element {
    let bar_style = format!("width: {:.0}%", header.progress_percentage);

    rsx! {
        header { class: "quiz-header",
            div { class: "quiz-header__row",
                h2 { class: "quiz-header__title", "{header.title}" }
                span {
                    class: timer_class(header.urgency),
                    id: "quiz-timer",
                    role: "timer",
                    "{header.time_label}"
                }
            }
            div { class: "quiz-header__row",
                span { class: "quiz-header__position", "{header.position_label}" }
                span { class: "quiz-header__progress", "{header.progress_label}" }
            }
            div { class: "quiz-progress",
                div { class: "quiz-progress__bar", style: "{bar_style}" }
            }
        }
    }
}

#[component]
pub fn QuizNavigationPanel(
    nav: QuizNavVm,
    busy: bool,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    let jump_disabled = busy || !nav.can_jump;
    let cells: Vec<(usize, String, &'static str)> = nav
        .cells
        .iter()
        .map(|cell| (cell.index, cell.label.clone(), marker_class(cell.marker)))
        .collect();

    rsx! {
        nav { class: "quiz-nav", aria_label: "Questions",
            div { class: "quiz-nav__grid",
                for (index, label, class) in cells {
                    button {
                        key: "{index}",
                        class: "{class}",
                        r#type: "button",
                        disabled: jump_disabled,
                        onclick: move |_| on_intent.call(QuizIntent::Jump(index)),
                        "{label}"
                    }
                }
            }
            div { class: "quiz-nav__actions",
                button {
                    class: "btn btn-secondary",
                    id: "quiz-previous",
                    r#type: "button",
                    disabled: busy || !nav.can_previous,
                    onclick: move |_| on_intent.call(QuizIntent::Previous),
                    "Previous"
                }
                button {
                    class: "btn btn-secondary",
                    id: "quiz-next",
                    r#type: "button",
                    disabled: busy || !nav.can_next,
                    onclick: move |_| on_intent.call(QuizIntent::Next),
                    "Next"
                }
                if nav.submit_enabled {
                    button {
                        class: "btn btn-primary",
                        id: "quiz-submit",
                        r#type: "button",
                        disabled: busy,
                        onclick: move |_| on_intent.call(QuizIntent::SubmitQuiz),
                        "Submit quiz"
                    }
                }
            }
        }
    }
}

#[component]
pub fn QuestionCard(
    card: QuestionCardVm,
    busy: bool,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    let editable = card.editable && !busy;
    let skip_disabled = !editable || card.answered;
    let is_essay = card.options.is_empty();
    let essay_text = card.essay_text.clone().unwrap_or_default();
    let options: Vec<(OptionId, String, String, &'static str)> = card
        .options
        .iter()
        .map(|option| {
            (
                option.id.clone(),
                option.key.clone(),
                option.text.clone(),
                option_class(option.selected, option.verdict),
            )
        })
        .collect();

    rsx! {
        article { class: "question-card", id: "question-card",
            div { class: "question-card__meta",
                span { class: "question-card__number", "{card.number_label}" }
                span { "{card.type_label}" }
                span { "{card.difficulty_label}" }
                span { "{card.points_label}" }
            }
            h3 { class: "question-card__title", "{card.title}" }

            if is_essay {
                textarea {
                    class: "question-card__essay",
                    id: "question-essay",
                    placeholder: "Write your answer",
                    disabled: !editable,
                    value: "{essay_text}",
                    oninput: move |evt: FormEvent| on_intent.call(QuizIntent::Type(evt.value())),
                }
            } else {
                ul { class: "question-card__options",
                    for (id, key, text, class) in options {
                        li { key: "{key}",
                            button {
                                class: "{class}",
                                r#type: "button",
                                disabled: !editable,
                                onclick: move |_| on_intent.call(QuizIntent::Select(id.clone())),
                                span { class: "option__key", "{key}" }
                                span { class: "option__text", "{text}" }
                            }
                        }
                    }
                }
            }

            if card.skipped && !card.answered {
                p { class: "question-card__note", "Skipped" }
            }
            if card.unsaved_edit {
                p { class: "question-card__note",
                    "Edited since it was saved. Save again to keep the new answer."
                }
            }
            if let Some(feedback) = card.feedback.clone() {
                FeedbackBanner { feedback, on_intent }
            }

            div { class: "question-card__actions",
                if card.needs_confirm {
                    button {
                        class: "btn btn-primary",
                        id: "question-save",
                        r#type: "button",
                        disabled: !editable,
                        onclick: move |_| on_intent.call(QuizIntent::SubmitAnswer),
                        "Save answer"
                    }
                }
                button {
                    class: "btn btn-ghost",
                    id: "question-skip",
                    r#type: "button",
                    disabled: skip_disabled,
                    onclick: move |_| on_intent.call(QuizIntent::Skip),
                    "Skip"
                }
            }
        }
    }
}

#[component]
fn FeedbackBanner(feedback: FeedbackVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let class = match feedback.is_correct {
        Some(true) => "feedback feedback--correct",
        Some(false) => "feedback feedback--incorrect",
        None => "feedback feedback--saved",
    };

    rsx! {
        div { class: "{class}", role: "status",
            p { class: "feedback__headline", "{feedback.headline}" }
            if let Some(hint) = feedback.hint {
                p { class: "feedback__hint", "{hint}" }
            }
            if feedback.blocking {
                button {
                    class: "btn btn-ghost",
                    id: "feedback-dismiss",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::DismissFeedback),
                    "Dismiss"
                }
            }
        }
    }
}

#[component]
pub fn QuizResults(result: QuizResultVm) -> Element {
    let verdict = result.verdict_label().map(|label| {
        let class = match result.verdict {
            Some(ResultVerdict::Passed) => "verdict verdict--passed",
            _ => "verdict verdict--failed",
        };
        (label, class)
    });

    rsx! {
        section { class: "quiz-results",
            h2 { "Quiz submitted" }
            dl { class: "summary",
                dt { "Score" }
                dd { "{result.score_label} ({result.percentage_label})" }

                dt { "Correct" }
                dd { "{result.correct_label}" }

                dt { "Time" }
                dd { "{result.time_label}" }

                if let Some((label, class)) = verdict {
                    dt { "Result" }
                    dd { class: "{class}", "{label}" }
                }
            }
            div { class: "quiz-results__actions",
                Link { to: Route::Home {}, "Back to start" }
            }
        }
    }
}
