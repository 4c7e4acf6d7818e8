use dioxus::prelude::ReadableExt;
use quiz_core::model::QuizType;
use quiz_core::time::fixed_clock;
use services::api::ApiEndpoint;
use services::{InMemoryQuizApi, QuizApi};

use super::test_harness::{ViewKind, sample_bank, setup_view_harness, setup_view_harness_with_api};
use crate::vm::{QuizIntent, QuizPhase, QuizVm};

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_lists_quiz_types() {
    let mut harness = setup_view_harness(ViewKind::Home, sample_bank(), 120);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Choose a quiz"), "missing heading in {html}");
    assert!(html.contains("Timed quiz"), "missing timed choice in {html}");
    assert!(html.contains("Mock exam"), "missing mock choice in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Quiz(QuizType::Timed), sample_bank(), 120);
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Question 1 of 3"), "missing position in {html}");
    assert!(html.contains("What is two plus two"), "missing title in {html}");
    assert!(html.contains("02:00"), "missing countdown in {html}");
    assert!(html.contains("Previous"), "missing nav in {html}");
    assert!(!html.contains("Submit quiz"), "submit shown too early in {html}");
    assert_eq!(harness.api.calls().start, 1);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_answers_and_submits() {
    let mut harness = setup_view_harness(ViewKind::Quiz(QuizType::Timed), sample_bank(), 120);
    harness.rebuild();
    harness.settle().await;

    harness.dispatch().call(QuizIntent::Choose(2));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Correct! +10 points"), "missing feedback in {html}");
    assert_eq!(
        harness.vm().read().as_ref().map(QuizVm::phase),
        Some(QuizPhase::Feedback)
    );

    harness.dispatch().call(QuizIntent::SubmitQuiz);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Quiz submitted"), "missing results in {html}");
    assert!(html.contains("10 / 25"), "missing score in {html}");
    assert!(!html.contains("question-card"), "question still shown in {html}");
    assert_eq!(harness.api.calls().submit, 1);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_offers_retry_when_start_fails() {
    let api = InMemoryQuizApi::new(sample_bank(), 120).with_clock(fixed_clock());
    api.fail_next(ApiEndpoint::Start);
    let mut harness = setup_view_harness_with_api(ViewKind::Quiz(QuizType::Timed), api, false);
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("Could not reach the quiz server"),
        "missing error in {html}"
    );
    assert!(html.contains("Retry"), "missing retry in {html}");
    assert!(harness.vm().read().is_some(), "vm not returned after failure");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_reports_empty_quiz() {
    let mut harness = setup_view_harness(ViewKind::Quiz(QuizType::Mock), Vec::new(), 120);
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("This quiz has no questions yet."),
        "missing empty message in {html}"
    );
    assert!(!html.contains("Retry"), "empty quiz offered retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_resumes_open_attempt() {
    let api = InMemoryQuizApi::new(sample_bank(), 120).with_clock(fixed_clock());
    api.start_quiz(QuizType::Timed).await.expect("seed session");
    let mut harness = setup_view_harness_with_api(ViewKind::Quiz(QuizType::Timed), api, true);
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("Resuming your unfinished quiz."),
        "missing resume notice in {html}"
    );
    assert!(html.contains("Question 1 of 3"), "missing question in {html}");
    assert_eq!(harness.api.calls().start, 1);
    assert_eq!(harness.api.calls().resume, 1);
}
