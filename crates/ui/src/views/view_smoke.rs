use serde_json::{Value, json};
use services::InMemoryBackend;

use super::test_harness::{ViewKind, backend_with, setup_view_harness};

fn view_model() -> Value {
    json!({
        "DurationInSeconds": 300,
        "Questions": [
            {
                "PKTestQuestionId": 1,
                "Description": "<p>Largest planet?</p>",
                "Options": [
                    { "PKOptionId": 10, "Description": "Jupiter", "IsCorrect": true },
                    { "PKOptionId": 11, "Description": "Mars", "IsCorrect": false }
                ]
            },
            {
                "PKTestQuestionId": 2,
                "Description": "Gas giants",
                "IsMultipleAnswer": true,
                "Options": [
                    { "PKOptionId": 12, "Description": "Saturn" },
                    { "PKOptionId": 13, "Description": "Venus" }
                ]
            }
        ]
    })
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_prefills_initial_test_id() {
    let harness = setup_view_harness(ViewKind::Home, InMemoryBackend::new());
    let html = harness.render();
    assert!(html.contains("Open a test"), "{html}");
    assert!(html.contains("42"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Practice(7), backend_with(7, view_model(), None));

    let html = harness.drive_until("Question 1 of 2").await;
    assert!(html.contains("Question 1 of 2"), "{html}");
    assert!(html.contains("Largest planet?"), "{html}");
    assert!(html.contains("Time left 5:00"), "{html}");
    assert!(html.contains("0 / 2 answered"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_handles_missing_test() {
    let mut harness = setup_view_harness(ViewKind::Practice(8), InMemoryBackend::new());

    let html = harness.drive_until("This test has no questions.").await;
    assert!(html.contains("This test has no questions."), "{html}");
    assert!(html.contains("Untimed"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn review_view_renders_outcome() {
    let record = json!({
        "PassPercentage": 50,
        "TotalMarksAllocated": 2,
        "JsonAsString": json!({
            "Questions": [
                { "PKTestQuestionId": 1, "SelectedOptionId": "10", "MarksScoredForthisQuestion": 1,
                  "Description": "<p>Largest planet?</p>",
                  "Options": [ { "PKOptionId": 10, "Description": "Jupiter" }, { "PKOptionId": 11, "Description": "Mars" } ] },
                { "PKTestQuestionId": 2, "SelectedOptionId": "", "MarksScoredForthisQuestion": 0,
                  "Description": "Gas giants",
                  "Options": [ { "PKOptionId": 12, "Description": "Saturn" }, { "PKOptionId": 13, "Description": "Venus" } ] }
            ]
        }).to_string()
    });
    let mut harness = setup_view_harness(ViewKind::Review(7), backend_with(7, view_model(), Some(record)));

    let html = harness.drive_until("1 correct").await;
    assert!(html.contains("Passed"), "{html}");
    assert!(html.contains("50%"), "{html}");
    assert!(html.contains("1 unanswered"), "{html}");
    assert!(html.contains("Your answer"), "{html}");
    assert!(harness.backend.submissions().is_empty());
}
