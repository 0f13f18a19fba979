use dioxus::prelude::*;

use crate::vm::{OptionVm, QuestionVm, ReviewQuestionVm, ReviewVm, TimerVm};

fn option_class(option: &OptionVm) -> &'static str {
    match (option.selected, option.marked_correct) {
        (true, true) => "option option--selected option--correct",
        (true, false) => "option option--selected",
        (false, true) => "option option--correct",
        (false, false) => "option",
    }
}

fn review_option_class(selected: bool, correct: bool) -> &'static str {
    match (selected, correct) {
        (true, true) => "option option--selected option--correct",
        (true, false) => "option option--selected option--wrong",
        (false, true) => "option option--correct",
        (false, false) => "option",
    }
}

#[component]
pub fn QuestionCard(question: QuestionVm, locked: bool, on_toggle: EventHandler<usize>) -> Element {
    rsx! {
        article { class: "question",
            div { class: "question__heading",
                span { class: "question__number", "Question {question.number}" }
                if let Some(domain) = question.domain.as_ref() {
                    span { class: "question__domain", "{domain}" }
                }
            }
            div { class: "question__text", dangerous_inner_html: "{question.html}" }
            p { class: "question__hint", "{question.hint}" }
            ul { class: "options",
                for (index, option) in question.options.iter().enumerate() {
                    li { key: "{index}",
                        button {
                            class: option_class(option),
                            disabled: locked,
                            "aria-pressed": option.selected,
                            onclick: move |_| on_toggle.call(index),
                            span { class: "option__letter", "{option.letter}" }
                            span { class: "option__text", dangerous_inner_html: "{option.html}" }
                            if let Some(image) = option.image_html.as_ref() {
                                span { class: "option__image", dangerous_inner_html: "{image}" }
                            }
                        }
                    }
                }
            }
            if let Some(explanation) = question.explanation_html.as_ref() {
                div { class: "question__explanation",
                    h4 { "Explanation" }
                    div { dangerous_inner_html: "{explanation}" }
                }
            }
        }
    }
}

#[component]
pub fn TimerBadge(timer: TimerVm) -> Element {
    let class = match timer {
        TimerVm::Untimed => "timer timer--off",
        TimerVm::Running(_) => "timer",
        TimerVm::Paused(_) => "timer timer--paused",
        TimerVm::Expired => "timer timer--expired",
    };
    let label = timer.label();
    rsx! {
        span { class, id: "practice-timer", "{label}" }
    }
}

#[component]
pub fn TimeUpBanner() -> Element {
    rsx! {
        div { class: "banner banner--time-up", role: "alert",
            strong { "Time's up." }
            " Your answers are locked. Press Finish to see your results."
        }
    }
}

#[component]
pub fn ReviewSummary(vm: ReviewVm) -> Element {
    rsx! {
        section { class: "review-summary",
            div { class: vm.outcome_class,
                span { class: "outcome__label", "{vm.outcome_label}" }
                span { class: "outcome__score", "{vm.score_label}" }
            }
            ul { class: "review-summary__stats",
                if let Some(marks) = vm.marks_label.as_ref() {
                    li { "{marks}" }
                }
                if let Some(pass) = vm.pass_label.as_ref() {
                    li { "{pass}" }
                }
                li { "{vm.correct_label}" }
                li { "{vm.incorrect_label}" }
                li { "{vm.unanswered_label}" }
            }
        }
        if vm.is_empty() {
            p { class: "empty", "No answers were recorded for this test." }
        }
        for question in vm.questions.iter().cloned() {
            ReviewQuestion { key: "{question.number}", question }
        }
    }
}

#[component]
pub fn ReviewQuestion(question: ReviewQuestionVm) -> Element {
    rsx! {
        article { class: "review-question",
            div { class: "question__heading",
                span { class: "question__number", "Question {question.number}" }
                span { class: question.status_class, "{question.status_label}" }
                if let Some(marks) = question.marks_label.as_ref() {
                    span { class: "question__marks", "{marks}" }
                }
                if let Some(domain) = question.domain.as_ref() {
                    span { class: "question__domain", "{domain}" }
                }
            }
            div { class: "question__text", dangerous_inner_html: "{question.html}" }
            ul { class: "options options--review",
                for (index, option) in question.options.iter().enumerate() {
                    li {
                        key: "{index}",
                        class: review_option_class(option.selected, option.correct),
                        span { class: "option__letter", "{option.letter}" }
                        span { class: "option__text", dangerous_inner_html: "{option.html}" }
                        if let Some(image) = option.image_html.as_ref() {
                            span { class: "option__image", dangerous_inner_html: "{image}" }
                        }
                        if option.selected {
                            span { class: "option__tag", "Your answer" }
                        }
                    }
                }
            }
            if let Some(note) = question.note {
                p { class: "review-question__note", "{note}" }
            }
            if let Some(explanation) = question.explanation_html.as_ref() {
                div { class: "question__explanation",
                    h4 { "Explanation" }
                    div { dangerous_inner_html: "{explanation}" }
                }
            }
        }
    }
}
