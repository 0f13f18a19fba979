mod html;
mod practice_vm;
mod review_vm;
mod time_fmt;

pub use html::{image_html, rich_text_html, sanitize_html};
pub use practice_vm::{
    FINISH_TIMEOUT, NavItemVm, OptionVm, PracticeIntent, PracticeVm, QuestionVm, TimerVm,
    intent_for_key,
};
pub use review_vm::{ReviewOptionVm, ReviewQuestionVm, ReviewVm, map_review};
pub use time_fmt::{format_countdown, format_started};

/// `A`, `B`, ... for option positions; `?` past `Z`.
pub(crate) fn option_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .filter(|index| *index < 26)
        .map_or('?', |index| char::from(b'A' + index))
}

#[cfg(test)]
mod tests {
    use super::option_letter;

    #[test]
    fn option_letters() {
        assert_eq!(option_letter(0), 'A');
        assert_eq!(option_letter(25), 'Z');
        assert_eq!(option_letter(26), '?');
    }
}
