use dioxus::prelude::*;

/// Screen-level loading state derived from a resource.
///
/// Services degrade failures to empty results, so there is no error arm.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(resource: Resource<T>) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => resource
            .value()
            .read()
            .as_ref()
            .map_or(ViewState::Loading, |data| ViewState::Ready(data.clone())),
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
