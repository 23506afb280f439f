//! View seams used by the app controller. The DOM implementations live in
//! `components::dom`; tests drive the controller through in-memory fakes.

use super::ui::AlertKind;

/// A place that shows one status banner at a time.
pub trait StatusView {
    fn show(&self, kind: AlertKind, message: &str);
}

/// One username form: text input, submit button and result area.
pub trait FormView: StatusView {
    fn username(&self) -> String;
    fn clear_username(&self);
    /// Busy state for the submit button; `false` must restore the idle look.
    fn set_loading(&self, loading: bool);
    /// Whether a flow currently holds this form.
    fn is_loading(&self) -> bool;
}
