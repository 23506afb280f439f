//! DOM-backed views bound to the element ids in `index.html`.

use super::{
    ui::{AlertKind, is_button_loading, render_alert, set_button_loading},
    view::{FormView, StatusView},
};
use crate::app_lib::AppError;
use tracing::error;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlInputElement};

/// Looks up a required element; a missing or mistyped id is a wiring fault.
pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, AppError> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<T>().ok())
        .ok_or_else(|| AppError::ElementNotFound(id.to_string()))
}

/// Result banner inside an arbitrary container element.
#[derive(Clone, Debug)]
pub struct DomStatus {
    container: Element,
}

impl DomStatus {
    /// # Errors
    /// Returns `AppError::ElementNotFound` when `id` is absent.
    pub fn bind(document: &Document, id: &str) -> Result<Self, AppError> {
        Ok(Self {
            container: element_by_id(document, id)?,
        })
    }
}

impl StatusView for DomStatus {
    fn show(&self, kind: AlertKind, message: &str) {
        if let Err(err) = render_alert(&self.container, kind, message) {
            error!(error = %err, "failed to render status");
        }
    }
}

/// Element ids for one form.
#[derive(Clone, Copy, Debug)]
pub struct FormIds {
    pub input: &'static str,
    pub button: &'static str,
    pub result: &'static str,
}

pub const REGISTER_FORM: FormIds = FormIds {
    input: "register-username",
    button: "register-btn",
    result: "register-result",
};

pub const LOGIN_FORM: FormIds = FormIds {
    input: "login-username",
    button: "login-btn",
    result: "login-result",
};

#[derive(Clone, Debug)]
pub struct DomForm {
    pub input: HtmlInputElement,
    pub button: HtmlButtonElement,
    result: DomStatus,
    busy_label: String,
}

impl DomForm {
    /// # Errors
    /// Returns `AppError::ElementNotFound` for the first missing id.
    pub fn bind(document: &Document, ids: FormIds, busy_label: String) -> Result<Self, AppError> {
        Ok(Self {
            input: element_by_id(document, ids.input)?,
            button: element_by_id(document, ids.button)?,
            result: DomStatus::bind(document, ids.result)?,
            busy_label,
        })
    }
}

impl StatusView for DomForm {
    fn show(&self, kind: AlertKind, message: &str) {
        self.result.show(kind, message);
    }
}

impl FormView for DomForm {
    fn username(&self) -> String {
        self.input.value()
    }

    fn clear_username(&self) {
        self.input.set_value("");
    }

    fn set_loading(&self, loading: bool) {
        set_button_loading(&self.button, loading, &self.busy_label);
    }

    fn is_loading(&self) -> bool {
        is_button_loading(&self.button)
    }
}
