//! Loading state for submit buttons. The original label is parked in
//! `data-original-text` while the button is busy and restored afterwards.

#[cfg(target_arch = "wasm32")]
use web_sys::HtmlButtonElement;

pub const ORIGINAL_TEXT_ATTR: &str = "data-original-text";
pub const LOADING_CLASS: &str = "loading";

/// Switches the button between its busy and idle look.
#[cfg(target_arch = "wasm32")]
pub fn set_button_loading(button: &HtmlButtonElement, loading: bool, busy_label: &str) {
    let class_list = button.class_list();

    if loading {
        // A label already parked belongs to the idle look; never replace it with the busy one.
        if !button.has_attribute(ORIGINAL_TEXT_ATTR) {
            let original = button.text_content().unwrap_or_default();
            let _ = button.set_attribute(ORIGINAL_TEXT_ATTR, &original);
        }
        button.set_text_content(Some(busy_label));
        button.set_disabled(true);
        let _ = class_list.add_1(LOADING_CLASS);
    } else {
        if let Some(original) = button.get_attribute(ORIGINAL_TEXT_ATTR) {
            button.set_text_content(Some(&original));
        }
        button.set_disabled(false);
        let _ = class_list.remove_1(LOADING_CLASS);
        let _ = button.remove_attribute(ORIGINAL_TEXT_ATTR);
    }
}

#[cfg(target_arch = "wasm32")]
#[must_use]
pub fn is_button_loading(button: &HtmlButtonElement) -> bool {
    button.disabled() || button.class_list().contains(LOADING_CLASS)
}
