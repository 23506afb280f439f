pub mod alert;
pub mod button;

pub use alert::AlertKind;
#[cfg(target_arch = "wasm32")]
pub use alert::render_alert;
#[cfg(target_arch = "wasm32")]
pub use button::{is_button_loading, set_button_loading};
