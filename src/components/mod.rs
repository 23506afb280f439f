//! View building blocks: alert banners, button loading state and the view traits
//! the app controller renders through.

#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod ui;
pub mod view;

pub use ui::AlertKind;
pub use view::{FormView, StatusView};
