//! Concrete popups. Shared helpers live in `components/popup.rs`.
pub mod alert;
pub mod keymap;

pub use crate::components::popup::{
    PopupComponent, centered_rect_fixed, draw_popup_frame, render_backdrop,
};
pub use alert::AlertPopup;
pub use keymap::KeymapOverlay;
