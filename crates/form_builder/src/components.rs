use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;

use crate::{
    action::Action,
    domain::FormBuilder,
    tui::{Event, EventResponse, Frame},
};

pub mod config_panel;
pub mod editor;
pub mod line_edit;
pub mod popup;
pub mod popups;
pub mod preview;

/// `Component` is a visual and interactive element of the user interface.
///
/// Panels read the current `FormBuilder` but never mutate it: every change is
/// returned as an `Action` and applied by the reducer.
pub trait Component {
    /// Keymap context consulted after the component declined a key.
    fn keymap_context(&self) -> &'static str {
        crate::ui::keymap::GLOBAL_CONTEXT
    }

    /// A line editor is open; the footer shows INSERT and global keys are not consulted.
    fn is_editing(&self) -> bool {
        false
    }

    /// Focus moved to (`true`) or away from this panel.
    fn set_focused(&mut self, _focused: bool) {}

    fn handle_events(
        &mut self,
        event: Event,
        state: &FormBuilder,
    ) -> Result<Option<EventResponse<Action>>> {
        let r = match event {
            Event::Key(key_event) => self.handle_key_events(key_event, state)?,
            Event::Paste(text) => self.handle_paste(&text, state)?,
            _ => None,
        };
        Ok(r)
    }

    fn handle_key_events(
        &mut self,
        _key: KeyEvent,
        _state: &FormBuilder,
    ) -> Result<Option<EventResponse<Action>>> {
        Ok(None)
    }

    fn handle_paste(
        &mut self,
        _text: &str,
        _state: &FormBuilder,
    ) -> Result<Option<EventResponse<Action>>> {
        Ok(None)
    }

    /// Called after the reducer applied `action`; `state` is already updated.
    fn update(&mut self, _action: &Action, _state: &FormBuilder) -> Result<Option<Action>> {
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &FormBuilder) -> Result<()>;
}
