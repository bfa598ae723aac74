use color_eyre::Result;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use strum::{Display, EnumIter, IntoEnumIterator};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::{
    action::Action,
    components::{
        Component,
        config_panel::{self, ConfigPanel},
        editor::{self, FieldEditor},
        popup::PopupComponent,
        popups::{AlertPopup, KeymapOverlay, render_backdrop},
        preview::{self, PreviewPanel},
    },
    config::Config,
    core::{effects::Effect, executor::TaskExecutor, reducer::reduce, state::RootState},
    domain::FormBuilder,
    tui::{Event, EventResponse, Tui},
    ui::keymap::{GLOBAL_CONTEXT, action_from_key, mappable_entries_for_context},
};

/// Panel that receives keys when no popup is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Focus {
    Editor,
    Preview,
    Config,
}

impl Focus {
    fn context(self) -> &'static str {
        match self {
            Focus::Editor => editor::CONTEXT,
            Focus::Preview => preview::CONTEXT,
            Focus::Config => config_panel::CONTEXT,
        }
    }

    fn step(self, dir: isize) -> Focus {
        let all: Vec<Focus> = Focus::iter().collect();
        let pos = all.iter().position(|f| *f == self).unwrap_or(0) as isize;
        all[(pos + dir).rem_euclid(all.len() as isize) as usize]
    }
}

pub struct App {
    pub config: Config,
    pub tick_rate: f64,
    pub frame_rate: f64,
    pub state: RootState,
    pub focus: Focus,
    pub popup: Option<Box<dyn PopupComponent>>,
    pub should_quit: bool,
    pub should_suspend: bool,
    editor: FieldEditor,
    preview: PreviewPanel,
    config_panel: ConfigPanel,
    executor: Option<TaskExecutor>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let state = RootState::new(config.export_path());
        let mut editor = FieldEditor::new();
        editor.set_focused(true);
        Self {
            tick_rate: config.tick_rate,
            frame_rate: config.frame_rate,
            config,
            state,
            focus: Focus::Editor,
            popup: None,
            should_quit: false,
            should_suspend: false,
            editor,
            preview: PreviewPanel::new(),
            config_panel: ConfigPanel::new(),
            executor: None,
            action_tx,
            action_rx,
        }
    }

    pub fn tick_rate(mut self, tick_rate: Option<f64>) -> Self {
        if let Some(rate) = tick_rate {
            self.tick_rate = rate;
        }
        self
    }

    pub fn frame_rate(mut self, frame_rate: Option<f64>) -> Self {
        if let Some(rate) = frame_rate {
            self.frame_rate = rate;
        }
        self
    }

    /// Queue a config document: it lands in the buffer and is loaded, so
    /// parse errors show up as an alert once the UI is running.
    pub fn preload(&self, text: String) {
        self.action_tx.send(Action::SetConfigBuffer(text)).ok();
        self.action_tx.send(Action::LoadConfig).ok();
    }

    pub fn builder(&self) -> &FormBuilder {
        &self.state.builder
    }

    pub fn action_sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?
            .tick_rate(self.tick_rate)
            .frame_rate(self.frame_rate)
            .paste(true);
        tui.enter()?;
        self.executor = Some(TaskExecutor::new(self.action_tx.clone()));
        info!(
            "form builder started (tick_rate={}, frame_rate={})",
            self.tick_rate, self.frame_rate
        );

        loop {
            if let Some(e) = tui.next().await {
                self.handle_event(e)?;
            }

            while let Ok(action) = self.action_rx.try_recv() {
                match action {
                    Action::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, w, h))?;
                        self.draw_into(&mut tui)?;
                    }
                    Action::Render => self.draw_into(&mut tui)?,
                    action => self.dispatch(action)?,
                }
            }

            if self.should_suspend {
                tui.suspend()?;
                self.action_tx.send(Action::Resume).ok();
                tui.resume()?;
                tui.clear()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        info!("form builder stopped");
        Ok(())
    }

    fn draw_into(&mut self, tui: &mut Tui) -> Result<()> {
        tui.draw(|f| {
            if let Err(err) = self.render(f) {
                self.action_tx
                    .send(Action::Error(format!("Failed to draw: {:?}", err)))
                    .ok();
            }
        })?;
        Ok(())
    }

    /// Drain queued actions without a terminal. Render and resize requests are dropped.
    pub fn process_pending(&mut self) -> Result<()> {
        while let Ok(action) = self.action_rx.try_recv() {
            if !matches!(action, Action::Render | Action::Resize(..)) {
                self.dispatch(action)?;
            }
        }
        Ok(())
    }

    fn focused_mut(&mut self) -> (&mut dyn Component, &FormBuilder) {
        let builder = &self.state.builder;
        match self.focus {
            Focus::Editor => (&mut self.editor, builder),
            Focus::Preview => (&mut self.preview, builder),
            Focus::Config => (&mut self.config_panel, builder),
        }
    }

    fn focused(&self) -> &dyn Component {
        match self.focus {
            Focus::Editor => &self.editor,
            Focus::Preview => &self.preview,
            Focus::Config => &self.config_panel,
        }
    }

    fn keymap_context(&self) -> &'static str {
        match &self.popup {
            Some(popup) => popup.keymap_context(),
            None => self.focus.context(),
        }
    }

    /// Route one terminal event: popup, then focused panel, then the keymap.
    pub fn handle_event(&mut self, e: Event) -> Result<()> {
        let mut stop_event_propagation = false;
        if let Some(popup) = self.popup.as_mut() {
            let response = popup.handle_events(e.clone(), &self.state.builder)?;
            stop_event_propagation = match response {
                Some(EventResponse::Continue(action)) => {
                    self.action_tx.send(action).ok();
                    false
                }
                Some(EventResponse::Stop(action)) => {
                    // any outcome other than a redraw ends the popup
                    if action != Action::Update {
                        self.popup = None;
                    }
                    self.action_tx.send(action).ok();
                    true
                }
                None => popup.is_modal() && matches!(e, Event::Key(_) | Event::Paste(_)),
            };
        }

        if !stop_event_propagation && self.popup.is_none() {
            let (panel, builder) = self.focused_mut();
            stop_event_propagation = match panel.handle_events(e.clone(), builder)? {
                Some(EventResponse::Continue(action)) => {
                    self.action_tx.send(action).ok();
                    false
                }
                Some(EventResponse::Stop(action)) => {
                    self.action_tx.send(action).ok();
                    true
                }
                None => false,
            };
        }

        if !stop_event_propagation {
            match e {
                Event::Error(msg) => {
                    self.action_tx
                        .send(Action::Error(format!("Terminal input failed: {msg}")))
                        .ok();
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick).ok();
                }
                Event::Render => {
                    self.action_tx.send(Action::Render).ok();
                }
                Event::Resize(x, y) => {
                    self.action_tx.send(Action::Resize(x, y)).ok();
                }
                Event::Key(key) if !self.focused().is_editing() => {
                    if let Some(action) =
                        action_from_key(&self.config.keybindings, self.keymap_context(), key)
                    {
                        self.action_tx.send(action).ok();
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Apply one action: UI-level handling, the reducer, its effects, then the panels.
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Tick | Action::Render | Action::Update => {}
            _ => debug!("{action}"),
        }

        match &action {
            Action::Suspend => self.should_suspend = true,
            Action::Resume => self.should_suspend = false,
            Action::Help => self.toggle_help(),
            Action::FocusNext => self.set_focus(self.focus.step(1)),
            Action::FocusPrev => self.set_focus(self.focus.step(-1)),
            Action::ClosePopup => self.popup = None,
            Action::Alert { title, message } => self.open_alert(title, message),
            Action::Error(msg) => {
                error!("{msg}");
                self.open_alert("Error", msg);
            }
            _ => {}
        }

        for effect in reduce(&mut self.state, &action) {
            self.apply_effect(effect);
        }
        self.should_quit = self.state.quit_requested;

        let builder = &self.state.builder;
        let panels: [&mut dyn Component; 3] =
            [&mut self.editor, &mut self.preview, &mut self.config_panel];
        for panel in panels {
            if let Some(next) = panel.update(&action, builder)? {
                self.action_tx.send(next).ok();
            }
        }
        Ok(())
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Alert { title, message } => self.open_alert(&title, &message),
            Effect::Log(msg) => info!("{msg}"),
            Effect::Warn(msg) => warn!("{msg}"),
            Effect::Async(kind) => match &self.executor {
                Some(executor) => {
                    executor.spawn(kind);
                }
                None => {
                    warn!("no task executor running; dropped {kind}");
                    self.open_alert("File error", "Background tasks are not available.");
                }
            },
        }
    }

    fn open_alert(&mut self, title: &str, message: &str) {
        self.popup = Some(Box::new(AlertPopup::new(title, message)));
    }

    fn set_focus(&mut self, focus: Focus) {
        let (panel, _) = self.focused_mut();
        panel.set_focused(false);
        self.focus = focus;
        let (panel, _) = self.focused_mut();
        panel.set_focused(true);
    }

    fn toggle_help(&mut self) {
        if self.popup.is_some() {
            self.popup = None;
            return;
        }
        let context = self.focus.context();
        let mut entries = mappable_entries_for_context(&self.config.keybindings, context);
        for (label, chords) in mappable_entries_for_context(&self.config.keybindings, GLOBAL_CONTEXT)
        {
            match entries.iter_mut().find(|(l, _)| *l == label) {
                Some((_, existing)) => existing.extend(chords),
                None => entries.push((label, chords)),
            }
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        let title = format!("Keymap · {context}");
        self.popup = Some(Box::new(KeymapOverlay::new(title, entries)));
    }

    pub fn render(&mut self, frame: &mut Frame<'_>) -> Result<()> {
        let vertical_layout =
            Layout::vertical(vec![Constraint::Fill(1), Constraint::Length(1)]).split(frame.area());
        let body = vertical_layout[0];
        let columns = Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(body);
        let right = Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);

        let builder = &self.state.builder;
        self.editor.draw(frame, columns[0], builder)?;
        self.preview.draw(frame, right[0], builder)?;
        self.config_panel.draw(frame, right[1], builder)?;

        if let Some(popup) = self.popup.as_mut() {
            render_backdrop(frame, body);
            popup.draw(frame, body, builder)?;
        }

        self.render_footer(frame, vertical_layout[1]);
        Ok(())
    }

    fn render_footer(&self, frame: &mut Frame<'_>, area: Rect) {
        let editing = self.popup.is_none() && self.focused().is_editing();
        let (mode, mode_bg) = if editing {
            ("INSERT", Color::Green)
        } else {
            ("NORMAL", Color::Blue)
        };
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);

        let hint = if editing {
            "enter apply · esc cancel"
        } else {
            "tab focus · f1 keys · q quit"
        };
        let left = Line::from(vec![
            Span::styled(
                format!(" {mode} "),
                Style::default()
                    .fg(Color::Black)
                    .bg(mode_bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                format!(" {} ", self.keymap_context()),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            ),
            Span::raw(" "),
            Span::styled(hint, Style::default().fg(Color::DarkGray)),
        ]);
        let right = Line::from(Span::styled(
            format!(
                " {} field(s) · {} value(s) ",
                self.state.builder.len(),
                self.state.builder.values().len()
            ),
            Style::default().fg(Color::White).bg(Color::DarkGray),
        ));

        frame.render_widget(Paragraph::new(left), cols[0]);
        frame.render_widget(Paragraph::new(right).alignment(Alignment::Right), cols[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;

    fn app() -> App {
        let mut config = Config::default();
        config.config.data_dir = std::env::temp_dir();
        App::new(config)
    }

    fn key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        app.handle_event(Event::Key(KeyEvent::new(code, modifiers)))
            .unwrap();
        app.process_pending().unwrap();
    }

    #[test]
    fn focus_cycles_through_panels() {
        let mut app = app();
        assert_eq!(app.focus, Focus::Editor);
        key(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.focus, Focus::Preview);
        key(&mut app, KeyCode::BackTab, KeyModifiers::SHIFT);
        key(&mut app, KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(app.focus, Focus::Config);
    }

    #[test]
    fn terminal_input_error_opens_an_alert() {
        let mut app = app();
        app.handle_event(Event::Error("stream closed".into())).unwrap();
        app.process_pending().unwrap();
        assert!(app.popup.is_some());
    }

    #[test]
    fn suspend_then_resume_clears_the_flag() {
        let mut app = app();
        key(&mut app, KeyCode::Char('z'), KeyModifiers::CONTROL);
        assert!(app.should_suspend);
        app.dispatch(Action::Resume).unwrap();
        assert!(!app.should_suspend);
    }

    #[test]
    fn keymap_adds_field_in_editor_context() {
        let mut app = app();
        key(&mut app, KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(app.builder().len(), 1);
    }

    #[test]
    fn editing_blocks_global_keys() {
        let mut app = app();
        key(&mut app, KeyCode::Char('a'), KeyModifiers::NONE);
        // Type row -> Label row, open the editor and type a 'q'
        key(&mut app, KeyCode::Down, KeyModifiers::NONE);
        key(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        key(&mut app, KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(!app.should_quit);
        key(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.builder().fields()[0].label, "q");
        key(&mut app, KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(app.should_quit);
    }

    #[test]
    fn submit_error_opens_alert_and_esc_closes_it() {
        let mut app = app();
        key(&mut app, KeyCode::Char('a'), KeyModifiers::NONE);
        app.dispatch(Action::SubmitForm).unwrap();
        assert!(app.popup.is_some());
        key(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(app.popup.is_none());
    }

    #[test]
    fn help_overlay_merges_context_and_global_bindings() {
        let mut app = app();
        key(&mut app, KeyCode::F(1), KeyModifiers::NONE);
        assert!(app.popup.is_some());
        assert_eq!(app.keymap_context(), "popup");
        key(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(app.popup.is_none());
    }
}
