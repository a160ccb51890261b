//! Interactive console using iocraft
//!
//! The console is mounted into a [`TerminalSurface`]. Key presses are mapped
//! to actions; anything that talks to the API is sent over a broadcast
//! channel to a background future that updates the view state.

use super::components::{Header, StatusLine};
use super::pages::PageView;
use super::state::{handle_key, key_hints, ConsoleMessage, Content, KeyAction, ViewState};
use anyhow::Result;
use iocraft::prelude::*;
use remote_console_core::error::MountError;
use remote_console_core::pages::{confirm_delete, load_page, submit_form, FormValues, PageRequest};
use remote_console_core::router::Resolution;
use remote_console_core::{MountTarget, RootView};
use std::io::IsTerminal;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// The terminal as a mount target. Its only anchor exists when stdout is
/// an interactive terminal.
#[derive(Debug)]
pub struct TerminalSurface {
    anchor: Option<String>,
    root: Option<RootView>,
}

impl TerminalSurface {
    /// A surface offering `anchor` when stdout is a terminal
    pub fn detect(anchor: &str) -> Self {
        let anchor = std::io::stdout()
            .is_terminal()
            .then(|| anchor.to_string());
        Self::new(anchor)
    }

    pub fn new(anchor: Option<String>) -> Self {
        Self { anchor, root: None }
    }

    /// Run the attached console until the user quits
    pub async fn run(self) -> Result<()> {
        let anchor = self.anchor.unwrap_or_default();
        let root = self.root.ok_or(MountError::AnchorNotFound(anchor))?;
        run_console(root).await
    }
}

impl MountTarget for TerminalSurface {
    fn has_anchor(&self, selector: &str) -> bool {
        self.anchor.as_deref() == Some(selector)
    }

    fn attach(&mut self, selector: &str, root: RootView) -> Result<(), MountError> {
        if !self.has_anchor(selector) {
            return Err(MountError::AnchorNotFound(selector.to_string()));
        }
        if self.root.is_some() {
            return Err(MountError::AlreadyMounted(selector.to_string()));
        }
        self.root = Some(root);
        Ok(())
    }
}

/// Render the console until it exits
pub async fn run_console(root: RootView) -> Result<()> {
    // Run the iocraft-based UI
    tokio::task::spawn_blocking(move || {
        smol::block_on(async move { element!(ConsoleApp(root: Some(root))).render_loop().await })
    })
    .await??;

    Ok(())
}

/// State handles shared by the key handler and the background loop
#[derive(Clone, Copy)]
struct ConsoleState {
    view: State<ViewState>,
    status: State<String>,
    selected: State<usize>,
    form: State<FormValues>,
    field: State<usize>,
}

/// Reload the current location into the view
async fn refresh(root: &RootView, state: &mut ConsoleState) {
    let resolution = root.router.current();
    let mut view = ViewState {
        location: root.router.current_location().to_string(),
        page: resolution.page(),
        request: None,
        content: Content::Loading,
    };
    state.view.set(view.clone());
    state.selected.set(0);
    state.field.set(0);
    state.form.set(FormValues::new());

    view.content = match resolution {
        Resolution::Matched(route_match) => match PageRequest::from_match(&route_match) {
            Ok(request) => {
                let content = match load_page(root.api.as_ref(), &request).await {
                    Ok(data) => Content::Loaded(data),
                    Err(e) => {
                        warn!("Loading {} failed: {}", view.location, e);
                        Content::Failed(e.to_string())
                    }
                };
                view.request = Some(request);
                content
            }
            Err(e) => Content::Failed(e.to_string()),
        },
        Resolution::NotFound { path } => Content::NotFound(path),
    };
    state.view.set(view);
}

async fn navigate(root: &RootView, state: &mut ConsoleState, location: &str) {
    match root.router.navigate(location) {
        Ok(_) => refresh(root, state).await,
        Err(e) => state.status.set(e.to_string()),
    }
}

async fn handle_message(root: &RootView, state: &mut ConsoleState, message: ConsoleMessage) {
    debug!("Console message: {:?}", message);
    state.status.set(String::new());
    match message {
        ConsoleMessage::Navigate(location) => navigate(root, state, &location).await,
        ConsoleMessage::Back => {
            if root.router.go_back() {
                refresh(root, state).await;
            } else {
                state.status.set("Nothing to go back to".to_string());
            }
        }
        ConsoleMessage::Reload => refresh(root, state).await,
        ConsoleMessage::Submit(resource, values) => {
            match submit_form(root.api.as_ref(), resource, &values).await {
                Ok(location) => {
                    navigate(root, state, &location).await;
                    state.status.set(format!("Created {}", resource));
                }
                Err(e) => state.status.set(e.to_string()),
            }
        }
        ConsoleMessage::Delete(resource, id) => {
            match confirm_delete(root.api.as_ref(), resource, &id).await {
                Ok(location) => {
                    navigate(root, state, &location).await;
                    state.status.set(format!("Deleted {} '{}'", resource, id));
                }
                Err(e) => state.status.set(e.to_string()),
            }
        }
    }
}

#[derive(Default, Props)]
pub struct ConsoleAppProps {
    pub root: Option<RootView>,
}

/// Main console component
#[component]
pub fn ConsoleApp(mut hooks: Hooks, props: &ConsoleAppProps) -> impl Into<AnyElement<'static>> {
    let mut system = hooks.use_context_mut::<SystemContext>();
    let sender = hooks.use_state(|| broadcast::channel::<ConsoleMessage>(32).0);
    let should_exit = hooks.use_state(|| false);
    let state = ConsoleState {
        view: hooks.use_state(ViewState::default),
        status: hooks.use_state(String::new),
        selected: hooks.use_state(|| 0usize),
        form: hooks.use_state(FormValues::new),
        field: hooks.use_state(|| 0usize),
    };

    // Background loop: loads pages and performs API calls
    let root = props.root.clone();
    let ui_sender = sender.read().clone();
    let mut loop_state = state;
    hooks.use_future(async move {
        let Some(root) = root else {
            return;
        };
        let mut rx = ui_sender.subscribe();
        refresh(&root, &mut loop_state).await;
        loop {
            match rx.recv().await {
                Ok(message) => handle_message(&root, &mut loop_state, message).await,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Dropped {} console messages", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // Handle terminal events
    hooks.use_terminal_events({
        let ui_sender = sender.read().clone();
        let mut key_state = state;
        let mut should_exit = should_exit;
        move |event| match event {
            TerminalEvent::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                let action = handle_key(
                    code,
                    &key_state.view.read(),
                    key_state.selected.get(),
                    key_state.field.get(),
                    &key_state.form.read(),
                );
                match action {
                    KeyAction::None => {}
                    KeyAction::Quit => should_exit.set(true),
                    KeyAction::Send(message) => {
                        let _ = ui_sender.send(message);
                    }
                    KeyAction::Select(row) => key_state.selected.set(row),
                    KeyAction::FocusField(field) => key_state.field.set(field),
                    KeyAction::Edit(values) => key_state.form.set(values),
                    KeyAction::Status(message) => key_state.status.set(message),
                }
            }
            _ => {}
        }
    });

    if should_exit.get() {
        system.exit();
    }

    let Some(root) = &props.root else {
        return element! {
            View(padding: 1) {
                Text(content: "No console mounted", color: Color::Red, weight: Weight::Bold)
            }
        };
    };

    let view = state.view.read().clone();
    let hints = key_hints(&view).to_string();

    element! {
        View(
            flex_direction: FlexDirection::Column,
            width: 100pct,
            padding: 1,
        ) {
            Header(title: root.title.clone(), location: view.location.clone(), page: view.page)
            View(flex_direction: FlexDirection::Column, flex_grow: 1.0, margin_top: 1, margin_bottom: 1) {
                PageView(
                    view: view.clone(),
                    selected: state.selected.get(),
                    form: state.form.read().clone(),
                    field: state.field.get(),
                )
            }
            StatusLine(
                message: state.status.read().clone(),
                hints: hints,
                backend: root.api.backend_name().to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remote_console_core::{Application, ConsoleConfig, MemoryApi};
    use std::sync::Arc;

    fn application() -> Application {
        Application::bootstrap(
            ConsoleConfig::default(),
            Arc::new(MemoryApi::with_sample_data()),
        )
        .unwrap()
    }

    #[test]
    fn test_mount_without_terminal_fails() {
        let mut surface = TerminalSurface::new(None);
        let error = application().mount(&mut surface).unwrap_err();
        assert!(error.to_string().contains("#app"));
    }

    #[test]
    fn test_mount_into_terminal_anchor() {
        let mut surface = TerminalSurface::new(Some("#app".to_string()));
        let mounted = application().mount(&mut surface).unwrap();
        assert_eq!(mounted.anchor(), "#app");
        assert!(surface.root.is_some());

        let second = application().mount(&mut surface);
        assert!(matches!(
            second,
            Err(remote_console_core::Error::Mount(MountError::AlreadyMounted(_)))
        ));
    }

    #[test]
    fn test_console_props_default() {
        let props = ConsoleAppProps::default();
        assert!(props.root.is_none());
    }
}
