//! Interactive console state and key bindings

use iocraft::prelude::KeyCode;
use remote_console_core::pages::{href, FormValues, PageAction, PageData, PageRequest, Resource};
use remote_console_core::Page;

/// What the page area currently shows
#[derive(Debug, Clone, Default)]
pub enum Content {
    #[default]
    Loading,
    Loaded(PageData),
    NotFound(String),
    Failed(String),
}

/// The current location and its loaded content
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub location: String,
    pub page: Option<Page>,
    pub request: Option<PageRequest>,
    pub content: Content,
}

impl ViewState {
    fn data(&self) -> Option<&PageData> {
        match &self.content {
            Content::Loaded(data) => Some(data),
            _ => None,
        }
    }

    /// Whether keys go to a create form
    pub fn is_editing(&self) -> bool {
        matches!(self.data(), Some(PageData::Form(_)))
    }

    /// Id of the resource the view is about: the page's own id, or the
    /// selected row of a list
    pub fn target_id(&self, selected: usize) -> Option<String> {
        if let Some(id) = self.request.as_ref().and_then(|r| r.id()) {
            return Some(id.to_string());
        }
        self.data()
            .and_then(|data| data.row_ids().get(selected).map(|id| id.to_string()))
    }

    pub fn row_count(&self) -> usize {
        self.data().map(|data| data.row_ids().len()).unwrap_or(0)
    }
}

/// Requests handled by the console's background loop
#[derive(Debug, Clone)]
pub enum ConsoleMessage {
    Navigate(String),
    Back,
    Reload,
    Submit(Resource, FormValues),
    Delete(Resource, String),
}

/// Outcome of a key press
#[derive(Debug, Clone)]
pub enum KeyAction {
    None,
    Quit,
    Send(ConsoleMessage),
    Select(usize),
    FocusField(usize),
    Edit(FormValues),
    Status(String),
}

fn navigate(page: Page, id: Option<&str>) -> KeyAction {
    match href(page, id) {
        Ok(location) => KeyAction::Send(ConsoleMessage::Navigate(location)),
        Err(e) => KeyAction::Status(e.to_string()),
    }
}

/// Map a key press to an action
pub fn handle_key(
    code: KeyCode,
    view: &ViewState,
    selected: usize,
    field: usize,
    form: &FormValues,
) -> KeyAction {
    if let Some(PageData::Form(spec)) = view.data() {
        let count = spec.fields.len();
        let name = spec.fields.get(field).map(|f| f.name).unwrap_or("id");
        return match code {
            KeyCode::Esc => KeyAction::Send(ConsoleMessage::Back),
            KeyCode::Tab | KeyCode::Down => KeyAction::FocusField((field + 1) % count),
            KeyCode::Up => KeyAction::FocusField((field + count - 1) % count),
            KeyCode::Enter => KeyAction::Send(ConsoleMessage::Submit(spec.resource, form.clone())),
            KeyCode::Backspace => {
                let mut form = form.clone();
                if let Some(value) = form.get_mut(name) {
                    value.pop();
                }
                KeyAction::Edit(form)
            }
            KeyCode::Char(c) => {
                let mut form = form.clone();
                form.entry(name.to_string()).or_default().push(c);
                KeyAction::Edit(form)
            }
            _ => KeyAction::None,
        };
    }

    let resource = view.page.and_then(|p| p.resource());
    match code {
        KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Char('1') => navigate(Page::ListEnvironments, None),
        KeyCode::Char('2') => navigate(Page::ListSimulations, None),
        KeyCode::Char('3') => navigate(Page::Runs, None),
        KeyCode::Char('b') | KeyCode::Esc => KeyAction::Send(ConsoleMessage::Back),
        KeyCode::Char('r') => KeyAction::Send(ConsoleMessage::Reload),
        KeyCode::Char('n') => match resource {
            Some(resource) => navigate(Page::for_resource(resource, PageAction::Create), None),
            None => KeyAction::None,
        },
        KeyCode::Up => KeyAction::Select(selected.saturating_sub(1)),
        KeyCode::Down => {
            let last = view.row_count().saturating_sub(1);
            KeyAction::Select((selected + 1).min(last))
        }
        KeyCode::Enter => match (view.page, view.target_id(selected)) {
            (Some(page), Some(id)) if page.action() == PageAction::List => {
                // Runs link to the simulation they belong to
                let resource = resource.unwrap_or(Resource::Simulation);
                navigate(Page::for_resource(resource, PageAction::Show), Some(&id))
            }
            _ => KeyAction::None,
        },
        KeyCode::Char('d') => match (resource, view.target_id(selected)) {
            (Some(resource), Some(id)) => {
                navigate(Page::for_resource(resource, PageAction::Delete), Some(&id))
            }
            _ => KeyAction::None,
        },
        KeyCode::Char('y') => match view.data() {
            Some(PageData::ConfirmDelete { resource, id, .. }) => {
                KeyAction::Send(ConsoleMessage::Delete(*resource, id.clone()))
            }
            _ => KeyAction::None,
        },
        _ => KeyAction::None,
    }
}

/// Key hints for the status line
pub fn key_hints(view: &ViewState) -> &'static str {
    match (view.data(), view.page.map(|p| p.action())) {
        (Some(PageData::Form(_)), _) => "Tab next field · Enter submit · Esc cancel",
        (Some(PageData::ConfirmDelete { .. }), _) => "y delete · b back · q quit",
        (_, Some(PageAction::List)) => {
            "↑/↓ select · Enter open · n new · d delete · 1/2/3 switch · b back · q quit"
        }
        (_, Some(PageAction::Show)) => "d delete · b back · r reload · q quit",
        _ => "1 environments · 2 simulations · 3 runs · b back · q quit",
    }
}
