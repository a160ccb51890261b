//! Page area of the interactive console
//!
//! Draws whatever the current location resolved to. Locations without a
//! route fall back to the "Route Not Found" view.

use crate::interactive::state::{Content, ViewState};
use crate::output::{render_form, render_not_found, render_page, LineStyle, StyledLine};
use iocraft::prelude::*;
use remote_console_core::pages::{FormValues, PageData};

#[derive(Default, Props)]
pub struct PageViewProps {
    pub view: ViewState,
    /// Selected list row
    pub selected: usize,
    /// Values typed into a create form
    pub form: FormValues,
    /// Focused form field
    pub field: usize,
}

/// Lines to draw for a view
pub fn view_lines(view: &ViewState, form: &FormValues, field: usize) -> Vec<StyledLine> {
    let title = view.page.map(|p| p.title()).unwrap_or_default();
    match &view.content {
        Content::Loading => vec![
            StyledLine::new(title, LineStyle::Title),
            StyledLine::new(format!("Loading {}…", view.location), LineStyle::Muted),
        ],
        Content::NotFound(path) => render_not_found(path),
        Content::Failed(message) => vec![
            StyledLine::new(title, LineStyle::Title),
            StyledLine::new(message.clone(), LineStyle::Error),
        ],
        Content::Loaded(PageData::Form(spec)) => {
            let mut lines = vec![StyledLine::new(title, LineStyle::Title)];
            lines.extend(render_form(spec, form, Some(field)));
            lines
        }
        Content::Loaded(data) => match view.page {
            Some(page) => render_page(page, data),
            None => render_not_found(&view.location),
        },
    }
}

fn line_color(style: LineStyle) -> Color {
    match style {
        LineStyle::Title => Color::Cyan,
        LineStyle::Heading => Color::Grey,
        LineStyle::Muted => Color::DarkGrey,
        LineStyle::Warning => Color::Yellow,
        LineStyle::Error => Color::Red,
        LineStyle::Success => Color::Green,
        LineStyle::Normal | LineStyle::Row(_) => Color::White,
    }
}

#[component]
pub fn PageView(props: &PageViewProps) -> impl Into<AnyElement<'static>> {
    let lines = view_lines(&props.view, &props.form, props.field);
    let editing = props.view.is_editing();
    let highlighted = if editing { props.field } else { props.selected };

    element! {
        View(flex_direction: FlexDirection::Column, padding_left: 1, padding_right: 1) {
            #(lines.into_iter().enumerate().map(|(index, line)| {
                let is_selected = line.style == LineStyle::Row(highlighted);
                let prefix = match line.style {
                    // Form lines carry their own focus marker
                    _ if editing => "",
                    LineStyle::Row(_) if is_selected => "► ",
                    LineStyle::Row(_) | LineStyle::Heading => "  ",
                    _ => "",
                };
                element! {
                    Text(
                        key: format!("line-{}", index),
                        content: format!("{}{}", prefix, line.text),
                        color: if is_selected { Color::Yellow } else { line_color(line.style) },
                        weight: if is_selected || line.style == LineStyle::Title {
                            Weight::Bold
                        } else {
                            Weight::Normal
                        },
                    )
                }
            }).collect::<Vec<_>>())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remote_console_core::pages::{FormSpec, PageRequest, Resource};
    use remote_console_core::Page;

    #[test]
    fn test_not_found_fallback() {
        let view = ViewState {
            location: "/nowhere".to_string(),
            content: Content::NotFound("/nowhere".to_string()),
            ..ViewState::default()
        };
        let lines = view_lines(&view, &FormValues::new(), 0);
        assert_eq!(lines[0].text, "Route Not Found");
    }

    #[test]
    fn test_failed_load_shows_error() {
        let view = ViewState {
            location: "/environment/x/show".to_string(),
            page: Some(Page::ShowEnvironment),
            request: Some(PageRequest::ShowEnvironment { id: "x".to_string() }),
            content: Content::Failed("environment 'x' not found".to_string()),
        };
        let lines = view_lines(&view, &FormValues::new(), 0);
        assert_eq!(lines[0].text, "Environment");
        assert_eq!(lines[1].style, LineStyle::Error);
    }

    #[test]
    fn test_form_shows_typed_values() {
        let view = ViewState {
            location: "/create-environment".to_string(),
            page: Some(Page::CreateEnvironment),
            request: Some(PageRequest::CreateEnvironment),
            content: Content::Loaded(PageData::Form(FormSpec::for_resource(
                Resource::Environment,
            ))),
        };
        let mut form = FormValues::new();
        form.insert("name".to_string(), "Lab".to_string());
        let lines = view_lines(&view, &form, 1);
        assert_eq!(lines[0].text, "Create environment");
        assert!(lines[2].text.starts_with("> Name"));
        assert!(lines[2].text.ends_with("Lab"));
    }
}
