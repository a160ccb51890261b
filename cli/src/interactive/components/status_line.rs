//! Status line component
//!
//! Shows the last status message, the key hints for the current page and
//! the backend in use.

use iocraft::prelude::*;

#[derive(Default, Props)]
pub struct StatusLineProps {
    pub message: String,
    pub hints: String,
    pub backend: String,
}

#[component]
pub fn StatusLine(props: &StatusLineProps) -> impl Into<AnyElement<'static>> {
    element! {
        View(flex_direction: FlexDirection::Column, padding_left: 1, padding_right: 1) {
            #(if props.message.is_empty() {
                None
            } else {
                Some(element! {
                    Text(content: props.message.clone(), color: Color::Yellow, weight: Weight::Bold)
                })
            })
            View(flex_direction: FlexDirection::Row, justify_content: JustifyContent::SpaceBetween) {
                Text(content: props.hints.clone(), color: Color::DarkGrey)
                Text(content: format!("backend: {}", props.backend), color: Color::DarkGrey)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_props_default() {
        let props = StatusLineProps::default();
        assert!(props.message.is_empty());
        assert!(props.backend.is_empty());
    }
}
