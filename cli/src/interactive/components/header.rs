//! Header with the console title and section tabs

use iocraft::prelude::*;
use remote_console_core::pages::Resource;
use remote_console_core::Page;

/// Sections reachable with the number keys
const SECTIONS: [(char, &str, Option<Resource>); 3] = [
    ('1', "Environments", Some(Resource::Environment)),
    ('2', "Simulations", Some(Resource::Simulation)),
    ('3', "Runs", None),
];

#[derive(Default, Props)]
pub struct HeaderProps {
    pub title: String,
    pub location: String,
    pub page: Option<Page>,
}

/// Index into the section tabs for a page
pub fn active_section(page: Option<Page>) -> Option<usize> {
    let page = page?;
    SECTIONS
        .iter()
        .position(|(_, _, resource)| *resource == page.resource())
}

#[component]
pub fn Header(props: &HeaderProps) -> impl Into<AnyElement<'static>> {
    let active = active_section(props.page);

    element! {
        View(
            flex_direction: FlexDirection::Column,
            border_style: BorderStyle::Round,
            border_color: Color::Rgb { r: 100, g: 149, b: 237 },
            padding_left: 1,
            padding_right: 1,
        ) {
            View(flex_direction: FlexDirection::Row, justify_content: JustifyContent::SpaceBetween) {
                Text(content: props.title.clone(), weight: Weight::Bold, color: Color::Cyan)
                Text(content: props.location.clone(), color: Color::DarkGrey)
            }
            View(flex_direction: FlexDirection::Row, gap: 3) {
                #(SECTIONS.iter().enumerate().map(|(index, (key, label, _))| {
                    let is_active = active == Some(index);
                    element! {
                        Text(
                            key: format!("section-{}", key),
                            content: format!("{} {}", key, label),
                            color: if is_active { Color::Yellow } else { Color::White },
                            weight: if is_active { Weight::Bold } else { Weight::Normal },
                        )
                    }
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_section() {
        assert_eq!(active_section(Some(Page::DeleteEnvironment)), Some(0));
        assert_eq!(active_section(Some(Page::CreateSimulation)), Some(1));
        assert_eq!(active_section(Some(Page::Runs)), Some(2));
        assert_eq!(active_section(None), None);
    }
}
