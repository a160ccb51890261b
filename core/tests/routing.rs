//! Resolution and mounting behaviour of the console route table

use remote_console_core::api::MemoryApi;
use remote_console_core::error::{Error, MountError};
use remote_console_core::pages::{console_route_table, Page, CONSOLE_ROUTES};
use remote_console_core::router::Resolution;
use remote_console_core::{Application, ConsoleConfig, Document};
use std::sync::Arc;

fn resolve(url: &str) -> Resolution {
    console_route_table().unwrap().resolve(url)
}

#[test]
fn every_declared_pattern_resolves_to_its_page() {
    let expected = [
        ("/environments", Page::ListEnvironments, None),
        ("/create-environment", Page::CreateEnvironment, None),
        ("/environment/42/show", Page::ShowEnvironment, Some("42")),
        ("/environment/42/delete", Page::DeleteEnvironment, Some("42")),
        ("/simulations", Page::ListSimulations, None),
        ("/create-simulation", Page::CreateSimulation, None),
        ("/simulation/42/show", Page::ShowSimulation, Some("42")),
        ("/simulation/42/delete", Page::DeleteSimulation, Some("42")),
        ("/runs", Page::Runs, None),
    ];
    assert_eq!(expected.len(), CONSOLE_ROUTES.len());

    for (url, page, id) in expected {
        let resolution = resolve(url);
        assert_eq!(resolution.page(), Some(page), "{}", url);
        assert_eq!(resolution.params().and_then(|p| p.id()), id, "{}", url);
    }
}

#[test]
fn static_routes_are_not_confused() {
    assert_eq!(resolve("/environments").page(), Some(Page::ListEnvironments));
    assert_eq!(
        resolve("/create-environment").page(),
        Some(Page::CreateEnvironment)
    );
    assert!(resolve("/environments")
        .params()
        .map(|p| p.is_empty())
        .unwrap_or(false));
}

#[test]
fn unknown_urls_are_not_found() {
    for url in [
        "/does-not-exist",
        "/environment/42",
        "/environment/42/show/extra",
        "/environment//show",
        "",
        "not a path",
    ] {
        assert!(!resolve(url).is_found(), "{}", url);
    }
}

#[test]
fn simulation_delete_extracts_id() {
    match resolve("/simulation/7/delete") {
        Resolution::Matched(m) => {
            assert_eq!(m.page, Page::DeleteSimulation);
            assert_ne!(m.page, Page::DeleteEnvironment);
            assert_eq!(m.params.id(), Some("7"));
        }
        Resolution::NotFound { path } => panic!("{} not found", path),
    }
}

#[test]
fn hash_and_absolute_urls_resolve_like_paths() {
    for url in [
        "#/simulation/7/delete",
        "http://console.local/#/simulation/7/delete",
        "http://console.local/simulation/7/delete",
        "/simulation/7/delete/",
    ] {
        let resolution = resolve(url);
        assert_eq!(resolution.page(), Some(Page::DeleteSimulation), "{}", url);
        assert_eq!(resolution.params().and_then(|p| p.id()), Some("7"));
    }
}

#[test]
fn encoded_ids_are_decoded() {
    let resolution = resolve("/environment/ivt%20nama/show");
    assert_eq!(resolution.params().and_then(|p| p.id()), Some("ivt nama"));
}

#[test]
fn resolution_is_stable() {
    let table = console_route_table().unwrap();
    let first = table.resolve("/environment/euler/show");
    for _ in 0..10 {
        assert_eq!(table.resolve("/environment/euler/show"), first);
    }
}

#[test]
fn mounting_requires_the_anchor() {
    let api = Arc::new(MemoryApi::new());

    let mut document = Document::new().with_anchor("#app");
    Application::bootstrap(ConsoleConfig::default(), api.clone())
        .unwrap()
        .mount(&mut document)
        .unwrap();
    assert_eq!(document.mounted_count(), 1);

    let mut empty = Document::new();
    let result = Application::bootstrap(ConsoleConfig::default(), api)
        .unwrap()
        .mount(&mut empty);
    assert!(matches!(
        result,
        Err(Error::Mount(MountError::AnchorNotFound(_)))
    ));
    assert_eq!(empty.mounted_count(), 0);
}
