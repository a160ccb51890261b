//! Application bootstrap
//!
//! An [`Application`] owns the navigation controller built over the console
//! route table. Mounting attaches its root view to an anchor of a
//! [`MountTarget`] exactly once and yields a [`MountedApplication`].

use crate::api::{ConsoleApi, HttpConsoleApi};
use crate::config::ConsoleConfig;
use crate::error::{MountError, Result};
use crate::pages::console_route_table;
use crate::router::{Location, Resolution, Router, RouterConfig, RouterResult};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

/// A shareable handle to the navigation controller
#[derive(Clone)]
pub struct RouterHandle(Arc<Mutex<Router>>);

impl RouterHandle {
    pub fn new(router: Router) -> Self {
        Self(Arc::new(Mutex::new(router)))
    }

    fn lock(&self) -> MutexGuard<'_, Router> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Navigate to a path or URL and return what it resolved to
    pub fn navigate(&self, url: &str) -> RouterResult<Resolution> {
        self.lock().navigate(url).cloned()
    }

    /// Go back to the previous location
    pub fn go_back(&self) -> bool {
        self.lock().go_back()
    }

    pub fn can_go_back(&self) -> bool {
        self.lock().can_go_back()
    }

    /// What the current location resolved to
    pub fn current(&self) -> Resolution {
        self.lock().current().clone()
    }

    pub fn current_location(&self) -> Location {
        self.lock().current_location().clone()
    }

    /// Resolve without navigating
    pub fn resolve(&self, url: &str) -> Resolution {
        self.lock().resolve(url)
    }
}

impl fmt::Debug for RouterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RouterHandle")
            .field(&self.current_location().to_string())
            .finish()
    }
}

/// Root of the rendered tree: the router plus the API the pages load from
#[derive(Clone)]
pub struct RootView {
    pub title: String,
    pub router: RouterHandle,
    pub api: Arc<dyn ConsoleApi>,
}

impl fmt::Debug for RootView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootView")
            .field("title", &self.title)
            .field("router", &self.router)
            .field("api", &self.api.backend_name())
            .finish()
    }
}

/// Something an application can be mounted into
pub trait MountTarget {
    /// Whether `selector` names an anchor of this target
    fn has_anchor(&self, selector: &str) -> bool;

    /// Attach a root view at `selector`
    fn attach(&mut self, selector: &str, root: RootView) -> std::result::Result<(), MountError>;
}

/// In-memory mount target with named anchors
#[derive(Debug, Default)]
pub struct Document {
    anchors: BTreeMap<String, Option<RootView>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty anchor
    pub fn with_anchor(mut self, selector: impl Into<String>) -> Self {
        self.anchors.insert(selector.into(), None);
        self
    }

    pub fn is_mounted(&self, selector: &str) -> bool {
        self.mounted(selector).is_some()
    }

    /// The root view attached at `selector`, if any
    pub fn mounted(&self, selector: &str) -> Option<&RootView> {
        self.anchors.get(selector).and_then(Option::as_ref)
    }

    pub fn mounted_count(&self) -> usize {
        self.anchors.values().filter(|slot| slot.is_some()).count()
    }
}

impl MountTarget for Document {
    fn has_anchor(&self, selector: &str) -> bool {
        self.anchors.contains_key(selector)
    }

    fn attach(&mut self, selector: &str, root: RootView) -> std::result::Result<(), MountError> {
        match self.anchors.get_mut(selector) {
            None => Err(MountError::AnchorNotFound(selector.to_string())),
            Some(Some(_)) => Err(MountError::AlreadyMounted(selector.to_string())),
            Some(slot) => {
                *slot = Some(root);
                Ok(())
            }
        }
    }
}

/// A configured, not yet mounted console
pub struct Application {
    config: ConsoleConfig,
    root: RootView,
}

impl Application {
    /// Build the router over the console routes, starting at the
    /// configured location
    pub fn bootstrap(config: ConsoleConfig, api: Arc<dyn ConsoleApi>) -> Result<Self> {
        config.validate()?;

        let table = Arc::new(console_route_table()?);
        debug!("Route table has {} routes", table.len());

        let router = Router::new(
            RouterConfig::new(table)
                .with_initial_location(config.start.clone())
                .with_max_history(config.max_history),
        )?;

        let root = RootView {
            title: "Remote Console".to_string(),
            router: RouterHandle::new(router),
            api,
        };
        Ok(Self { config, root })
    }

    /// Bootstrap against the HTTP API named in the configuration
    pub fn connect(config: ConsoleConfig) -> Result<Self> {
        let api = HttpConsoleApi::new(&config)?;
        Self::bootstrap(config, Arc::new(api))
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn router(&self) -> &RouterHandle {
        &self.root.router
    }

    /// Attach to the configured anchor. A missing anchor is fatal.
    pub fn mount(self, target: &mut impl MountTarget) -> Result<MountedApplication> {
        let anchor = self.config.anchor.clone();
        if !target.has_anchor(&anchor) {
            return Err(MountError::AnchorNotFound(anchor).into());
        }
        target.attach(&anchor, self.root.clone())?;
        info!(
            "Mounted console at {} (backend: {})",
            anchor,
            self.root.api.backend_name()
        );
        Ok(MountedApplication {
            anchor,
            root: self.root,
        })
    }
}

/// A console attached to its anchor
#[derive(Debug)]
pub struct MountedApplication {
    anchor: String,
    root: RootView,
}

impl MountedApplication {
    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    pub fn root(&self) -> &RootView {
        &self.root
    }

    pub fn router(&self) -> &RouterHandle {
        &self.root.router
    }

    pub fn api(&self) -> &Arc<dyn ConsoleApi> {
        &self.root.api
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MemoryApi;
    use crate::error::{ConfigError, Error};
    use crate::pages::Page;

    fn application(config: ConsoleConfig) -> Result<Application> {
        Application::bootstrap(config, Arc::new(MemoryApi::with_sample_data()))
    }

    #[test]
    fn test_mount_into_default_anchor() {
        let mut document = Document::new().with_anchor("#app");
        let mounted = application(ConsoleConfig::default())
            .unwrap()
            .mount(&mut document)
            .unwrap();

        assert_eq!(mounted.anchor(), "#app");
        assert!(document.is_mounted("#app"));
        assert_eq!(document.mounted_count(), 1);
        assert_eq!(mounted.router().current().page(), Some(Page::ListEnvironments));
        assert_eq!(mounted.api().backend_name(), "memory");
    }

    #[test]
    fn test_missing_anchor_is_fatal() {
        let mut document = Document::new().with_anchor("#root");
        let error = application(ConsoleConfig::default())
            .unwrap()
            .mount(&mut document)
            .unwrap_err();
        assert!(matches!(
            error,
            Error::Mount(MountError::AnchorNotFound(ref anchor)) if anchor == "#app"
        ));
        assert_eq!(document.mounted_count(), 0);
    }

    #[test]
    fn test_second_mount_is_rejected() {
        let mut document = Document::new().with_anchor("#app");
        application(ConsoleConfig::default())
            .unwrap()
            .mount(&mut document)
            .unwrap();
        let error = application(ConsoleConfig::default())
            .unwrap()
            .mount(&mut document)
            .unwrap_err();
        assert!(matches!(error, Error::Mount(MountError::AlreadyMounted(_))));
    }

    #[test]
    fn test_custom_anchor_and_start() {
        let mut document = Document::new().with_anchor("#console");
        let config = ConsoleConfig::default()
            .with_anchor("#console")
            .with_start("#/runs");
        let mounted = application(config).unwrap().mount(&mut document).unwrap();
        assert_eq!(mounted.router().current().page(), Some(Page::Runs));
    }

    #[test]
    fn test_unknown_start_still_mounts() {
        let mut document = Document::new().with_anchor("#app");
        let config = ConsoleConfig::default().with_start("/nowhere");
        let mounted = application(config).unwrap().mount(&mut document).unwrap();
        assert!(!mounted.router().current().is_found());
    }

    #[test]
    fn test_invalid_config_fails_bootstrap() {
        let config = ConsoleConfig::default().with_api_url("ftp://example.com");
        assert!(matches!(
            application(config),
            Err(Error::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn test_router_handle_shared_with_target() {
        let mut document = Document::new().with_anchor("#app");
        let mounted = application(ConsoleConfig::default())
            .unwrap()
            .mount(&mut document)
            .unwrap();

        mounted.router().navigate("/simulation/s1/show").unwrap();
        let attached = document.mounted("#app").unwrap();
        assert_eq!(
            attached.router.current_location().path(),
            "/simulation/s1/show"
        );
    }
}
