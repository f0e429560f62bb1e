//! Theme resolution — ordered source preference chain.
//!
//! A page's theme can come from several sources. They are consulted in a
//! fixed preference order (course, category, session override, user, cohort,
//! site default) and each source can be disabled site-wide by policy.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::{debug, warn};

use pageflow_model::{PageResult, ThemeHandle};

use crate::{ThemeHints, ThemeResolver};

/// Which theme sources are allowed to override the site default.
#[derive(Debug, Clone, Copy)]
pub struct ThemeSourcePolicy {
    pub course: bool,
    pub category: bool,
    pub session: bool,
    pub user: bool,
    pub cohort: bool,
}

impl Default for ThemeSourcePolicy {
    fn default() -> Self {
        Self {
            course: true,
            category: true,
            session: true,
            user: true,
            cohort: true,
        }
    }
}

/// Resolver over a registry of installed themes.
///
/// Unknown theme names are skipped during resolution and fall back to the
/// site default on load, so a stale override never breaks a page.
pub struct StandardThemeResolver {
    themes: RwLock<HashMap<String, ThemeHandle>>,
    policy: ThemeSourcePolicy,
    site_default: String,
}

impl StandardThemeResolver {
    pub fn new(site_default: impl Into<String>) -> Self {
        let site_default = site_default.into();
        let mut themes = HashMap::new();
        themes.insert(site_default.clone(), ThemeHandle::new(site_default.clone()));
        Self {
            themes: RwLock::new(themes),
            policy: ThemeSourcePolicy::default(),
            site_default,
        }
    }

    pub fn with_policy(mut self, policy: ThemeSourcePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Register an installed theme.
    pub fn register(&self, handle: ThemeHandle) {
        self.themes.write().insert(handle.name.clone(), handle);
    }

    fn known(&self, name: &str) -> bool {
        self.themes.read().contains_key(name)
    }
}

impl ThemeResolver for StandardThemeResolver {
    fn resolve_name(&self, hints: &ThemeHints) -> String {
        let sources: [(&str, bool, &Option<String>); 5] = [
            ("course", self.policy.course, &hints.course),
            ("category", self.policy.category, &hints.category),
            ("session", self.policy.session, &hints.session),
            ("user", self.policy.user, &hints.user),
            ("cohort", self.policy.cohort, &hints.cohort),
        ];

        for (source, enabled, candidate) in sources {
            if !enabled {
                continue;
            }
            if let Some(name) = candidate {
                if self.known(name) {
                    debug!(source, theme = %name, "theme resolved");
                    return name.clone();
                }
                debug!(source, theme = %name, "skipping unknown theme");
            }
        }

        self.site_default.clone()
    }

    fn load(&self, name: &str) -> PageResult<ThemeHandle> {
        if let Some(handle) = self.themes.read().get(name) {
            return Ok(handle.clone());
        }
        warn!(theme = %name, fallback = %self.site_default, "theme not installed, using site default");
        Ok(self
            .themes
            .read()
            .get(&self.site_default)
            .cloned()
            .unwrap_or_else(|| ThemeHandle::new(self.site_default.clone())))
    }
}
