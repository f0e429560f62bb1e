//! Site configuration and the collaborator bundle a context runs against.
//!
//! Every dependency the context touches — entity stores, theme resolution,
//! block management, session storage, scope resolution, navigation building —
//! comes in through [`PageServices`]. The ambient "current course" side
//! effect of the original design is an explicit injected hook here, invoked
//! only for the request's primary context.

use std::sync::Arc;

use url::Url;

use pageflow_model::{Course, ScopeLevel};
use pageflow_stores::{
    BlockManagerFactory, CategoryStore, CourseStore, MemoryCategoryStore, MemoryCourseStore,
    MemoryModuleInfoProvider, MemoryScopeResolver, MemorySessionStore, ModuleInfoProvider,
    NavigationBuilder, NullBlockFactory, ScopeResolver, SessionStore, StandardThemeResolver,
    StaticNavigationBuilder, ThemeResolver,
};

/// Text direction of the site language, reflected in body classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn body_class(self) -> &'static str {
        match self {
            Self::Ltr => "dir-ltr",
            Self::Rtl => "dir-rtl",
        }
    }
}

/// Device classification of the requesting client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceClass {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl DeviceClass {
    pub fn body_class(self) -> &'static str {
        match self {
            Self::Desktop => "device-desktop",
            Self::Tablet => "device-tablet",
            Self::Mobile => "device-mobile",
        }
    }
}

/// Site-wide knobs the context consults.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Base address root-relative page URLs are expanded against.
    pub base_url: Url,
    /// Id of the site's root course, the default for category-only pages.
    pub site_course_id: i64,
    pub text_direction: TextDirection,
    pub device_class: DeviceClass,
    /// Scope-level transitions considered ordinary. Anything else is logged
    /// as suspicious (advisory only). Domain policy, hence configuration.
    pub safe_scope_transitions: Vec<(ScopeLevel, ScopeLevel)>,
    /// Ambient theme override candidates for the session's user.
    pub user_theme: Option<String>,
    pub cohort_theme: Option<String>,
}

impl SiteConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            site_course_id: 1,
            text_direction: TextDirection::Ltr,
            device_class: DeviceClass::Desktop,
            safe_scope_transitions: vec![
                (ScopeLevel::System, ScopeLevel::Course),
                (ScopeLevel::Module, ScopeLevel::Block),
            ],
            user_theme: None,
            cohort_theme: None,
        }
    }

    pub fn with_site_course(mut self, id: i64) -> Self {
        self.site_course_id = id;
        self
    }

    pub fn with_text_direction(mut self, direction: TextDirection) -> Self {
        self.text_direction = direction;
        self
    }

    pub fn with_device_class(mut self, device: DeviceClass) -> Self {
        self.device_class = device;
        self
    }

    pub fn with_user_theme(mut self, theme: impl Into<String>) -> Self {
        self.user_theme = Some(theme.into());
        self
    }
}

/// Callback invoked when the primary context's course changes, replacing the
/// original ambient "current course" singleton and locale refresh.
pub type PrimaryCourseHook = Arc<dyn Fn(&Course) + Send + Sync>;

/// The collaborators one page context runs against.
#[derive(Clone)]
pub struct PageServices {
    pub config: SiteConfig,
    pub courses: Arc<dyn CourseStore>,
    pub categories: Arc<dyn CategoryStore>,
    pub modules: Arc<dyn ModuleInfoProvider>,
    pub themes: Arc<dyn ThemeResolver>,
    pub blocks: Arc<dyn BlockManagerFactory>,
    pub session: Arc<dyn SessionStore>,
    pub scopes: Arc<dyn ScopeResolver>,
    pub navigation: Arc<dyn NavigationBuilder>,
    pub primary_course_hook: Option<PrimaryCourseHook>,
}

impl PageServices {
    /// A bundle wired entirely to the in-memory reference implementations.
    pub fn in_memory(config: SiteConfig) -> Self {
        Self {
            config,
            courses: Arc::new(MemoryCourseStore::new()),
            categories: Arc::new(MemoryCategoryStore::new()),
            modules: Arc::new(MemoryModuleInfoProvider::new()),
            themes: Arc::new(StandardThemeResolver::new("standard")),
            blocks: Arc::new(NullBlockFactory),
            session: Arc::new(MemorySessionStore::new()),
            scopes: Arc::new(MemoryScopeResolver::new()),
            navigation: Arc::new(StaticNavigationBuilder::new("Site")),
            primary_course_hook: None,
        }
    }

    pub fn with_primary_course_hook(mut self, hook: PrimaryCourseHook) -> Self {
        self.primary_course_hook = Some(hook);
        self
    }
}
