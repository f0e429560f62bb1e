//! Pageflow — request page-state lifecycle management.
//!
//! A single [`PageContext`] is created per in-flight request of a web
//! learning platform. It owns the page's output lifecycle (an ordered state
//! machine), the entities the page is about (course, module, category), its
//! address and classification, and lazily constructed handles to the theme,
//! block manager, navigation views, and asset requirements. All external
//! dependencies come in through the collaborator traits in
//! [`pageflow_stores`], bundled into a [`PageServices`].
//!
//! This facade re-exports the public surface of the workspace crates.

pub use pageflow_context::{
    BASE_EDIT_CAPABILITY, DEFAULT_PAGE_LAYOUT, DeviceClass, PageContext, PageServices,
    PrimaryCourseHook, RequirementsCollector, SiteConfig, TextDirection,
};
pub use pageflow_model::{
    ActivityRecord, AlternateVersion, Category, Course, CourseModule, EditSnapshot, ModuleInfo,
    NavKind, NavNode, NavigationView, PageError, PageResult, PageState, PageUrl, Scope, ScopeLevel,
    ThemeHandle,
};
pub use pageflow_stores::{
    BlockManager, BlockManagerFactory, CategoryStore, CourseStore, MemoryCategoryStore,
    MemoryCourseStore, MemoryModuleInfoProvider, MemoryScopeResolver, MemorySessionStore,
    ModuleInfoProvider, NavRequest, NavigationBuilder, NullBlockFactory, RecordingBlockFactory,
    ScopeResolver, SessionStore, StandardThemeResolver, StaticNavigationBuilder, ThemeHints,
    ThemeResolver, ThemeSourcePolicy,
};
