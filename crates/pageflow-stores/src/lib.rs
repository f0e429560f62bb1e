//! Pageflow Collaborator Contracts
//!
//! The page context consumes all of its dependencies — course/category/module
//! lookup, theme resolution, block management, session storage, scope
//! resolution, navigation building — through the narrow traits defined here.
//! The modules in this crate provide the reference implementations: in-memory
//! stores, the ordered theme-source resolver chain, a bounded session store,
//! and block-manager factories (including a recording one for tests).

pub mod blocks;
pub mod memory;
pub mod nav;
pub mod session;
pub mod theme;

use std::collections::HashMap;

use pageflow_model::{
    ActivityRecord, Category, Course, CourseModule, ModuleInfo, NavKind, NavigationView, PageResult,
    PageUrl, Scope, ThemeHandle,
};

pub use blocks::{NullBlockFactory, RecordingBlockFactory};
pub use memory::{
    MemoryCategoryStore, MemoryCourseStore, MemoryModuleInfoProvider, MemoryScopeResolver,
};
pub use nav::StaticNavigationBuilder;
pub use session::MemorySessionStore;
pub use theme::{StandardThemeResolver, ThemeSourcePolicy};

/// Course lookup.
pub trait CourseStore: Send + Sync {
    fn get_by_id(&self, id: i64) -> PageResult<Course>;
}

/// Category lookup.
pub trait CategoryStore: Send + Sync {
    fn get_by_id(&self, id: i64) -> PageResult<Category>;

    /// Fetch several categories at once. Missing ids are simply absent from
    /// the returned mapping.
    fn list_by_ids(&self, ids: &[i64]) -> PageResult<HashMap<i64, Category>>;
}

/// Authoritative module metadata.
pub trait ModuleInfoProvider: Send + Sync {
    /// Enrich a raw module reference into its canonical form.
    fn canonicalize(&self, raw: &CourseModule, course: &Course) -> PageResult<ModuleInfo>;

    /// Look up a raw module reference by id (used by snapshot restore).
    fn raw_by_id(&self, id: i64) -> PageResult<CourseModule>;

    /// The activity row owning a module.
    fn activity_record(&self, module: &ModuleInfo) -> PageResult<ActivityRecord>;
}

/// Theme override candidates gathered from the current page state, in no
/// particular order — the resolver applies the preference order.
#[derive(Debug, Clone, Default)]
pub struct ThemeHints {
    pub course: Option<String>,
    pub category: Option<String>,
    pub session: Option<String>,
    pub user: Option<String>,
    pub cohort: Option<String>,
}

/// Theme selection and loading.
pub trait ThemeResolver: Send + Sync {
    /// Pick a theme name from the hints using the ordered preference list
    /// (course, category, session override, user, cohort, site default).
    fn resolve_name(&self, hints: &ThemeHints) -> String;

    fn load(&self, name: &str) -> PageResult<ThemeHandle>;
}

/// Per-page block manager, created by [`BlockManagerFactory`].
pub trait BlockManager: Send {
    /// Load the block instances for this page's regions.
    fn load_blocks(&mut self) -> PageResult<()>;

    /// Handle block add/move/delete actions encoded in the page URL.
    /// Returns true when an action was performed.
    fn process_url_actions(&mut self, url: &PageUrl) -> PageResult<bool>;

    /// Instantiate every loaded block.
    fn create_all_instances(&mut self);
}

/// Creates the block manager for a page's scope and layout.
pub trait BlockManagerFactory: Send + Sync {
    fn create(&self, scope: &Scope, layout: &str) -> Box<dyn BlockManager>;
}

/// Session-scoped key/value storage for edit snapshots.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: String);

    /// The per-session secret snapshot digests are keyed with. Rotates when
    /// the session is re-established.
    fn secret(&self) -> String;
}

/// Allocation and lookup of security scopes.
pub trait ScopeResolver: Send + Sync {
    fn system_scope(&self) -> Scope;
    fn category_scope(&self, category_id: i64) -> Scope;
    fn course_scope(&self, course_id: i64) -> Scope;
    fn module_scope(&self, module_id: i64) -> Scope;
    fn block_scope(&self, block_id: i64) -> Scope;
    fn instance_by_id(&self, id: i64) -> Option<Scope>;
}

/// Inputs a navigation builder may draw on.
#[derive(Debug, Clone, Copy, Default)]
pub struct NavRequest<'a> {
    pub course: Option<&'a Course>,
    pub module: Option<&'a ModuleInfo>,
    pub user_editing: bool,
}

/// External navigation construction. Tree-building algorithms are out of
/// scope for the context; it only caches the finished views.
pub trait NavigationBuilder: Send + Sync {
    fn build(&self, kind: NavKind, request: &NavRequest<'_>) -> NavigationView;
}
