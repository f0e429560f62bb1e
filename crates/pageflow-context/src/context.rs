//! The request page context.
//!
//! `PageContext` aggregates everything request-scoped: the output lifecycle
//! state, the course/module/category the page is about, its address and
//! classification, display strings, body classes, and lazily constructed
//! handles to the theme, block manager, navigation views, and requirements
//! collector. Mutators are guarded twice: frozen fields reject changes once
//! output has started, and context-affecting fields reject changes once the
//! theme has been resolved (the theme lock).

use std::collections::BTreeSet;

use tracing::{debug, warn};
use uuid::Uuid;

use pageflow_model::{
    ActivityRecord, AlternateVersion, Category, Course, CourseModule, EditSnapshot, ModuleInfo,
    NavKind, NavigationView, PageError, PageResult, PageState, PageUrl, Scope, ScopeLevel,
    ThemeHandle,
};
use pageflow_stores::{BlockManager, NavRequest, ThemeHints};

use crate::body::{self, StandardClassInputs};
use crate::requirements::RequirementsCollector;
use crate::services::PageServices;

/// Layout used when a page never sets one explicitly.
pub const DEFAULT_PAGE_LAYOUT: &str = "base";

/// Capability every editing user must hold; callers add extras on top.
pub const BASE_EDIT_CAPABILITY: &str = "core/site:manageblocks";

/// Page-scoped state and service registry for one in-flight request.
pub struct PageContext {
    id: Uuid,
    services: PageServices,
    state: PageState,
    primary: bool,
    web_service_mode: bool,
    user_editing: bool,

    course: Option<Course>,
    module: Option<ModuleInfo>,
    activity_record: Option<ActivityRecord>,
    scope: Option<Scope>,
    category: Option<Category>,
    category_chain: Option<Vec<Category>>,

    url: Option<PageUrl>,
    page_type: Option<String>,
    page_type_explicit: bool,
    page_layout: String,
    sub_page: String,

    body_classes: BTreeSet<String>,
    alternate_versions: Vec<AlternateVersion>,

    title: String,
    heading: String,
    heading_menu: String,
    focus_control: String,
    button: String,

    theme: Option<ThemeHandle>,
    forced_theme: Option<String>,
    theme_initialized_by: Option<&'static str>,

    blocks: Option<Box<dyn BlockManager>>,
    navigation: Option<NavigationView>,
    settings_navigation: Option<NavigationView>,
    flat_navigation: Option<NavigationView>,
    primary_navigation: Option<NavigationView>,
    secondary_navigation: Option<NavigationView>,
    requirements: Option<RequirementsCollector>,

    extra_edit_capabilities: Vec<String>,

    cacheable: bool,
    popup_notifications_allowed: bool,
    force_lock_all_blocks: bool,
    show_course_index: bool,
    secondary_nav_visible: bool,
    secondary_nav_tablist: bool,
    navigation_overflow: bool,
    region_settings_in_header_actions: bool,
}

impl std::fmt::Debug for PageContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageContext")
            .field("id", &self.id)
            .field("primary", &self.primary)
            .field("user_editing", &self.user_editing)
            .finish_non_exhaustive()
    }
}

impl PageContext {
    pub fn new(services: PageServices) -> Self {
        Self {
            id: Uuid::new_v4(),
            services,
            state: PageState::BeforeHeader,
            primary: false,
            web_service_mode: false,
            user_editing: false,
            course: None,
            module: None,
            activity_record: None,
            scope: None,
            category: None,
            category_chain: None,
            url: None,
            page_type: None,
            page_type_explicit: false,
            page_layout: DEFAULT_PAGE_LAYOUT.to_string(),
            sub_page: String::new(),
            body_classes: BTreeSet::new(),
            alternate_versions: Vec::new(),
            title: String::new(),
            heading: String::new(),
            heading_menu: String::new(),
            focus_control: String::new(),
            button: String::new(),
            theme: None,
            forced_theme: None,
            theme_initialized_by: None,
            blocks: None,
            navigation: None,
            settings_navigation: None,
            flat_navigation: None,
            primary_navigation: None,
            secondary_navigation: None,
            requirements: None,
            extra_edit_capabilities: Vec::new(),
            cacheable: true,
            popup_notifications_allowed: true,
            force_lock_all_blocks: false,
            show_course_index: true,
            secondary_nav_visible: true,
            secondary_nav_tablist: false,
            navigation_overflow: true,
            region_settings_in_header_actions: false,
        }
    }

    /// Mark this as the request's primary context. The primary-course hook
    /// only fires for primary contexts.
    pub fn mark_primary(&mut self) {
        self.primary = true;
    }

    /// Mark this context as belonging to a cross-context web-service
    /// execution path. Such paths legitimately iterate over many courses in
    /// one request, so the theme lock is bypassed.
    pub fn mark_web_service(&mut self) {
        self.web_service_mode = true;
    }

    pub fn set_user_editing(&mut self, editing: bool) {
        self.user_editing = editing;
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn services(&self) -> &PageServices {
        &self.services
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    pub fn state(&self) -> PageState {
        self.state
    }

    /// Advance the output lifecycle by exactly one step.
    ///
    /// Skipping a state, regressing, or advancing past `Done` fails with
    /// `InvalidTransition` and leaves the state untouched. Entering
    /// `PrintingHeader` runs the one-time starting-output hook: the block
    /// manager loads and instantiates its blocks and the standard body-class
    /// set is recomputed from the current context fields.
    pub fn advance(&mut self, target: PageState) -> PageResult<()> {
        if self.state.next() != Some(target) {
            return Err(PageError::InvalidTransition {
                from: self.state,
                to: target,
            });
        }
        if target == PageState::PrintingHeader {
            self.starting_output()?;
        }
        self.state = target;
        debug!(page = %self.id, state = %self.state, "page state advanced");
        Ok(())
    }

    fn starting_output(&mut self) -> PageResult<()> {
        let scope = self.scope();
        if self.blocks.is_none() {
            self.blocks = Some(self.services.blocks.create(&scope, &self.page_layout));
        }
        if let Some(manager) = self.blocks.as_mut() {
            manager.load_blocks()?;
            manager.create_all_instances();
        }
        self.recompute_standard_body_classes();
        Ok(())
    }

    fn recompute_standard_body_classes(&mut self) {
        let classes = {
            let inputs = StandardClassInputs {
                direction: self.services.config.text_direction,
                device: self.services.config.device_class,
                layout: &self.page_layout,
                page_type: self.page_type.as_deref(),
                scope_id: self.scope.map(|s| s.id),
                course_id: self.course.as_ref().map(|c| c.id),
                module_id: self.module.as_ref().map(|m| m.id),
                category_id: self.category.as_ref().map(|c| c.id),
                editing: self.user_editing,
                lock_all_blocks: self.force_lock_all_blocks,
            };
            body::standard_classes(&inputs)
        };
        for class in classes {
            self.body_classes.insert(class);
        }
    }

    // ── Guards ────────────────────────────────────────────────────────────

    fn ensure_before_output(&self, what: &str) -> PageResult<()> {
        if self.state.output_started() {
            return Err(PageError::precondition(format!(
                "cannot change {what} after output has started (state {})",
                self.state
            )));
        }
        Ok(())
    }

    fn ensure_theme_not_resolved(&self, what: &str) -> PageResult<()> {
        if self.web_service_mode {
            return Ok(());
        }
        if self.theme.is_some() {
            let initialized_by = self.theme_initialized_by.unwrap_or("unknown");
            return Err(PageError::precondition(format!(
                "cannot change {what}: the page theme is already resolved (initialized by {initialized_by})"
            )));
        }
        Ok(())
    }

    // ── Course / module / category ────────────────────────────────────────

    /// The page course: the one explicitly set, or the site's root course.
    /// The fallback is fetched fresh each call, never cached, so a later
    /// `set_course`/`set_module` still sees an unset course.
    pub fn course(&mut self) -> PageResult<Course> {
        if let Some(course) = &self.course {
            return Ok(course.clone());
        }
        self.services
            .courses
            .get_by_id(self.services.config.site_course_id)
    }

    /// The course explicitly set on this page, if any.
    pub fn current_course(&self) -> Option<&Course> {
        self.course.as_ref()
    }

    /// Set the course this page belongs to. The input is cloned into the
    /// context; later caller-side mutation never leaks in. Switching to a
    /// different course drops the cached category chain.
    pub fn set_course(&mut self, course: &Course) -> PageResult<()> {
        if course.id == 0 {
            return Err(PageError::precondition("course has no id"));
        }
        self.ensure_theme_not_resolved("the course")?;
        if self
            .course
            .as_ref()
            .is_some_and(|held| held.id != course.id)
        {
            debug!(page = %self.id, course = course.id, "switching course, dropping cached category chain");
            self.category = None;
            self.category_chain = None;
        }
        self.course = Some(course.clone());
        if self.primary {
            if let Some(hook) = &self.services.primary_course_hook {
                hook(course);
            }
        }
        Ok(())
    }

    pub fn module(&self) -> Option<&ModuleInfo> {
        self.module.as_ref()
    }

    /// Set the course module this page renders.
    ///
    /// The owning course must be resolvable first: pass it explicitly, have
    /// it already set, or leave both unset and it is fetched by the module's
    /// stated course id. A module whose course id disagrees with the page
    /// course is rejected. The raw reference is canonicalized through the
    /// module-info collaborator, and the scope moves to the module scope
    /// unless a finer block-level scope is already in place.
    pub fn set_module(
        &mut self,
        raw: &CourseModule,
        course: Option<&Course>,
        record: Option<&ActivityRecord>,
    ) -> PageResult<()> {
        match course {
            Some(explicit) => {
                if explicit.id != raw.course {
                    return Err(PageError::precondition(format!(
                        "module {} belongs to course {}, not course {}",
                        raw.id, raw.course, explicit.id
                    )));
                }
                self.set_course(explicit)?;
            }
            None => match &self.course {
                Some(held) if held.id == raw.course => {}
                Some(held) => {
                    return Err(PageError::precondition(format!(
                        "module {} belongs to course {}, but the page course is {}",
                        raw.id, raw.course, held.id
                    )));
                }
                None => {
                    let owning = self.services.courses.get_by_id(raw.course)?;
                    self.set_course(&owning)?;
                }
            },
        }

        let owning = match &self.course {
            Some(course) => course.clone(),
            None => return Err(PageError::internal("course missing after resolution")),
        };
        let module = self.services.modules.canonicalize(raw, &owning)?;
        self.activity_record = record.cloned();

        let keep_scope = self.scope.is_some_and(|s| s.level == ScopeLevel::Block);
        if !keep_scope {
            let scope = self.services.scopes.module_scope(module.id);
            self.set_scope(Some(scope));
        }
        self.module = Some(module);
        Ok(())
    }

    /// The activity row owning the page module, fetched lazily. `None` when
    /// the page has no module.
    pub fn activity_record(&mut self) -> PageResult<Option<&ActivityRecord>> {
        if self.activity_record.is_none() {
            match &self.module {
                Some(module) => {
                    let record = self.services.modules.activity_record(module)?;
                    self.activity_record = Some(record);
                }
                None => return Ok(None),
            }
        }
        Ok(self.activity_record.as_ref())
    }

    /// Anchor this page to a category, for category-level pages that carry
    /// no course. Implies the site's root course. Fails once a course or a
    /// category is already set.
    pub fn set_category_by_id(&mut self, id: i64) -> PageResult<()> {
        self.ensure_theme_not_resolved("the category")?;
        if self.category.is_some() || self.category_chain.is_some() {
            return Err(PageError::precondition("category already set"));
        }
        if self.course.is_some() {
            return Err(PageError::precondition(
                "category cannot be set once a course is set",
            ));
        }
        let category = self.services.categories.get_by_id(id)?;
        let scope = self.services.scopes.category_scope(id);
        let site = self
            .services
            .courses
            .get_by_id(self.services.config.site_course_id)?;
        self.category = Some(category);
        self.set_scope(Some(scope));
        self.set_course(&site)?;
        Ok(())
    }

    /// The category chain from the immediate parent down to the root,
    /// lazily loaded and cached. A course in the root category yields the
    /// empty chain.
    pub fn category_chain(&mut self) -> PageResult<&[Category]> {
        if self.category_chain.is_none() {
            let chain = self.load_category_chain()?;
            self.category_chain = Some(chain);
        }
        Ok(self.category_chain.as_deref().unwrap_or(&[]))
    }

    fn load_category_chain(&mut self) -> PageResult<Vec<Category>> {
        // Stage one: make the immediate category known.
        if self.category.is_none() {
            match &self.course {
                Some(course) if course.category != 0 => {
                    let category = self.services.categories.get_by_id(course.category)?;
                    self.category = Some(category);
                }
                _ => return Ok(Vec::new()),
            }
        }
        let immediate = match &self.category {
            Some(category) => category.clone(),
            None => return Ok(Vec::new()),
        };

        // Stage two: pull the ancestors in one lookup and order the chain
        // from the immediate category back to the root.
        let ancestor_ids: Vec<i64> = immediate
            .path
            .iter()
            .copied()
            .filter(|&id| id != immediate.id)
            .collect();
        let ancestors = self.services.categories.list_by_ids(&ancestor_ids)?;
        let mut chain = vec![immediate];
        for id in ancestor_ids.iter().rev() {
            let category = ancestors
                .get(id)
                .cloned()
                .ok_or_else(|| PageError::not_found("category", *id))?;
            chain.push(category);
        }
        Ok(chain)
    }

    // ── Scope ─────────────────────────────────────────────────────────────

    /// The page's security scope. Reading it before it was set is almost
    /// always a page-script bug, so it defaults to the system scope with a
    /// warning rather than failing.
    pub fn scope(&mut self) -> Scope {
        if let Some(scope) = self.scope {
            return scope;
        }
        warn!(page = %self.id, "page scope accessed before it was set, defaulting to the system scope");
        let system = self.services.scopes.system_scope();
        self.scope = Some(system);
        system
    }

    /// Set the security scope. `None` is tolerated as "ensure one is set"
    /// for defensive error paths. Cross-level transitions outside the
    /// configured safe set are logged as suspicious but never rejected.
    pub fn set_scope(&mut self, scope: Option<Scope>) {
        let Some(new) = scope else {
            if self.scope.is_none() {
                self.scope = Some(self.services.scopes.system_scope());
            }
            return;
        };
        if let Some(old) = self.scope {
            if old.level != new.level
                && !self
                    .services
                    .config
                    .safe_scope_transitions
                    .contains(&(old.level, new.level))
            {
                warn!(
                    page = %self.id,
                    from = %old,
                    to = %new,
                    "suspicious scope transition; page scripts normally stay within one scope level"
                );
            }
        }
        self.scope = Some(new);
    }

    // ── Address and classification ────────────────────────────────────────

    pub fn url(&self) -> Option<&PageUrl> {
        self.url.as_ref()
    }

    /// Set the canonical address of this page. Root-relative addresses are
    /// expanded against the site base; the first call seeds the page type
    /// from the URL path unless one was set explicitly.
    pub fn set_url(&mut self, raw: &str, params: &[(&str, String)]) -> PageResult<()> {
        self.ensure_before_output("the page url")?;
        let url = PageUrl::parse(&self.services.config.base_url, raw, params)?;
        if self.page_type.is_none() {
            self.page_type = Some(url.page_type());
        }
        self.url = Some(url);
        Ok(())
    }

    pub fn page_type(&self) -> Option<&str> {
        self.page_type.as_deref()
    }

    pub fn set_page_type(&mut self, page_type: impl Into<String>) {
        self.page_type = Some(page_type.into());
        self.page_type_explicit = true;
    }

    pub fn page_layout(&self) -> &str {
        &self.page_layout
    }

    /// Set the page layout. Layout selects theme templates, so it is locked
    /// alongside the theme.
    pub fn set_page_layout(&mut self, layout: impl Into<String>) -> PageResult<()> {
        self.ensure_theme_not_resolved("the page layout")?;
        self.page_layout = layout.into();
        Ok(())
    }

    pub fn sub_page(&self) -> &str {
        &self.sub_page
    }

    pub fn set_sub_page(&mut self, sub_page: impl Into<String>) {
        self.sub_page = sub_page.into();
    }

    // ── Body classes and alternate versions ───────────────────────────────

    pub fn body_classes(&self) -> &BTreeSet<String> {
        &self.body_classes
    }

    /// Add a CSS class to the page body. Duplicates collapse; rejected once
    /// output has started.
    pub fn add_body_class(&mut self, class: &str) -> PageResult<()> {
        self.ensure_before_output("body classes")?;
        let token = class.trim();
        if token.is_empty() {
            return Err(PageError::precondition("body class must not be empty"));
        }
        self.body_classes.insert(token.to_string());
        Ok(())
    }

    pub fn add_body_classes<'a, I>(&mut self, classes: I) -> PageResult<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for class in classes {
            self.add_body_class(class)?;
        }
        Ok(())
    }

    pub fn alternate_versions(&self) -> &[AlternateVersion] {
        &self.alternate_versions
    }

    pub fn add_alternate_version(&mut self, version: AlternateVersion) -> PageResult<()> {
        self.ensure_before_output("alternate versions")?;
        self.alternate_versions.push(version);
        Ok(())
    }

    // ── Display strings ───────────────────────────────────────────────────

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> PageResult<()> {
        self.ensure_before_output("the page title")?;
        self.title = title.into();
        Ok(())
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn set_heading(&mut self, heading: impl Into<String>) -> PageResult<()> {
        self.ensure_before_output("the page heading")?;
        self.heading = heading.into();
        Ok(())
    }

    pub fn button(&self) -> &str {
        &self.button
    }

    pub fn set_button(&mut self, button: impl Into<String>) -> PageResult<()> {
        self.ensure_before_output("the page button")?;
        self.button = button.into();
        Ok(())
    }

    pub fn heading_menu(&self) -> &str {
        &self.heading_menu
    }

    /// The heading menu renders late in the header, so it stays mutable.
    pub fn set_heading_menu(&mut self, menu: impl Into<String>) {
        self.heading_menu = menu.into();
    }

    pub fn focus_control(&self) -> &str {
        &self.focus_control
    }

    pub fn set_focus_control(&mut self, control: impl Into<String>) {
        self.focus_control = control.into();
    }

    // ── Theme ─────────────────────────────────────────────────────────────

    /// The resolved theme, loading it on first access. Once resolved the
    /// theme is locked: context-affecting mutators fail until
    /// [`reset_theme`](Self::reset_theme).
    pub fn theme(&mut self) -> PageResult<&ThemeHandle> {
        let handle = match self.theme.take() {
            Some(handle) => handle,
            None => self.resolve_theme()?,
        };
        Ok(self.theme.insert(handle))
    }

    fn resolve_theme(&mut self) -> PageResult<ThemeHandle> {
        let hints = ThemeHints {
            course: self.course.as_ref().and_then(|c| c.theme.clone()),
            category: self.category.as_ref().and_then(|c| c.theme.clone()),
            session: self.services.session.get("themeoverride"),
            user: self.services.config.user_theme.clone(),
            cohort: self.services.config.cohort_theme.clone(),
        };
        let (name, initialized_by) = match &self.forced_theme {
            Some(name) => (name.clone(), "force_theme"),
            None => (self.services.themes.resolve_name(&hints), "lazy resolution"),
        };
        let handle = self.services.themes.load(&name)?;
        self.theme_initialized_by = Some(initialized_by);
        debug!(page = %self.id, theme = %handle.name, "theme resolved");
        Ok(handle)
    }

    /// Force a specific theme for this page. Must happen before the theme
    /// resolves.
    pub fn force_theme(&mut self, name: impl Into<String>) -> PageResult<()> {
        self.ensure_theme_not_resolved("the forced theme")?;
        self.forced_theme = Some(name.into());
        Ok(())
    }

    /// Intentionally drop the resolved theme so it re-resolves on next
    /// access. This is the only sanctioned way past the theme lock.
    pub fn reset_theme(&mut self) {
        debug!(page = %self.id, "resetting resolved theme");
        self.theme = None;
        self.theme_initialized_by = None;
    }

    // ── Lazy service handles ──────────────────────────────────────────────

    /// The page's block manager, created on first access for the current
    /// scope and layout.
    pub fn blocks(&mut self) -> &mut dyn BlockManager {
        let manager = match self.blocks.take() {
            Some(manager) => manager,
            None => {
                let scope = self.scope();
                self.services.blocks.create(&scope, &self.page_layout)
            }
        };
        self.blocks.insert(manager).as_mut()
    }

    /// Let the block manager handle add/move/delete actions encoded in the
    /// page URL. Returns true when an action was performed.
    pub fn process_block_url_actions(&mut self) -> PageResult<bool> {
        let url = match &self.url {
            Some(url) => url.clone(),
            None => {
                return Err(PageError::precondition(
                    "the page url must be set before processing block actions",
                ));
            }
        };
        self.blocks().process_url_actions(&url)
    }

    pub fn navigation(&mut self) -> &NavigationView {
        self.navigation_view(NavKind::Main)
    }

    pub fn settings_navigation(&mut self) -> &NavigationView {
        self.navigation_view(NavKind::Settings)
    }

    pub fn flat_navigation(&mut self) -> &NavigationView {
        self.navigation_view(NavKind::Flat)
    }

    pub fn primary_navigation(&mut self) -> &NavigationView {
        self.navigation_view(NavKind::Primary)
    }

    pub fn secondary_navigation(&mut self) -> &NavigationView {
        self.navigation_view(NavKind::Secondary)
    }

    fn navigation_view(&mut self, kind: NavKind) -> &NavigationView {
        let view = match self.nav_slot(kind).take() {
            Some(view) => view,
            None => {
                let request = NavRequest {
                    course: self.course.as_ref(),
                    module: self.module.as_ref(),
                    user_editing: self.user_editing,
                };
                self.services.navigation.build(kind, &request)
            }
        };
        self.nav_slot(kind).insert(view)
    }

    fn nav_slot(&mut self, kind: NavKind) -> &mut Option<NavigationView> {
        match kind {
            NavKind::Main => &mut self.navigation,
            NavKind::Settings => &mut self.settings_navigation,
            NavKind::Flat => &mut self.flat_navigation,
            NavKind::Primary => &mut self.primary_navigation,
            NavKind::Secondary => &mut self.secondary_navigation,
        }
    }

    /// The page's asset requirements collector, created on first access.
    pub fn requirements(&mut self) -> &mut RequirementsCollector {
        let collector = self.requirements.take().unwrap_or_default();
        self.requirements.insert(collector)
    }

    // ── Editing capabilities ──────────────────────────────────────────────

    pub fn is_user_editing(&self) -> bool {
        self.user_editing
    }

    /// Require an extra capability for entering edit mode on this page.
    pub fn require_edit_capability(&mut self, capability: impl Into<String>) {
        let capability = capability.into();
        if capability != BASE_EDIT_CAPABILITY && !self.extra_edit_capabilities.contains(&capability)
        {
            self.extra_edit_capabilities.push(capability);
        }
    }

    /// All capabilities required to enter edit mode: the base one plus any
    /// caller-added extras.
    pub fn edit_capabilities(&self) -> Vec<String> {
        let mut capabilities = vec![BASE_EDIT_CAPABILITY.to_string()];
        capabilities.extend(self.extra_edit_capabilities.iter().cloned());
        capabilities
    }

    // ── Flags ─────────────────────────────────────────────────────────────

    pub fn cacheable(&self) -> bool {
        self.cacheable
    }

    pub fn set_cacheable(&mut self, cacheable: bool) {
        self.cacheable = cacheable;
    }

    pub fn popup_notifications_allowed(&self) -> bool {
        self.popup_notifications_allowed
    }

    pub fn set_popup_notifications_allowed(&mut self, allowed: bool) {
        self.popup_notifications_allowed = allowed;
    }

    pub fn force_lock_all_blocks(&self) -> bool {
        self.force_lock_all_blocks
    }

    pub fn set_force_lock_all_blocks(&mut self, lock: bool) {
        self.force_lock_all_blocks = lock;
    }

    pub fn show_course_index(&self) -> bool {
        self.show_course_index
    }

    pub fn set_show_course_index(&mut self, show: bool) {
        self.show_course_index = show;
    }

    pub fn secondary_nav_visible(&self) -> bool {
        self.secondary_nav_visible
    }

    pub fn set_secondary_nav_visible(&mut self, visible: bool) {
        self.secondary_nav_visible = visible;
    }

    pub fn secondary_nav_tablist(&self) -> bool {
        self.secondary_nav_tablist
    }

    pub fn set_secondary_nav_tablist(&mut self, tablist: bool) {
        self.secondary_nav_tablist = tablist;
    }

    pub fn navigation_overflow(&self) -> bool {
        self.navigation_overflow
    }

    pub fn set_navigation_overflow(&mut self, overflow: bool) {
        self.navigation_overflow = overflow;
    }

    pub fn region_settings_in_header_actions(&self) -> bool {
        self.region_settings_in_header_actions
    }

    pub fn set_region_settings_in_header_actions(&mut self, in_header: bool) {
        self.region_settings_in_header_actions = in_header;
    }

    // ── Edit snapshots ────────────────────────────────────────────────────

    /// Persist a compact snapshot of this editing context into session
    /// storage and return its lookup key (a digest over the record and the
    /// session secret). Only valid while the user is editing.
    pub fn capture_edit_snapshot(&mut self) -> PageResult<String> {
        if !self.user_editing {
            return Err(PageError::precondition(
                "edit snapshots can only be captured while the user is editing",
            ));
        }
        let url = match &self.url {
            Some(url) => url.canonical().to_string(),
            None => {
                return Err(PageError::precondition(
                    "the page url must be set before capturing an edit snapshot",
                ));
            }
        };
        let scope = self.scope();

        let mut snapshot = EditSnapshot::new(scope.id, url);
        if let Some(module) = &self.module {
            snapshot.module_id = Some(module.id);
        } else if let Some(course) = &self.course {
            snapshot.course_id = Some(course.id);
        }
        if self.page_layout != DEFAULT_PAGE_LAYOUT {
            snapshot.page_layout = Some(self.page_layout.clone());
        }
        if self.page_type_explicit {
            snapshot.page_type = self.page_type.clone();
        }
        if !self.sub_page.is_empty() {
            snapshot.sub_page = Some(self.sub_page.clone());
        }
        snapshot.extra_capabilities = self.extra_edit_capabilities.clone();
        snapshot.force_lock_all_blocks = self.force_lock_all_blocks;

        let key = snapshot.digest(&self.services.session.secret())?;
        let record = serde_json::to_string(&snapshot)
            .map_err(|e| PageError::internal(format!("snapshot serialization failed: {e}")))?;
        self.services.session.put(&key, record);
        debug!(page = %self.id, key = %key, "edit snapshot captured");
        Ok(key)
    }

    /// Rebuild an editing context from a snapshot key.
    ///
    /// A missing record is `NotFound`; a digest that no longer matches under
    /// the current session secret is `Tampered` — the caller falls back to
    /// reconstructing the context from the live request. Setters replay in a
    /// fixed order: scope, module or course, url, layout/type/subpage,
    /// capabilities, lock flag.
    pub fn restore_edit_snapshot(services: PageServices, key: &str) -> PageResult<PageContext> {
        let record = services
            .session
            .get(key)
            .ok_or_else(|| PageError::not_found("edit snapshot", key))?;
        let snapshot: EditSnapshot =
            serde_json::from_str(&record).map_err(|_| PageError::Tampered)?;
        if snapshot.digest(&services.session.secret())? != key {
            return Err(PageError::Tampered);
        }

        let scope = services
            .scopes
            .instance_by_id(snapshot.scope_id)
            .ok_or_else(|| PageError::not_found("scope", snapshot.scope_id))?;

        let mut page = PageContext::new(services);
        page.set_user_editing(true);
        page.set_scope(Some(scope));
        if let Some(module_id) = snapshot.module_id {
            let raw = page.services.modules.raw_by_id(module_id)?;
            page.set_module(&raw, None, None)?;
        } else if let Some(course_id) = snapshot.course_id {
            let course = page.services.courses.get_by_id(course_id)?;
            page.set_course(&course)?;
        }
        page.set_url(&snapshot.url, &[])?;
        if let Some(layout) = &snapshot.page_layout {
            page.set_page_layout(layout.clone())?;
        }
        if let Some(page_type) = &snapshot.page_type {
            page.set_page_type(page_type.clone());
        }
        if let Some(sub_page) = &snapshot.sub_page {
            page.set_sub_page(sub_page.clone());
        }
        for capability in &snapshot.extra_capabilities {
            page.require_edit_capability(capability.clone());
        }
        page.set_force_lock_all_blocks(snapshot.force_lock_all_blocks);
        debug!(page = %page.id, key = %key, "edit snapshot restored");
        Ok(page)
    }
}
