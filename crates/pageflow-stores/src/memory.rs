//! In-memory reference stores.
//!
//! Backed by `parking_lot` locks over plain maps. These serve tests and
//! small deployments; a real site wires database-backed implementations of
//! the same traits.

use std::collections::HashMap;

use parking_lot::{Mutex, RwLock};

use pageflow_model::{
    ActivityRecord, Category, Course, CourseModule, ModuleInfo, PageError, PageResult, Scope,
    ScopeLevel,
};

use crate::{CategoryStore, CourseStore, ModuleInfoProvider, ScopeResolver};

/// Course store over a plain map.
#[derive(Default)]
pub struct MemoryCourseStore {
    courses: RwLock<HashMap<i64, Course>>,
}

impl MemoryCourseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, course: Course) {
        self.courses.write().insert(course.id, course);
    }
}

impl CourseStore for MemoryCourseStore {
    fn get_by_id(&self, id: i64) -> PageResult<Course> {
        self.courses
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| PageError::not_found("course", id))
    }
}

/// Category store over a plain map.
#[derive(Default)]
pub struct MemoryCategoryStore {
    categories: RwLock<HashMap<i64, Category>>,
}

impl MemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, category: Category) {
        self.categories.write().insert(category.id, category);
    }
}

impl CategoryStore for MemoryCategoryStore {
    fn get_by_id(&self, id: i64) -> PageResult<Category> {
        self.categories
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| PageError::not_found("category", id))
    }

    fn list_by_ids(&self, ids: &[i64]) -> PageResult<HashMap<i64, Category>> {
        let categories = self.categories.read();
        Ok(ids
            .iter()
            .filter_map(|id| categories.get(id).map(|c| (*id, c.clone())))
            .collect())
    }
}

/// Module metadata provider over registered raw modules.
#[derive(Default)]
pub struct MemoryModuleInfoProvider {
    modules: RwLock<HashMap<i64, CourseModule>>,
}

impl MemoryModuleInfoProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, module: CourseModule) {
        self.modules.write().insert(module.id, module);
    }
}

impl ModuleInfoProvider for MemoryModuleInfoProvider {
    fn canonicalize(&self, raw: &CourseModule, course: &Course) -> PageResult<ModuleInfo> {
        if raw.course != course.id {
            return Err(PageError::precondition(format!(
                "module {} belongs to course {}, not course {}",
                raw.id, raw.course, course.id
            )));
        }
        Ok(ModuleInfo {
            id: raw.id,
            course: raw.course,
            instance: raw.instance,
            modname: raw.modname.clone(),
            name: format!("{} {}", raw.modname, raw.instance),
            visible: true,
        })
    }

    fn raw_by_id(&self, id: i64) -> PageResult<CourseModule> {
        self.modules
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| PageError::not_found("module", id))
    }

    fn activity_record(&self, module: &ModuleInfo) -> PageResult<ActivityRecord> {
        Ok(ActivityRecord {
            id: module.instance,
            course: module.course,
            name: module.name.clone(),
        })
    }
}

/// Scope resolver allocating sequential scope ids, memoized per
/// (level, instance) pair so repeated lookups agree.
pub struct MemoryScopeResolver {
    inner: Mutex<ScopeTable>,
}

struct ScopeTable {
    next_id: i64,
    by_key: HashMap<(ScopeLevel, i64), i64>,
    by_id: HashMap<i64, Scope>,
}

impl MemoryScopeResolver {
    pub fn new() -> Self {
        let mut table = ScopeTable {
            next_id: 2,
            by_key: HashMap::new(),
            by_id: HashMap::new(),
        };
        // The system scope is always id 1.
        let system = Scope::new(1, ScopeLevel::System, 0);
        table.by_key.insert((ScopeLevel::System, 0), 1);
        table.by_id.insert(1, system);
        Self {
            inner: Mutex::new(table),
        }
    }

    fn scope_for(&self, level: ScopeLevel, instance: i64) -> Scope {
        let mut table = self.inner.lock();
        if let Some(id) = table.by_key.get(&(level, instance)) {
            return table.by_id[id];
        }
        let id = table.next_id;
        table.next_id += 1;
        let scope = Scope::new(id, level, instance);
        table.by_key.insert((level, instance), id);
        table.by_id.insert(id, scope);
        scope
    }
}

impl Default for MemoryScopeResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeResolver for MemoryScopeResolver {
    fn system_scope(&self) -> Scope {
        self.scope_for(ScopeLevel::System, 0)
    }

    fn category_scope(&self, category_id: i64) -> Scope {
        self.scope_for(ScopeLevel::Category, category_id)
    }

    fn course_scope(&self, course_id: i64) -> Scope {
        self.scope_for(ScopeLevel::Course, course_id)
    }

    fn module_scope(&self, module_id: i64) -> Scope {
        self.scope_for(ScopeLevel::Module, module_id)
    }

    fn block_scope(&self, block_id: i64) -> Scope {
        self.scope_for(ScopeLevel::Block, block_id)
    }

    fn instance_by_id(&self, id: i64) -> Option<Scope> {
        self.inner.lock().by_id.get(&id).copied()
    }
}
