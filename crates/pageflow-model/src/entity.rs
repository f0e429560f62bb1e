//! Entity records the context holds or resolves.
//!
//! These are plain owned values. Setters on the context clone their input so
//! later external mutation of a caller's record never leaks into page state.

/// A course record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: i64,
    /// Owning category id; 0 means the root category.
    pub category: i64,
    pub shortname: String,
    pub fullname: String,
    /// Course-level theme override, if any.
    pub theme: Option<String>,
    /// Forced course language, if any.
    pub lang: Option<String>,
}

impl Course {
    pub fn new(id: i64, category: i64, shortname: impl Into<String>) -> Self {
        let shortname = shortname.into();
        Self {
            id,
            category,
            fullname: shortname.clone(),
            shortname,
            theme: None,
            lang: None,
        }
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }
}

/// A course category record.
///
/// `path` lists ancestor ids from the root down to this category inclusive,
/// so the chain from a category back to the root can be loaded in one
/// `list_by_ids` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    /// Parent category id; 0 for top-level categories.
    pub parent: i64,
    pub name: String,
    pub path: Vec<i64>,
    pub theme: Option<String>,
}

impl Category {
    pub fn new(id: i64, parent: i64, name: impl Into<String>, path: Vec<i64>) -> Self {
        Self {
            id,
            parent,
            name: name.into(),
            path,
            theme: None,
        }
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }
}

/// A raw course-module reference, as read from a request or a store row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseModule {
    pub id: i64,
    /// Id of the course this module claims to belong to.
    pub course: i64,
    /// Id of the activity instance backing the module.
    pub instance: i64,
    /// Activity kind, e.g. "forum", "quiz".
    pub modname: String,
}

/// A canonical module reference, enriched with authoritative metadata by the
/// module-info collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInfo {
    pub id: i64,
    pub course: i64,
    pub instance: i64,
    pub modname: String,
    pub name: String,
    pub visible: bool,
}

/// The activity row owning a course module (the forum, the quiz, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRecord {
    pub id: i64,
    pub course: i64,
    pub name: String,
}

/// A loaded theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeHandle {
    pub name: String,
    /// Parent themes this theme inherits from, nearest first.
    pub parents: Vec<String>,
}

impl ThemeHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parents: Vec::new(),
        }
    }
}

/// An alternate representation of the page (feed, export format, ...)
/// advertised in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternateVersion {
    pub title: String,
    pub url: String,
    pub mimetype: String,
}
