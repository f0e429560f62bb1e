//! Security scopes — authorization boundaries a page can belong to.

use std::fmt;

/// Granularity of a security scope, coarsest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScopeLevel {
    System,
    Category,
    Course,
    Module,
    Block,
}

impl fmt::Display for ScopeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::System => "system",
            Self::Category => "category",
            Self::Course => "course",
            Self::Module => "module",
            Self::Block => "block",
        };
        f.write_str(name)
    }
}

/// A resolved security scope: a stable id plus the level and the instance
/// (course id, module id, ...) it is anchored to.
///
/// Scope ids are allocated by the scope-resolver collaborator; the context
/// never invents them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scope {
    pub id: i64,
    pub level: ScopeLevel,
    /// Id of the entity this scope is anchored to; 0 for the system scope.
    pub instance: i64,
}

impl Scope {
    pub fn new(id: i64, level: ScopeLevel, instance: i64) -> Self {
        Self {
            id,
            level,
            instance,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} (scope {})", self.level, self.instance, self.id)
    }
}
