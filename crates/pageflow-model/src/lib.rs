//! Pageflow — Core Types
//!
//! Plain data types shared by the context and store layers. This crate is
//! the single source of truth for the lifecycle state enum, the security
//! scope model, entity records, page addresses, the error taxonomy, and the
//! persisted edit-snapshot record.

pub mod entity;
pub mod error;
pub mod nav;
pub mod scope;
pub mod snapshot;
pub mod state;
pub mod url;

pub use entity::{
    ActivityRecord, AlternateVersion, Category, Course, CourseModule, ModuleInfo, ThemeHandle,
};
pub use error::{PageError, PageResult};
pub use nav::{NavKind, NavNode, NavigationView};
pub use scope::{Scope, ScopeLevel};
pub use snapshot::EditSnapshot;
pub use state::PageState;
pub use url::PageUrl;
