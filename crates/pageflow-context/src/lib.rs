//! Pageflow Context — request page-state lifecycle manager.
//!
//! One [`PageContext`] is created per incoming request (or sub-request, e.g.
//! fragment rendering). It holds all page-scoped configuration and service
//! handles, enforces the ordered output lifecycle, lazily constructs and
//! caches dependent services, and rejects mutation that is illegal once
//! output has started.

mod body;
pub mod context;
pub mod requirements;
pub mod services;

pub use context::{BASE_EDIT_CAPABILITY, DEFAULT_PAGE_LAYOUT, PageContext};
pub use requirements::RequirementsCollector;
pub use services::{DeviceClass, PageServices, PrimaryCourseHook, SiteConfig, TextDirection};
