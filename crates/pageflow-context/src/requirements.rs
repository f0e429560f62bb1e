//! Page requirements collector.
//!
//! Accumulates the stylesheets, scripts, and init calls a page needs, with
//! duplicates collapsed. The rendering layer drains it when printing the
//! header and footer; asset pipelines are out of scope here.

/// Deduplicated asset requirements for one page.
#[derive(Debug, Default)]
pub struct RequirementsCollector {
    css: Vec<String>,
    js: Vec<String>,
    init_calls: Vec<String>,
}

impl RequirementsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a stylesheet. Repeat requests are ignored.
    pub fn require_css(&mut self, url: impl Into<String>) {
        let url = url.into();
        if !self.css.contains(&url) {
            self.css.push(url);
        }
    }

    /// Require a script. Repeat requests are ignored.
    pub fn require_js(&mut self, url: impl Into<String>) {
        let url = url.into();
        if !self.js.contains(&url) {
            self.js.push(url);
        }
    }

    /// Queue a JavaScript init call for the page footer. Init calls are not
    /// deduplicated — repeated calls are intentional.
    pub fn js_init_call(&mut self, call: impl Into<String>) {
        self.init_calls.push(call.into());
    }

    pub fn css_urls(&self) -> &[String] {
        &self.css
    }

    pub fn js_urls(&self) -> &[String] {
        &self.js
    }

    pub fn init_calls(&self) -> &[String] {
        &self.init_calls
    }
}
