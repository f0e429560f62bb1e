//! Page addresses.
//!
//! A page URL is either absolute (http/https) or root-relative, in which
//! case it is expanded against the site's base address. Anything else is
//! rejected as malformed — pages never live at relative or exotic-scheme
//! addresses.

use std::fmt;

use url::Url;

use crate::error::{PageError, PageResult};

/// Canonical address of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageUrl {
    inner: Url,
}

impl PageUrl {
    /// Parse `raw` against the site base, appending `params` as query pairs.
    ///
    /// Accepts absolute http(s) URLs and root-relative paths ("/course/..").
    pub fn parse(base: &Url, raw: &str, params: &[(&str, String)]) -> PageResult<Self> {
        let mut inner = if raw.starts_with('/') {
            base.join(raw)
                .map_err(|e| PageError::precondition(format!("malformed page url {raw:?}: {e}")))?
        } else {
            let parsed = Url::parse(raw)
                .map_err(|e| PageError::precondition(format!("malformed page url {raw:?}: {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(PageError::precondition(format!(
                    "malformed page url {raw:?}: expected absolute http(s) or root-relative"
                )));
            }
            parsed
        };

        if !params.is_empty() {
            let mut pairs = inner.query_pairs_mut();
            for (name, value) in params {
                pairs.append_pair(name, value);
            }
        }

        Ok(Self { inner })
    }

    /// Derive the default page-type identifier from the path:
    /// `/course/view.php` becomes `course-view`, the front page becomes
    /// `site-index`.
    pub fn page_type(&self) -> String {
        let path = self
            .inner
            .path()
            .trim_matches('/')
            .trim_end_matches(".php")
            .to_string();
        if path.is_empty() || path == "index" {
            return "site-index".to_string();
        }
        path.replace('/', "-")
    }

    /// The same address with the fragment stripped, as persisted in edit
    /// snapshots.
    pub fn canonical(&self) -> PageUrl {
        let mut inner = self.inner.clone();
        inner.set_fragment(None);
        Self { inner }
    }

    /// Look up a single query parameter.
    pub fn param(&self, name: &str) -> Option<String> {
        self.inner
            .query_pairs()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.into_owned())
    }

    pub fn as_url(&self) -> &Url {
        &self.inner
    }
}

impl fmt::Display for PageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}
