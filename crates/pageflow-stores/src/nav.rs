//! Reference navigation builder.

use pageflow_model::{NavKind, NavNode, NavigationView};

use crate::{NavRequest, NavigationBuilder};

/// Builds minimal navigation trees straight from the request fields. Real
/// sites plug in their own builder; the context only caches the views.
pub struct StaticNavigationBuilder {
    site_name: String,
}

impl StaticNavigationBuilder {
    pub fn new(site_name: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
        }
    }
}

impl NavigationBuilder for StaticNavigationBuilder {
    fn build(&self, kind: NavKind, request: &NavRequest<'_>) -> NavigationView {
        let mut roots = vec![NavNode::leaf(self.site_name.clone(), "/")];

        if let Some(course) = request.course {
            let mut children = Vec::new();
            if let Some(module) = request.module {
                children.push(NavNode::leaf(
                    module.name.clone(),
                    format!("/mod/{}/view.php?id={}", module.modname, module.id),
                ));
            }
            roots.push(NavNode::branch(course.fullname.clone(), children));
        }

        if matches!(kind, NavKind::Secondary) && request.user_editing {
            roots.push(NavNode::leaf("Settings", "/settings"));
        }

        NavigationView { kind, roots }
    }
}
