//! Navigation view handles.
//!
//! Navigation trees are built by an external collaborator; the context only
//! caches the finished views. The node shape here is deliberately minimal —
//! enough for a renderer to walk, nothing more.

/// Which navigation variant a view represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKind {
    /// The main site/course navigation tree.
    Main,
    /// The settings (administration) tree.
    Settings,
    /// Flattened navigation for drawer-style rendering.
    Flat,
    /// Top-level primary navigation.
    Primary,
    /// Course-level secondary navigation.
    Secondary,
}

impl NavKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Settings => "settings",
            Self::Flat => "flat",
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

/// A single navigation node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavNode {
    pub text: String,
    pub url: Option<String>,
    pub children: Vec<NavNode>,
}

impl NavNode {
    pub fn leaf(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: Some(url.into()),
            children: Vec::new(),
        }
    }

    pub fn branch(text: impl Into<String>, children: Vec<NavNode>) -> Self {
        Self {
            text: text.into(),
            url: None,
            children,
        }
    }
}

/// A finished navigation tree of one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationView {
    pub kind: NavKind,
    pub roots: Vec<NavNode>,
}
