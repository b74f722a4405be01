//! # Layout Descriptors
//!
//! The payloads handed to the navigation engine: which screen to present,
//! with what props, under which options. A `Layout` is either a single
//! component or a stack of components; the `From` conversions are what let
//! `show_modal` accept either shape and normalize it before forwarding.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of one *presented* screen instance, assigned by the engine.
///
/// Distinct from [`ScreenName`]: presenting the same screen twice yields two
/// component ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ComponentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Registered name of a screen: the key presentation glue registers
/// renderers under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScreenName(String);

impl ScreenName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScreenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ScreenName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for ScreenName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Presentation options attached to a screen. Sparse: unset fields fall back
/// to whatever the engine's defaults say.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenOptions {
    /// Title shown by the engine's chrome for this screen.
    pub title: Option<String>,
    /// Overlays only: whether input outside the overlay reaches the screen
    /// beneath it.
    pub pass_through: Option<bool>,
}

impl ScreenOptions {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Merge `over` on top of `self`: set fields of `over` win.
    pub fn merge(&self, over: &ScreenOptions) -> ScreenOptions {
        ScreenOptions {
            title: over.title.clone().or_else(|| self.title.clone()),
            pass_through: over.pass_through.or(self.pass_through),
        }
    }
}

/// One screen inside a layout: registered name plus optional free-form props
/// and options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenComponent {
    pub name: ScreenName,
    pub pass_props: Option<serde_json::Value>,
    pub options: Option<ScreenOptions>,
}

impl ScreenComponent {
    pub fn new(name: impl Into<ScreenName>) -> Self {
        Self {
            name: name.into(),
            pass_props: None,
            options: None,
        }
    }

    pub fn with_props(mut self, props: serde_json::Value) -> Self {
        self.pass_props = Some(props);
        self
    }

    pub fn with_options(mut self, options: ScreenOptions) -> Self {
        self.options = Some(options);
        self
    }
}

/// A presentable layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Layout {
    /// A single screen.
    Component(ScreenComponent),
    /// An ordered stack of screens, last one on top.
    Stack {
        children: Vec<ScreenComponent>,
        options: Option<ScreenOptions>,
    },
}

impl Layout {
    pub fn component(component: ScreenComponent) -> Self {
        Self::Component(component)
    }

    pub fn stack(children: Vec<ScreenComponent>, options: Option<ScreenOptions>) -> Self {
        Self::Stack { children, options }
    }

    /// The screens of this layout in presentation order.
    pub fn children(&self) -> Vec<&ScreenComponent> {
        match self {
            Self::Component(component) => vec![component],
            Self::Stack { children, .. } => children.iter().collect(),
        }
    }
}

impl From<ScreenComponent> for Layout {
    fn from(component: ScreenComponent) -> Self {
        Self::Component(component)
    }
}

/// An ordered sequence of screens normalizes to a stacked layout.
impl From<Vec<ScreenComponent>> for Layout {
    fn from(children: Vec<ScreenComponent>) -> Self {
        Self::Stack {
            children,
            options: None,
        }
    }
}
