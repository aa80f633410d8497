//! Controller metadata tables.
//!
//! A controller publishes a [`ControllerDescriptor`]: its fully qualified
//! name, the module it lives in, its own attributes and an ordered list of
//! methods with theirs. This is the data the registrar walks.

use std::fmt;

use serde::Serialize;

use crate::attributes::{
    Attribute, Defaults, Fallback, RouteAttribute, ScopeBindings, WhereAttribute,
};

/// Method name that marks a controller as invokable (single action).
pub const INVOKE_METHOD: &str = "invoke";

/// Attributes attached to one member (the controller itself or a method).
#[derive(Debug, Clone, Default)]
pub struct AttributeSet {
    attributes: Vec<Attribute>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, attribute: impl Into<Attribute>) {
        self.attributes.push(attribute.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn routes(&self) -> impl Iterator<Item = &dyn RouteAttribute> {
        self.attributes.iter().filter_map(|a| match a {
            Attribute::Route(r) => Some(r.as_ref()),
            _ => None,
        })
    }

    pub fn wheres(&self) -> impl Iterator<Item = &dyn WhereAttribute> {
        self.attributes.iter().filter_map(|a| match a {
            Attribute::Where(w) => Some(w.as_ref()),
            _ => None,
        })
    }

    pub fn defaults(&self) -> impl Iterator<Item = &Defaults> {
        self.attributes.iter().filter_map(|a| match a {
            Attribute::Defaults(d) => Some(d),
            _ => None,
        })
    }

    pub fn fallbacks(&self) -> impl Iterator<Item = &Fallback> {
        self.attributes.iter().filter_map(|a| match a {
            Attribute::Fallback(f) => Some(f),
            _ => None,
        })
    }

    /// The first scope-bindings attribute; later ones are ignored.
    pub fn scope_bindings(&self) -> Option<&ScopeBindings> {
        self.attributes.iter().find_map(|a| match a {
            Attribute::ScopeBindings(s) => Some(s),
            _ => None,
        })
    }
}

impl<A: Into<Attribute>> FromIterator<A> for AttributeSet {
    fn from_iter<T: IntoIterator<Item = A>>(iter: T) -> Self {
        Self {
            attributes: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// One public method of a controller.
#[derive(Debug, Clone)]
pub struct MethodDescriptor {
    pub name: String,
    pub attributes: AttributeSet,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: AttributeSet::new(),
        }
    }

    pub fn attribute(mut self, attribute: impl Into<Attribute>) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn is_invoke(&self) -> bool {
        self.name == INVOKE_METHOD
    }
}

/// Everything the registrar knows about one controller.
#[derive(Debug, Clone)]
pub struct ControllerDescriptor {
    /// Fully qualified name, e.g. `app::controllers::users::UserController`.
    pub name: String,
    /// Module path the controller is declared in, used to map source
    /// files back to controllers.
    pub module: String,
    pub attributes: AttributeSet,
    pub methods: Vec<MethodDescriptor>,
}

impl ControllerDescriptor {
    /// Describe a controller named `ident` declared in `module`.
    ///
    /// Usually called as `ControllerDescriptor::new(module_path!(), "UserController")`.
    pub fn new(module: impl Into<String>, ident: &str) -> Self {
        let module = module.into();
        let name = if module.is_empty() {
            ident.to_string()
        } else {
            format!("{module}::{ident}")
        };
        Self {
            name,
            module,
            attributes: AttributeSet::new(),
            methods: Vec::new(),
        }
    }

    pub fn attribute(mut self, attribute: impl Into<Attribute>) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// Short type name, the last path segment.
    pub fn ident(&self) -> &str {
        self.name.rsplit("::").next().unwrap_or(&self.name)
    }
}

/// What a registered route dispatches to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum Action {
    /// A single-action controller, dispatched through its invoke method.
    Controller(String),
    Method { controller: String, method: String },
}

impl Action {
    pub fn controller(&self) -> &str {
        match self {
            Action::Controller(controller) => controller,
            Action::Method { controller, .. } => controller,
        }
    }

    pub fn method(&self) -> Option<&str> {
        match self {
            Action::Controller(_) => None,
            Action::Method { method, .. } => Some(method),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Controller(controller) => f.write_str(controller),
            Action::Method { controller, method } => write!(f, "{controller}@{method}"),
        }
    }
}
