//! Controller-level attributes: grouping, shared middleware and resources.

use std::collections::BTreeMap;

/// URI prefix applied to every route of the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefix {
    pub prefix: String,
}

impl Prefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

/// Host the controller's routes are restricted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    pub domain: String,
}

impl Domain {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }
}

/// Domain looked up by key in the registrar's configured domain map.
///
/// Takes precedence over [`Domain`] when the key resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainFromConfig {
    pub key: String,
}

impl DomainFromConfig {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// One route group. A controller may carry several; its routes are then
/// registered once per group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    pub prefix: Option<String>,
    pub domain: Option<String>,
    /// Prepended to the names of routes registered inside the group.
    pub as_name: Option<String>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn as_name(mut self, as_name: impl Into<String>) -> Self {
        self.as_name = Some(as_name.into());
        self
    }
}

/// Middleware applied to every route of the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Middleware {
    pub middleware: Vec<String>,
}

impl Middleware {
    pub fn new<I, S>(middleware: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            middleware: middleware.into_iter().map(Into::into).collect(),
        }
    }
}

/// Declares the controller as a REST resource.
///
/// A resource controller gets the conventional CRUD routes and none of its
/// methods' own route attributes are processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub resource: String,
    pub api_resource: bool,
    pub only: Option<Vec<String>>,
    pub except: Option<Vec<String>>,
    pub names: Option<BTreeMap<String, String>>,
    pub parameters: Option<BTreeMap<String, String>>,
    pub shallow: Option<bool>,
}

impl Resource {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            api_resource: false,
            only: None,
            except: None,
            names: None,
            parameters: None,
            shallow: None,
        }
    }

    /// API resource: no `create`/`edit` form routes.
    pub fn api(resource: impl Into<String>) -> Self {
        Self {
            api_resource: true,
            ..Self::new(resource)
        }
    }

    pub fn only<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = Some(actions.into_iter().map(Into::into).collect());
        self
    }

    pub fn except<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.except = Some(actions.into_iter().map(Into::into).collect());
        self
    }

    /// Override route names, keyed by action (`"index"` → `"photos.list"`).
    pub fn names<I, K, V>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.names = Some(
            names
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Override parameter names, keyed by resource segment.
    pub fn parameters<I, K, V>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.parameters = Some(
            parameters
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    pub fn shallow(mut self, shallow: bool) -> Self {
        self.shallow = Some(shallow);
        self
    }
}
