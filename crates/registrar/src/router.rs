//! The host router contract.
//!
//! The registrar never matches or dispatches requests itself; it only calls
//! the operations below. [`RouteTable`](crate::route_table::RouteTable) is
//! the in-crate implementation.

use std::collections::BTreeMap;

use routemark_core::{Action, GroupOptions, HttpMethod};
use serde::Serialize;

/// A freshly added route, configured in place by the registrar.
pub trait RouteHandle {
    /// Set the route name. `None` leaves the route unnamed.
    fn name(&mut self, name: Option<&str>) -> &mut Self;

    /// Append middleware, keeping order and duplicates.
    fn middleware(&mut self, middleware: Vec<String>) -> &mut Self;

    fn set_wheres(&mut self, wheres: BTreeMap<String, String>) -> &mut Self;

    fn set_defaults(&mut self, defaults: BTreeMap<String, String>) -> &mut Self;

    fn scope_bindings(&mut self) -> &mut Self;

    fn fallback(&mut self) -> &mut Self;
}

/// Route registration primitives consumed by the registrar.
pub trait Router {
    type Route: RouteHandle;

    /// Run `routes` with `options` applied to everything it registers.
    fn group(&mut self, options: &GroupOptions, routes: &mut dyn FnMut(&mut Self));

    fn add_route(&mut self, methods: &[HttpMethod], uri: &str, action: Action)
        -> &mut Self::Route;

    /// Register the conventional CRUD routes described by `resource`.
    fn resource(&mut self, resource: PendingResource);
}

/// A resource registration with its options, handed to [`Router::resource`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingResource {
    /// Dotted resource name; `photos.comments` nests comments under photos.
    pub name: String,
    pub controller: String,
    /// API resources have no `create`/`edit` routes.
    pub api: bool,
    pub only: Option<Vec<String>>,
    pub except: Option<Vec<String>>,
    pub names: BTreeMap<String, String>,
    pub parameters: BTreeMap<String, String>,
    pub shallow: bool,
    pub middleware: Vec<String>,
}

impl PendingResource {
    pub fn new(name: impl Into<String>, controller: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            controller: controller.into(),
            api: false,
            only: None,
            except: None,
            names: BTreeMap::new(),
            parameters: BTreeMap::new(),
            shallow: false,
            middleware: Vec::new(),
        }
    }

    pub fn api(name: impl Into<String>, controller: impl Into<String>) -> Self {
        Self {
            api: true,
            ..Self::new(name, controller)
        }
    }

    pub fn only(mut self, only: Vec<String>) -> Self {
        self.only = Some(only);
        self
    }

    pub fn except(mut self, except: Vec<String>) -> Self {
        self.except = Some(except);
        self
    }

    pub fn names(mut self, names: BTreeMap<String, String>) -> Self {
        self.names = names;
        self
    }

    pub fn parameters(mut self, parameters: BTreeMap<String, String>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn shallow(mut self, shallow: bool) -> Self {
        self.shallow = shallow;
        self
    }

    pub fn middleware(mut self, middleware: Vec<String>) -> Self {
        self.middleware = middleware;
        self
    }
}
