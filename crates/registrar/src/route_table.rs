//! In-memory [`Router`] that records every registration.
//!
//! Group options are applied as routes are added: prefixes are joined,
//! the innermost domain wins and name prefixes are concatenated. URIs are
//! stored without a leading slash, except the root which is `/`.

use std::collections::BTreeMap;

use routemark_core::{Action, GroupOptions, HttpMethod};
use serde::Serialize;

use crate::resource;
use crate::router::{PendingResource, RouteHandle, Router};

/// One registered route with everything the registrar applied to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub methods: Vec<HttpMethod>,
    pub uri: String,
    pub domain: Option<String>,
    pub action: Action,
    pub name: Option<String>,
    pub middleware: Vec<String>,
    pub wheres: BTreeMap<String, String>,
    pub defaults: BTreeMap<String, String>,
    pub scope_bindings: bool,
    pub fallback: bool,
    #[serde(skip)]
    name_prefix: Option<String>,
}

impl RouteEntry {
    fn new(methods: &[HttpMethod], uri: String, action: Action, group: &GroupOptions) -> Self {
        Self {
            methods: methods.to_vec(),
            uri,
            domain: group.domain.clone(),
            action,
            name: None,
            middleware: Vec::new(),
            wheres: BTreeMap::new(),
            defaults: BTreeMap::new(),
            scope_bindings: false,
            fallback: false,
            name_prefix: group.as_name.clone(),
        }
    }

    pub fn has_method(&self, method: HttpMethod) -> bool {
        self.methods.contains(&method)
    }
}

impl RouteHandle for RouteEntry {
    fn name(&mut self, name: Option<&str>) -> &mut Self {
        if let Some(name) = name {
            let prefix = self.name_prefix.as_deref().unwrap_or_default();
            self.name = Some(format!("{prefix}{name}"));
        }
        self
    }

    fn middleware(&mut self, middleware: Vec<String>) -> &mut Self {
        self.middleware.extend(middleware);
        self
    }

    fn set_wheres(&mut self, wheres: BTreeMap<String, String>) -> &mut Self {
        self.wheres.extend(wheres);
        self
    }

    fn set_defaults(&mut self, defaults: BTreeMap<String, String>) -> &mut Self {
        self.defaults.extend(defaults);
        self
    }

    fn scope_bindings(&mut self) -> &mut Self {
        self.scope_bindings = true;
        self
    }

    fn fallback(&mut self) -> &mut Self {
        self.fallback = true;
        self
    }
}

/// Recording router.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<RouteEntry>,
    groups: Vec<GroupOptions>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> &[RouteEntry] {
        &self.routes
    }

    pub fn into_routes(self) -> Vec<RouteEntry> {
        self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Last route registered under `name`, mirroring name-lookup semantics
    /// where a later registration shadows an earlier one.
    pub fn by_name(&self, name: &str) -> Option<&RouteEntry> {
        self.routes
            .iter()
            .rev()
            .find(|r| r.name.as_deref() == Some(name))
    }

    /// First route declared for `method` at exactly `uri`.
    pub fn find(&self, method: HttpMethod, uri: &str) -> Option<&RouteEntry> {
        let uri = join_uri(None, uri);
        self.routes
            .iter()
            .find(|r| r.uri == uri && r.has_method(method))
    }

    pub fn fallbacks(&self) -> impl Iterator<Item = &RouteEntry> {
        self.routes.iter().filter(|r| r.fallback)
    }

    /// Effective options of the current group nesting.
    fn current_group(&self) -> GroupOptions {
        let mut merged = GroupOptions::default();
        for group in &self.groups {
            if let Some(prefix) = &group.prefix {
                let joined = join_uri(merged.prefix.as_deref(), prefix);
                merged.prefix = (joined != "/").then_some(joined);
            }
            if group.domain.is_some() {
                merged.domain = group.domain.clone();
            }
            if let Some(as_name) = &group.as_name {
                let mut name = merged.as_name.take().unwrap_or_default();
                name.push_str(as_name);
                merged.as_name = Some(name);
            }
        }
        merged
    }

    fn push(&mut self, methods: &[HttpMethod], uri: &str, action: Action) -> &mut RouteEntry {
        let group = self.current_group();
        let uri = join_uri(group.prefix.as_deref(), uri);
        self.routes
            .push(RouteEntry::new(methods, uri, action, &group));
        let last = self.routes.len() - 1;
        &mut self.routes[last]
    }
}

impl Router for RouteTable {
    type Route = RouteEntry;

    fn group(&mut self, options: &GroupOptions, routes: &mut dyn FnMut(&mut Self)) {
        self.groups.push(options.clone());
        routes(self);
        self.groups.pop();
    }

    fn add_route(&mut self, methods: &[HttpMethod], uri: &str, action: Action) -> &mut RouteEntry {
        tracing::trace!(uri, ?methods, action = %action, "Adding route");
        self.push(methods, uri, action)
    }

    fn resource(&mut self, resource: PendingResource) {
        for route in resource::expand(&resource) {
            let action = Action::Method {
                controller: resource.controller.clone(),
                method: route.action.to_string(),
            };
            self.push(&route.methods, &route.uri, action)
                .name(Some(&route.name))
                .middleware(resource.middleware.clone());
        }
    }
}

/// Join a group prefix and a route URI into the stored form.
fn join_uri(prefix: Option<&str>, uri: &str) -> String {
    let parts: Vec<&str> = prefix
        .into_iter()
        .chain(std::iter::once(uri))
        .map(|p| p.trim_matches('/'))
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() {
        "/".to_string()
    } else {
        parts.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(method: &str) -> Action {
        Action::Method {
            controller: "app::Users".into(),
            method: method.into(),
        }
    }

    #[test]
    fn joins_uris() {
        assert_eq!(join_uri(None, "/"), "/");
        assert_eq!(join_uri(None, "/users/"), "users");
        assert_eq!(join_uri(Some("admin/"), "/users"), "admin/users");
        assert_eq!(join_uri(Some("admin"), ""), "admin");
    }

    #[test]
    fn nested_groups_merge_options() {
        let mut table = RouteTable::new();
        let outer = GroupOptions::new()
            .prefix("api")
            .domain("example.com")
            .as_name("api.");
        let inner = GroupOptions::new()
            .prefix("v1")
            .domain("v1.example.com")
            .as_name("v1.");

        table.group(&outer, &mut |router| {
            router.group(&inner, &mut |router| {
                router
                    .add_route(&[HttpMethod::Get], "users", action("index"))
                    .name(Some("users"));
            });
            router.add_route(&[HttpMethod::Get], "/", action("home"));
        });

        let users = table.by_name("api.v1.users").unwrap();
        assert_eq!(users.uri, "api/v1/users");
        assert_eq!(users.domain.as_deref(), Some("v1.example.com"));

        let home = table.find(HttpMethod::Get, "api").unwrap();
        assert_eq!(home.domain.as_deref(), Some("example.com"));
        assert_eq!(home.name, None);
    }

    #[test]
    fn group_options_do_not_leak() {
        let mut table = RouteTable::new();
        table.group(&GroupOptions::new().prefix("admin"), &mut |router| {
            router.add_route(&[HttpMethod::Get], "a", action("a"));
        });
        table.add_route(&[HttpMethod::Get], "b", action("b"));

        assert_eq!(table.routes()[0].uri, "admin/a");
        assert_eq!(table.routes()[1].uri, "b");
    }

    #[test]
    fn middleware_appends() {
        let mut table = RouteTable::new();
        table
            .add_route(&[HttpMethod::Post], "x", action("x"))
            .middleware(vec!["a".into()])
            .middleware(vec!["a".into(), "b".into()]);
        assert_eq!(table.routes()[0].middleware, vec!["a", "a", "b"]);
    }

    #[test]
    fn resource_routes_get_names_and_middleware() {
        let mut table = RouteTable::new();
        table.group(&GroupOptions::new().prefix("admin"), &mut |router| {
            router.resource(
                PendingResource::api("photos", "app::Photos").middleware(vec!["auth".into()]),
            );
        });

        assert_eq!(table.len(), 5);
        let show = table.by_name("photos.show").unwrap();
        assert_eq!(show.uri, "admin/photos/{photo}");
        assert_eq!(show.middleware, vec!["auth"]);
        assert_eq!(show.action.method(), Some("show"));
    }
}
