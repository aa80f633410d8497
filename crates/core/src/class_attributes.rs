//! Controller-level metadata aggregation.
//!
//! [`ClassRouteAttributes`] reads the attributes attached to a controller
//! and exposes them as the defaults the registrar merges into every route.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::attributes::{Attribute, Resource};
use crate::controller::ControllerDescriptor;

/// Options for one router group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupOptions {
    pub prefix: Option<String>,
    pub domain: Option<String>,
    /// Route name prefix.
    pub as_name: Option<String>,
}

impl GroupOptions {
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

/// Read-only view over a controller's class-level attributes.
pub struct ClassRouteAttributes<'a> {
    controller: &'a ControllerDescriptor,
    domains: &'a BTreeMap<String, String>,
}

impl<'a> ClassRouteAttributes<'a> {
    /// `domains` resolves `DomainFromConfig` keys.
    pub fn new(
        controller: &'a ControllerDescriptor,
        domains: &'a BTreeMap<String, String>,
    ) -> Self {
        Self {
            controller,
            domains,
        }
    }

    fn find<T>(&self, pick: impl Fn(&'a Attribute) -> Option<T>) -> Option<T> {
        self.controller.attributes.iter().find_map(pick)
    }

    pub fn prefix(&self) -> Option<&'a str> {
        self.find(|a| match a {
            Attribute::Prefix(p) => Some(p.prefix.as_str()),
            _ => None,
        })
    }

    pub fn domain(&self) -> Option<&'a str> {
        self.find(|a| match a {
            Attribute::Domain(d) => Some(d.domain.as_str()),
            _ => None,
        })
    }

    /// Domain resolved through the configured domain map, if the controller
    /// asks for one and the key exists.
    pub fn domain_from_config(&self) -> Option<&'a str> {
        let key = self.find(|a| match a {
            Attribute::DomainFromConfig(d) => Some(d.key.as_str()),
            _ => None,
        })?;
        self.domains.get(key).map(String::as_str)
    }

    /// Group option sets the controller's routes are registered under.
    ///
    /// Explicit `Group` attributes yield one set each. Without them there is
    /// exactly one set built from `Prefix` and `Domain`/`DomainFromConfig`.
    pub fn groups(&self) -> Vec<GroupOptions> {
        let groups: Vec<GroupOptions> = self
            .controller
            .attributes
            .iter()
            .filter_map(|a| match a {
                Attribute::Group(g) => Some(GroupOptions {
                    prefix: g.prefix.clone(),
                    domain: g.domain.clone(),
                    as_name: g.as_name.clone(),
                }),
                _ => None,
            })
            .collect();

        if !groups.is_empty() {
            return groups;
        }

        vec![GroupOptions {
            prefix: self.prefix().map(str::to_string),
            domain: self
                .domain_from_config()
                .or_else(|| self.domain())
                .map(str::to_string),
            as_name: None,
        }]
    }

    fn resource_attribute(&self) -> Option<&'a Resource> {
        self.find(|a| match a {
            Attribute::Resource(r) => Some(r),
            _ => None,
        })
    }

    pub fn resource(&self) -> Option<&'a str> {
        self.resource_attribute().map(|r| r.resource.as_str())
    }

    pub fn api_resource(&self) -> bool {
        self.resource_attribute().is_some_and(|r| r.api_resource)
    }

    pub fn only(&self) -> Option<Vec<String>> {
        self.resource_attribute().and_then(|r| r.only.clone())
    }

    pub fn except(&self) -> Option<Vec<String>> {
        self.resource_attribute().and_then(|r| r.except.clone())
    }

    pub fn names(&self) -> Option<BTreeMap<String, String>> {
        self.resource_attribute().and_then(|r| r.names.clone())
    }

    pub fn parameters(&self) -> Option<BTreeMap<String, String>> {
        self.resource_attribute().and_then(|r| r.parameters.clone())
    }

    pub fn shallow(&self) -> Option<bool> {
        self.resource_attribute().and_then(|r| r.shallow)
    }

    /// Class-level middleware in declaration order.
    pub fn middleware(&self) -> Vec<String> {
        self.controller
            .attributes
            .iter()
            .filter_map(|a| match a {
                Attribute::Middleware(m) => Some(m.middleware.iter().cloned()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// Class-level parameter constraints. Later declarations win.
    pub fn wheres(&self) -> BTreeMap<String, String> {
        self.controller
            .attributes
            .wheres()
            .map(|w| (w.param().to_string(), w.constraint()))
            .collect()
    }

    /// Class-level default values. Later declarations win.
    pub fn defaults(&self) -> BTreeMap<String, String> {
        self.controller
            .attributes
            .defaults()
            .map(|d| (d.key.clone(), d.value.clone()))
            .collect()
    }

    /// `None` when the controller does not say; the registrar then uses the
    /// configured default.
    pub fn scope_bindings(&self) -> Option<bool> {
        self.controller
            .attributes
            .scope_bindings()
            .map(|s| s.scope_bindings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{
        Defaults, Domain, DomainFromConfig, Group, Middleware, Prefix, ScopeBindings, Where,
        WhereNumber,
    };

    fn no_domains() -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    #[test]
    fn single_group_from_prefix_and_domain() {
        let c = ControllerDescriptor::new("app", "Admin")
            .attribute(Prefix::new("admin"))
            .attribute(Domain::new("admin.example.com"));
        let domains = no_domains();
        let attrs = ClassRouteAttributes::new(&c, &domains);

        assert_eq!(
            attrs.groups(),
            vec![GroupOptions::new()
                .prefix("admin")
                .domain("admin.example.com")]
        );
    }

    #[test]
    fn undecorated_controller_has_one_empty_group() {
        let c = ControllerDescriptor::new("app", "Plain");
        let domains = no_domains();
        let attrs = ClassRouteAttributes::new(&c, &domains);
        assert_eq!(attrs.groups(), vec![GroupOptions::default()]);
    }

    #[test]
    fn explicit_groups_replace_prefix() {
        let c = ControllerDescriptor::new("app", "Multi")
            .attribute(Prefix::new("ignored"))
            .attribute(Group::new().prefix("v1").as_name("v1."))
            .attribute(Group::new().prefix("v2").domain("api.example.com"));
        let domains = no_domains();
        let attrs = ClassRouteAttributes::new(&c, &domains);

        let groups = attrs.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].prefix.as_deref(), Some("v1"));
        assert_eq!(groups[0].as_name.as_deref(), Some("v1."));
        assert_eq!(groups[1].domain.as_deref(), Some("api.example.com"));
    }

    #[test]
    fn domain_from_config_wins_over_domain() {
        let c = ControllerDescriptor::new("app", "Tenant")
            .attribute(Domain::new("fallback.example.com"))
            .attribute(DomainFromConfig::new("tenant"));
        let mut domains = BTreeMap::new();
        domains.insert("tenant".to_string(), "tenant.example.com".to_string());
        let attrs = ClassRouteAttributes::new(&c, &domains);

        assert_eq!(
            attrs.groups()[0].domain.as_deref(),
            Some("tenant.example.com")
        );
    }

    #[test]
    fn unresolved_config_domain_falls_back() {
        let c = ControllerDescriptor::new("app", "Tenant")
            .attribute(Domain::new("fallback.example.com"))
            .attribute(DomainFromConfig::new("missing"));
        let domains = no_domains();
        let attrs = ClassRouteAttributes::new(&c, &domains);

        assert_eq!(
            attrs.groups()[0].domain.as_deref(),
            Some("fallback.example.com")
        );
    }

    #[test]
    fn middleware_concatenates_in_order() {
        let c = ControllerDescriptor::new("app", "Mw")
            .attribute(Middleware::new(["web", "auth"]))
            .attribute(Middleware::new(["auth"]));
        let domains = no_domains();
        let attrs = ClassRouteAttributes::new(&c, &domains);
        assert_eq!(attrs.middleware(), vec!["web", "auth", "auth"]);
    }

    #[test]
    fn wheres_and_defaults_collect_into_maps() {
        let c = ControllerDescriptor::new("app", "Maps")
            .attribute(WhereNumber::new("id"))
            .attribute(Where::new("id", "[0-9]{2}"))
            .attribute(Defaults::new("locale", "en"));
        let domains = no_domains();
        let attrs = ClassRouteAttributes::new(&c, &domains);

        assert_eq!(attrs.wheres().get("id").map(String::as_str), Some("[0-9]{2}"));
        assert_eq!(attrs.defaults().get("locale").map(String::as_str), Some("en"));
    }

    #[test]
    fn missing_metadata_is_empty() {
        let c = ControllerDescriptor::new("app", "Empty");
        let domains = no_domains();
        let attrs = ClassRouteAttributes::new(&c, &domains);

        assert!(attrs.middleware().is_empty());
        assert!(attrs.wheres().is_empty());
        assert!(attrs.defaults().is_empty());
        assert_eq!(attrs.resource(), None);
        assert!(!attrs.api_resource());
        assert_eq!(attrs.scope_bindings(), None);
    }

    #[test]
    fn resource_options_are_exposed() {
        let c = ControllerDescriptor::new("app", "Photos").attribute(
            Resource::api("photos")
                .except(["destroy"])
                .names([("index", "photos.list")])
                .shallow(true),
        );
        let domains = no_domains();
        let attrs = ClassRouteAttributes::new(&c, &domains);

        assert_eq!(attrs.resource(), Some("photos"));
        assert!(attrs.api_resource());
        assert_eq!(attrs.only(), None);
        assert_eq!(attrs.except(), Some(vec!["destroy".to_string()]));
        assert_eq!(
            attrs.names().unwrap().get("index").map(String::as_str),
            Some("photos.list")
        );
        assert_eq!(attrs.shallow(), Some(true));
    }

    #[test]
    fn scope_bindings_reads_first_attribute() {
        let c = ControllerDescriptor::new("app", "Scoped")
            .attribute(ScopeBindings::new())
            .attribute(ScopeBindings::disabled());
        let domains = no_domains();
        let attrs = ClassRouteAttributes::new(&c, &domains);
        assert_eq!(attrs.scope_bindings(), Some(true));
    }
}
