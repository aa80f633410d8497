//! Route registrar: controller metadata → router calls.
//!
//! For every controller the registrar builds a [`ClassRouteAttributes`],
//! then either registers a resource (and stops) or opens one router group
//! per class-level group and registers the routes declared on the
//! controller itself and on each of its methods.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use routemark_core::{
    Action, AttributeSet, ClassRouteAttributes, ControllerDescriptor, GroupOptions,
    MethodDescriptor,
};

use crate::catalog::ControllerCatalog;
use crate::config::RegistrarConfig;
use crate::error::RegistrarResult;
use crate::router::{PendingResource, RouteHandle, Router};
use crate::scan;

/// Configuration threaded through every registration.
#[derive(Debug, Clone, Default)]
struct Settings {
    config: RegistrarConfig,
}

/// The member of a controller a set of attributes is attached to.
#[derive(Clone, Copy)]
enum Member<'a> {
    Controller,
    Method(&'a MethodDescriptor),
}

impl<'a> Member<'a> {
    fn attributes(self, controller: &'a ControllerDescriptor) -> &'a AttributeSet {
        match self {
            Member::Controller => &controller.attributes,
            Member::Method(method) => &method.attributes,
        }
    }

    /// Invokable controllers dispatch to the controller itself.
    fn action(self, controller: &ControllerDescriptor) -> Action {
        match self {
            Member::Method(method) if !method.is_invoke() => Action::Method {
                controller: controller.name.clone(),
                method: method.name.clone(),
            },
            _ => Action::Controller(controller.name.clone()),
        }
    }

    fn label(self) -> &'a str {
        match self {
            Member::Controller => "<controller>",
            Member::Method(method) => &method.name,
        }
    }
}

/// Registers attribute-declared routes with a [`Router`].
pub struct RouteRegistrar<'a, R: Router> {
    router: &'a mut R,
    catalog: &'a ControllerCatalog,
    settings: Settings,
}

impl<'a, R: Router> RouteRegistrar<'a, R> {
    pub fn new(router: &'a mut R, catalog: &'a ControllerCatalog) -> Self {
        Self {
            router,
            catalog,
            settings: Settings::default(),
        }
    }

    /// Registrar preconfigured from `config` (base path, namespace,
    /// extension, global middleware, scope-bindings default, domains).
    pub fn with_config(
        router: &'a mut R,
        catalog: &'a ControllerCatalog,
        config: &RegistrarConfig,
    ) -> Self {
        Self {
            router,
            catalog,
            settings: Settings {
                config: config.clone(),
            },
        }
    }

    pub fn use_base_path(&mut self, base_path: impl Into<PathBuf>) -> &mut Self {
        self.settings.config.base_path = base_path.into();
        self
    }

    pub fn use_root_namespace(&mut self, root_namespace: &str) -> &mut Self {
        self.settings.config.root_namespace =
            root_namespace.trim_end_matches("::").to_string();
        self
    }

    pub fn use_extension(&mut self, extension: &str) -> &mut Self {
        self.settings.config.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Replace the middleware prepended to every route.
    pub fn use_middleware<I, S>(&mut self, middleware: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings.config.middleware = middleware.into_iter().map(Into::into).collect();
        self
    }

    pub fn use_scope_bindings(&mut self, scope_bindings: bool) -> &mut Self {
        self.settings.config.scope_bindings = scope_bindings;
        self
    }

    pub fn use_domains(&mut self, domains: BTreeMap<String, String>) -> &mut Self {
        self.settings.config.domains = domains;
        self
    }

    pub fn middleware(&self) -> &[String] {
        &self.settings.config.middleware
    }

    /// Run `routes` inside a router group. The nested registrar shares this
    /// one's catalog and settings.
    pub fn group<F>(&mut self, options: &GroupOptions, routes: F) -> RegistrarResult<()>
    where
        F: FnOnce(&mut RouteRegistrar<'_, R>) -> RegistrarResult<()>,
    {
        let mut routes = Some(routes);
        let mut result = Ok(());
        let catalog = self.catalog;
        let settings = &self.settings;

        self.router.group(options, &mut |router| {
            if let Some(routes) = routes.take() {
                let mut nested = RouteRegistrar {
                    router,
                    catalog,
                    settings: settings.clone(),
                };
                result = routes(&mut nested);
            }
        });

        result
    }

    /// Scan `directories` and register every controller declared in the
    /// source files found there.
    pub fn register_directory<P: AsRef<Path>>(&mut self, directories: &[P]) -> RegistrarResult<()> {
        let mut files = Vec::new();
        for dir in directories {
            files.extend(scan::source_files(dir.as_ref(), &self.settings.config.extension)?);
        }
        files.sort();

        tracing::info!(files = files.len(), "Scanning source files for controllers");
        for file in &files {
            self.register_file(file);
        }
        Ok(())
    }

    /// Register the controllers declared in the module `path` maps to.
    pub fn register_file(&mut self, path: impl AsRef<Path>) {
        let module = scan::module_path(
            path.as_ref(),
            &self.settings.config.base_path,
            &self.settings.config.root_namespace,
        );

        let catalog = self.catalog;
        let mut found = false;
        for controller in catalog.in_module(&module) {
            found = true;
            self.process_controller(controller);
        }

        if !found {
            tracing::debug!(
                file = %path.as_ref().display(),
                module = %module,
                "No controllers declared in module, skipping"
            );
        }
    }

    /// Register a controller by its fully qualified name. Unknown names are
    /// skipped.
    pub fn register_class(&mut self, name: &str) {
        let catalog = self.catalog;
        match catalog.get(name) {
            Some(controller) => self.process_controller(controller),
            None => tracing::debug!(controller = name, "Unknown controller, skipping"),
        }
    }

    pub fn register_controller(&mut self, controller: &ControllerDescriptor) {
        self.process_controller(controller);
    }

    /// Register every controller in the catalog, in catalog order.
    pub fn register_catalog(&mut self) {
        let catalog = self.catalog;
        for controller in catalog.iter() {
            self.process_controller(controller);
        }
    }

    fn process_controller(&mut self, controller: &ControllerDescriptor) {
        let class = ClassRouteAttributes::new(controller, &self.settings.config.domains);

        if let Some(resource) = class.resource() {
            self.settings
                .register_resource(self.router, controller, &class, resource);
            return;
        }

        let settings = &self.settings;
        for group in class.groups() {
            self.router.group(&group, &mut |router| {
                settings.register_routes(router, controller, &class);
            });
        }

        tracing::debug!(controller = %controller.name, "Registered controller routes");
    }
}

impl Settings {
    /// Resource controllers get one `{domain, prefix}` group holding the
    /// expanded resource; their methods' route attributes are not read.
    fn register_resource<R: Router>(
        &self,
        router: &mut R,
        controller: &ControllerDescriptor,
        class: &ClassRouteAttributes<'_>,
        resource: &str,
    ) {
        let group = GroupOptions {
            prefix: class.prefix().map(str::to_string),
            domain: class
                .domain_from_config()
                .or_else(|| class.domain())
                .map(str::to_string),
            as_name: None,
        };

        let mut pending = if class.api_resource() {
            PendingResource::api(resource, controller.name.clone())
        } else {
            PendingResource::new(resource, controller.name.clone())
        };
        if let Some(only) = class.only() {
            pending = pending.only(only);
        }
        if let Some(except) = class.except() {
            pending = pending.except(except);
        }
        if let Some(names) = class.names() {
            pending = pending.names(names);
        }
        if let Some(parameters) = class.parameters() {
            pending = pending.parameters(parameters);
        }
        if let Some(shallow) = class.shallow() {
            pending = pending.shallow(shallow);
        }
        pending = pending.middleware(
            self.config
                .middleware
                .iter()
                .cloned()
                .chain(class.middleware())
                .collect(),
        );

        let mut pending = Some(pending);
        router.group(&group, &mut |router| {
            if let Some(pending) = pending.take() {
                router.resource(pending);
            }
        });

        tracing::debug!(
            controller = %controller.name,
            resource,
            api = class.api_resource(),
            "Registered resource routes"
        );
    }

    /// Routes declared on the controller itself, then on each method.
    fn register_routes<R: Router>(
        &self,
        router: &mut R,
        controller: &ControllerDescriptor,
        class: &ClassRouteAttributes<'_>,
    ) {
        self.register_member(router, controller, class, Member::Controller);
        for method in &controller.methods {
            self.register_member(router, controller, class, Member::Method(method));
        }
    }

    fn register_member<'c, R: Router>(
        &self,
        router: &mut R,
        controller: &'c ControllerDescriptor,
        class: &ClassRouteAttributes<'_>,
        member: Member<'c>,
    ) {
        let attributes = member.attributes(controller);

        let mut wheres = class.wheres();
        wheres.extend(
            attributes
                .wheres()
                .map(|w| (w.param().to_string(), w.constraint())),
        );

        let mut defaults = class.defaults();
        defaults.extend(
            attributes
                .defaults()
                .map(|d| (d.key.clone(), d.value.clone())),
        );

        let scope_bindings = match attributes.scope_bindings() {
            Some(attribute) => attribute.scope_bindings,
            None => class.scope_bindings().unwrap_or(self.config.scope_bindings),
        };
        let is_fallback = attributes.fallbacks().next().is_some();
        let class_middleware = class.middleware();

        for attribute in attributes.routes() {
            let definition = match attribute.instantiate() {
                Ok(definition) => definition,
                Err(e) => {
                    tracing::warn!(
                        controller = %controller.name,
                        member = member.label(),
                        error = %e,
                        "Skipping malformed route attribute"
                    );
                    continue;
                }
            };

            let action = member.action(controller);
            let middleware: Vec<String> = self
                .config
                .middleware
                .iter()
                .chain(&class_middleware)
                .chain(&definition.middleware)
                .cloned()
                .collect();

            let route = router.add_route(&definition.methods, &definition.uri, action);
            route.name(definition.name.as_deref());
            if scope_bindings {
                route.scope_bindings();
            }
            if !wheres.is_empty() {
                route.set_wheres(wheres.clone());
            }
            if !defaults.is_empty() {
                route.set_defaults(defaults.clone());
            }
            route.middleware(middleware);
            if is_fallback {
                route.fallback();
            }

            tracing::debug!(
                controller = %controller.name,
                member = member.label(),
                uri = %definition.uri,
                name = ?definition.name,
                "Registered route"
            );
        }
    }
}
