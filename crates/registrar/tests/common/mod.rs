#![allow(dead_code)]

use std::collections::BTreeMap;

use routemark_core::{Action, ControllerDescriptor, GroupOptions, HttpMethod};
use routemark_registrar::{
    ControllerCatalog, PendingResource, RouteHandle, RouteRegistrar, RouteTable, Router,
};

/// Register every controller in `controllers` against a fresh [`RouteTable`].
pub fn register_all(controllers: Vec<ControllerDescriptor>) -> RouteTable {
    register_with(controllers, |_| {})
}

/// Like [`register_all`], letting the caller configure the registrar first.
pub fn register_with<F>(controllers: Vec<ControllerDescriptor>, configure: F) -> RouteTable
where
    F: FnOnce(&mut RouteRegistrar<'_, RouteTable>),
{
    let catalog: ControllerCatalog = controllers.into_iter().collect();
    let mut table = RouteTable::new();
    {
        let mut registrar = RouteRegistrar::new(&mut table, &catalog);
        configure(&mut registrar);
        registrar.register_catalog();
    }
    table
}

pub fn method_action(controller: &str, method: &str) -> Action {
    Action::Method {
        controller: controller.to_string(),
        method: method.to_string(),
    }
}

/// One call observed by [`RecordingRouter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GroupStart(GroupOptions),
    GroupEnd,
    AddRoute {
        methods: Vec<HttpMethod>,
        uri: String,
        action: Action,
    },
    Resource(PendingResource),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordedRoute {
    pub name: Option<String>,
    pub middleware: Vec<String>,
    pub wheres: BTreeMap<String, String>,
    pub defaults: BTreeMap<String, String>,
    pub scope_bindings: bool,
    pub fallback: bool,
}

impl RouteHandle for RecordedRoute {
    fn name(&mut self, name: Option<&str>) -> &mut Self {
        self.name = name.map(str::to_string);
        self
    }

    fn middleware(&mut self, middleware: Vec<String>) -> &mut Self {
        self.middleware.extend(middleware);
        self
    }

    fn set_wheres(&mut self, wheres: BTreeMap<String, String>) -> &mut Self {
        self.wheres = wheres;
        self
    }

    fn set_defaults(&mut self, defaults: BTreeMap<String, String>) -> &mut Self {
        self.defaults = defaults;
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

/// Fake router that records the exact call sequence.
#[derive(Debug, Default)]
pub struct RecordingRouter {
    pub calls: Vec<Call>,
    pub routes: Vec<RecordedRoute>,
}

impl Router for RecordingRouter {
    type Route = RecordedRoute;

    fn group(&mut self, options: &GroupOptions, routes: &mut dyn FnMut(&mut Self)) {
        self.calls.push(Call::GroupStart(options.clone()));
        routes(self);
        self.calls.push(Call::GroupEnd);
    }

    fn add_route(&mut self, methods: &[HttpMethod], uri: &str, action: Action) -> &mut RecordedRoute {
        self.calls.push(Call::AddRoute {
            methods: methods.to_vec(),
            uri: uri.to_string(),
            action,
        });
        self.routes.push(RecordedRoute::default());
        let last = self.routes.len() - 1;
        &mut self.routes[last]
    }

    fn resource(&mut self, resource: PendingResource) {
        self.calls.push(Call::Resource(resource));
    }
}

pub fn record(controllers: Vec<ControllerDescriptor>) -> RecordingRouter {
    let catalog: ControllerCatalog = controllers.into_iter().collect();
    let mut router = RecordingRouter::default();
    RouteRegistrar::new(&mut router, &catalog).register_catalog();
    router
}
