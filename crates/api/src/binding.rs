//! Binding a [`RouteTable`] to an [`axum::Router`].
//!
//! The registrar only records *what* a route dispatches to ([`Action`]) and
//! which middleware names it carries. [`AxumBinding`] maps actions to axum
//! handlers and middleware names to method-router layers, then installs
//! every recorded route:
//!
//! - parameter constraints are checked against the matched path parameters
//!   (404 on mismatch),
//! - defaults are exposed to handlers as a [`RouteDefaults`] extension,
//! - a route's domain is matched against the `Host` header (404 on mismatch);
//!   routes on the same path and verbs with different domains share one
//!   method router that picks a route by host,
//! - fallback routes become the router's fallback.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::extract::{Path, Request, State};
use axum::handler::Handler;
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{on, MethodFilter, MethodRouter};
use axum::{Extension, Router};
use regex::Regex;
use routemark_core::{Action, HttpMethod};
use routemark_registrar::{RouteEntry, RouteTable};

use crate::error::ApiError;

type HandlerFactory<S> = Arc<dyn Fn(MethodFilter) -> MethodRouter<S> + Send + Sync>;
type MiddlewareFn<S> = Arc<dyn Fn(MethodRouter<S>) -> MethodRouter<S> + Send + Sync>;

/// Default values declared for the matched route.
///
/// ```ignore
/// async fn show(Extension(defaults): Extension<RouteDefaults>) -> String {
///     defaults.get("format").unwrap_or("html").to_string()
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteDefaults(pub BTreeMap<String, String>);

impl RouteDefaults {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

/// Handlers and middleware available to routes, keyed the way the
/// registrar names them.
pub struct AxumBinding<S = ()> {
    handlers: HashMap<Action, HandlerFactory<S>>,
    middleware: HashMap<String, MiddlewareFn<S>>,
}

impl<S> Default for AxumBinding<S> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
            middleware: HashMap::new(),
        }
    }
}

impl<S> AxumBinding<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch `action` to `handler`.
    pub fn handler<H, T>(mut self, action: Action, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        let factory: HandlerFactory<S> = Arc::new(move |filter| on(filter, handler.clone()));
        self.handlers.insert(action, factory);
        self
    }

    /// Dispatch `controller@method` to `handler`.
    pub fn method<H, T>(self, controller: &str, method: &str, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.handler(
            Action::Method {
                controller: controller.to_string(),
                method: method.to_string(),
            },
            handler,
        )
    }

    /// Dispatch the single-action `controller` to `handler`.
    pub fn invokable<H, T>(self, controller: &str, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.handler(Action::Controller(controller.to_string()), handler)
    }

    /// Register middleware under `name`. `apply` wraps a route's method
    /// router, typically with `route.layer(...)`.
    pub fn middleware<F>(mut self, name: impl Into<String>, apply: F) -> Self
    where
        F: Fn(MethodRouter<S>) -> MethodRouter<S> + Send + Sync + 'static,
    {
        self.middleware.insert(name.into(), Arc::new(apply));
        self
    }

    pub fn has_handler(&self, action: &Action) -> bool {
        self.handlers.contains_key(action)
    }

    /// Install every route of `table`.
    ///
    /// Fails on routes whose action has no handler, unknown middleware
    /// names, invalid constraints, paths axum cannot parse and on routes
    /// axum would reject as overlapping. Routes that share a path and verbs
    /// but declare different domains are merged and picked by `Host`.
    pub fn build(&self, table: &RouteTable) -> Result<Router<S>, ApiError> {
        let mut slots: Vec<PathSlot<S>> = Vec::new();
        let mut by_shape: HashMap<String, usize> = HashMap::new();
        let mut fallback: Option<&RouteEntry> = None;

        for route in table.routes() {
            if route.fallback {
                if fallback.is_some() {
                    return Err(ApiError::Conflict {
                        method: route.methods.first().copied().unwrap_or(HttpMethod::Get),
                        uri: "<fallback>".to_string(),
                    });
                }
                fallback = Some(route);
                continue;
            }

            let path = axum_path(&route.uri);
            check_path(&path).map_err(|reason| ApiError::InvalidPath {
                uri: route.uri.clone(),
                reason,
            })?;

            let index = *by_shape.entry(path_shape(&path)).or_insert_with(|| {
                slots.push(PathSlot {
                    path: path.clone(),
                    groups: Vec::new(),
                });
                slots.len() - 1
            });
            let slot = &mut slots[index];
            let conflict = |method: Option<&HttpMethod>| ApiError::Conflict {
                method: method
                    .or(route.methods.first())
                    .copied()
                    .unwrap_or(HttpMethod::Get),
                uri: route.uri.clone(),
            };
            if slot.path != path {
                return Err(conflict(None));
            }

            let method_router = self.method_router(route)?;
            let overlapping = slot
                .groups
                .iter_mut()
                .find(|group| route.methods.iter().any(|m| group.methods.contains(m)));
            match overlapping {
                None => slot.groups.push(HostGroup {
                    methods: route.methods.clone(),
                    candidates: vec![(route.domain.clone(), method_router)],
                }),
                Some(group) => {
                    let same_methods = group.methods.len() == route.methods.len()
                        && route.methods.iter().all(|m| group.methods.contains(m));
                    let same_domain = group
                        .candidates
                        .iter()
                        .any(|(domain, _)| *domain == route.domain);
                    if !same_methods || same_domain {
                        let method = route.methods.iter().find(|m| group.methods.contains(*m));
                        return Err(conflict(method));
                    }
                    group.candidates.push((route.domain.clone(), method_router));
                }
            }
            tracing::debug!(path = %path, action = %route.action, "Bound route");
        }

        let mut router = Router::new();
        for slot in slots {
            for group in slot.groups {
                router = router.route(&slot.path, group.into_method_router()?);
            }
        }

        if let Some(route) = fallback {
            let mut method_router = self.method_router(route)?;
            if let Some(domain) = &route.domain {
                method_router = restrict_to_domain(method_router, domain)?;
            }
            router = router.fallback(method_router);
            tracing::debug!(action = %route.action, "Bound fallback route");
        }

        Ok(router)
    }

    fn method_router(&self, route: &RouteEntry) -> Result<MethodRouter<S>, ApiError> {
        let factory = self
            .handlers
            .get(&route.action)
            .ok_or_else(|| ApiError::MissingHandler(route.action.clone()))?;
        let mut method_router = factory(method_filter(&route.methods));

        // The first middleware listed is the outermost one.
        for name in route.middleware.iter().rev() {
            let apply = self
                .middleware
                .get(name)
                .ok_or_else(|| ApiError::UnknownMiddleware {
                    name: name.clone(),
                    uri: route.uri.clone(),
                })?;
            method_router = apply(method_router);
        }

        if !route.fallback {
            if let Some(constraints) = Constraints::compile(route)? {
                method_router = method_router.route_layer(middleware::from_fn_with_state(
                    Arc::new(constraints),
                    enforce_constraints,
                ));
            }
        }

        Ok(method_router.layer(Extension(RouteDefaults(route.defaults.clone()))))
    }
}

/// Routes recorded for one axum path.
struct PathSlot<S> {
    path: String,
    groups: Vec<HostGroup<S>>,
}

/// Routes sharing a path and verb set, at most one per domain. `None` is
/// the route without a domain.
struct HostGroup<S> {
    methods: Vec<HttpMethod>,
    candidates: Vec<(Option<String>, MethodRouter<S>)>,
}

impl<S> HostGroup<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn into_method_router(self) -> Result<MethodRouter<S>, ApiError> {
        let mut candidates = self.candidates;
        if candidates.len() == 1 {
            let (domain, method_router) = candidates.remove(0);
            return match domain {
                Some(domain) => restrict_to_domain(method_router, &domain),
                None => Ok(method_router),
            };
        }

        let mut compiled = candidates
            .into_iter()
            .map(|(domain, method_router)| -> Result<_, ApiError> {
                Ok((domain.as_deref().map(domain_pattern).transpose()?, method_router))
            })
            .collect::<Result<Vec<_>, _>>()?;
        // Domain routes are tried first, the route without one last.
        compiled.sort_by_key(|(domain, _)| domain.is_none());

        Ok(dispatch_by_host(&self.methods, compiled))
    }
}

/// One method router answering `methods` that hands each request to the
/// first candidate whose domain matches the `Host` header.
fn dispatch_by_host<S>(
    methods: &[HttpMethod],
    candidates: Vec<(Option<Regex>, MethodRouter<S>)>,
) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    let candidates = Arc::new(candidates);
    on(
        method_filter(methods),
        move |State(state): State<S>, request: Request| {
            let candidates = Arc::clone(&candidates);
            async move {
                let host = request_host(&request).map(|host| strip_port(host).to_string());
                let target = candidates.iter().find(|(domain, _)| match domain {
                    Some(domain) => host.as_deref().is_some_and(|host| domain.is_match(host)),
                    None => true,
                });
                match target {
                    Some((_, method_router)) => {
                        Handler::<(), S>::call(method_router.clone(), request, state).await
                    }
                    None => StatusCode::NOT_FOUND.into_response(),
                }
            }
        },
    )
}

fn restrict_to_domain<S>(
    method_router: MethodRouter<S>,
    domain: &str,
) -> Result<MethodRouter<S>, ApiError>
where
    S: Clone + Send + Sync + 'static,
{
    Ok(method_router.route_layer(middleware::from_fn_with_state(
        Arc::new(domain_pattern(domain)?),
        enforce_domain,
    )))
}

fn method_filter(methods: &[HttpMethod]) -> MethodFilter {
    methods
        .iter()
        .map(|method| match method {
            HttpMethod::Get => MethodFilter::GET,
            HttpMethod::Head => MethodFilter::HEAD,
            HttpMethod::Post => MethodFilter::POST,
            HttpMethod::Put => MethodFilter::PUT,
            HttpMethod::Patch => MethodFilter::PATCH,
            HttpMethod::Delete => MethodFilter::DELETE,
            HttpMethod::Options => MethodFilter::OPTIONS,
        })
        .reduce(MethodFilter::or)
        .unwrap_or(MethodFilter::GET)
}

/// Table URIs have no leading slash; axum paths do.
fn axum_path(uri: &str) -> String {
    if uri == "/" {
        uri.to_string()
    } else {
        format!("/{uri}")
    }
}

/// Reject paths the axum router would panic on.
fn check_path(path: &str) -> Result<(), &'static str> {
    let mut segments = path.split('/').peekable();
    while let Some(segment) = segments.next() {
        if segment.starts_with(':') {
            return Err("segments must not start with `:`, parameters are written `{name}`");
        }

        let mut rest = segment;
        while let Some(start) = rest.find('{') {
            if rest[..start].contains('}') {
                return Err("unbalanced parameter braces");
            }
            let Some(len) = rest[start..].find('}') else {
                return Err("unbalanced parameter braces");
            };
            let name = &rest[start + 1..start + len];
            let catch_all = name.starts_with('*');
            if name.strip_prefix('*').unwrap_or(name).is_empty() {
                return Err("parameters must have a name");
            }
            if catch_all && (start != 0 || start + len + 1 != rest.len()) {
                return Err("a catch-all parameter must span a whole segment");
            }
            if catch_all && segments.peek().is_some() {
                return Err("a catch-all parameter must be the last segment");
            }
            rest = &rest[start + len + 1..];
        }
        if rest.contains('}') {
            return Err("unbalanced parameter braces");
        }
    }
    Ok(())
}

/// `path` with parameter names erased. Two paths with the same shape but
/// different parameter names cannot coexist in the axum router.
fn path_shape(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if segment.starts_with("{*") {
                "{*}"
            } else if segment.starts_with('{') && segment.ends_with('}') {
                "{}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Regex matching a host against a domain such as `{account}.example.com`.
fn domain_pattern(domain: &str) -> Result<Regex, ApiError> {
    let mut pattern = String::from("^(?i)");
    let mut rest = domain;
    while let Some(start) = rest.find('{') {
        pattern.push_str(&regex::escape(&rest[..start]));
        match rest[start..].find('}') {
            Some(end) => {
                pattern.push_str("[^.]+");
                rest = &rest[start + end + 1..];
            }
            None => {
                rest = &rest[start..];
                break;
            }
        }
    }
    pattern.push_str(&regex::escape(rest));
    pattern.push('$');

    Regex::new(&pattern).map_err(|source| ApiError::InvalidDomain {
        domain: domain.to_string(),
        source,
    })
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return host.split_inclusive(']').next().unwrap_or(host);
    }
    host.split(':').next().unwrap_or(host)
}

/// The `Host` header, or the authority of an absolute request URI.
fn request_host(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| request.uri().host())
}

async fn enforce_domain(State(domain): State<Arc<Regex>>, request: Request, next: Next) -> Response {
    let matches = request_host(&request).is_some_and(|host| domain.is_match(strip_port(host)));

    if matches {
        next.run(request).await
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

/// Compiled parameter constraints of one route.
struct Constraints {
    uri: String,
    patterns: Vec<(String, Regex)>,
}

impl Constraints {
    /// `None` when the route has no constrained parameter in its URI.
    fn compile(route: &RouteEntry) -> Result<Option<Self>, ApiError> {
        let mut patterns = Vec::new();
        for (param, constraint) in &route.wheres {
            if !route.uri.contains(&format!("{{{param}}}")) {
                continue;
            }
            let regex = Regex::new(&format!("^(?:{constraint})$")).map_err(|source| {
                ApiError::InvalidConstraint {
                    param: param.clone(),
                    uri: route.uri.clone(),
                    source,
                }
            })?;
            patterns.push((param.clone(), regex));
        }

        Ok((!patterns.is_empty()).then(|| Self {
            uri: route.uri.clone(),
            patterns,
        }))
    }
}

async fn enforce_constraints(
    State(constraints): State<Arc<Constraints>>,
    Path(params): Path<HashMap<String, String>>,
    request: Request,
    next: Next,
) -> Response {
    for (param, regex) in &constraints.patterns {
        if let Some(value) = params.get(param) {
            if !regex.is_match(value) {
                tracing::debug!(uri = %constraints.uri, param, value, "Route constraint not met");
                return StatusCode::NOT_FOUND.into_response();
            }
        }
    }
    next.run(request).await
}
