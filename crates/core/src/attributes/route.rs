//! Per-method route declarations.
//!
//! [`Route`] takes an arbitrary verb list; [`Get`], [`Post`], [`Put`],
//! [`Patch`], [`Delete`], [`Options`] and [`Any`] fix the verb. All of them
//! implement [`RouteAttribute`], so the registrar treats them uniformly.

use std::fmt;

use crate::error::CoreError;
use crate::method::HttpMethod;

/// A validated route declaration, ready to be handed to a router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition {
    pub methods: Vec<HttpMethod>,
    pub uri: String,
    pub name: Option<String>,
    pub middleware: Vec<String>,
}

/// Capability shared by every route-declaring attribute.
///
/// `instantiate` validates the raw arguments. A failure means the single
/// attribute is malformed; callers skip it and keep going.
pub trait RouteAttribute: fmt::Debug + Send + Sync {
    fn instantiate(&self) -> Result<RouteDefinition, CoreError>;
}

/// A route answering to an explicit list of verbs.
///
/// Verb names are kept as written and only parsed on instantiation, so a
/// typo such as `"gte"` makes this one attribute invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    methods: Vec<String>,
    uri: String,
    name: Option<String>,
    middleware: Vec<String>,
}

impl Route {
    pub fn new<I, S>(methods: I, uri: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            methods: methods.into_iter().map(Into::into).collect(),
            uri: uri.into(),
            name: None,
            middleware: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn middleware<I, S>(mut self, middleware: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.middleware.extend(middleware.into_iter().map(Into::into));
        self
    }
}

/// Reject URIs whose parameter braces do not pair up, e.g. `posts/{post`,
/// and parameters without a name such as `users/{}`.
fn validate_uri(uri: &str) -> Result<(), CoreError> {
    let mut rest = uri;
    loop {
        let open = rest.find('{');
        let close = rest.find('}');
        match (open, close) {
            (None, None) => return Ok(()),
            (Some(start), Some(end)) if start < end => {
                let name = &rest[start + 1..end];
                let name = name.strip_prefix('*').unwrap_or(name);
                if name.contains('{') {
                    break;
                }
                if name.is_empty() {
                    return Err(CoreError::InvalidArgument(format!(
                        "unnamed parameter in `{uri}`"
                    )));
                }
                rest = &rest[end + 1..];
            }
            _ => break,
        }
    }
    Err(CoreError::InvalidArgument(format!(
        "unbalanced parameter braces in `{uri}`"
    )))
}

impl RouteAttribute for Route {
    fn instantiate(&self) -> Result<RouteDefinition, CoreError> {
        validate_uri(&self.uri)?;
        let methods = HttpMethod::parse_list(&self.methods)?;
        if methods.is_empty() {
            return Err(CoreError::EmptyMethods {
                uri: self.uri.clone(),
            });
        }

        Ok(RouteDefinition {
            methods,
            uri: self.uri.clone(),
            name: self.name.clone(),
            middleware: self.middleware.clone(),
        })
    }
}

macro_rules! verb_attribute {
    ($(#[$doc:meta])* $name:ident => [$($method:expr),+]) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            pub uri: String,
            pub name: Option<String>,
            pub middleware: Vec<String>,
        }

        impl $name {
            pub fn new(uri: impl Into<String>) -> Self {
                Self {
                    uri: uri.into(),
                    name: None,
                    middleware: Vec::new(),
                }
            }

            pub fn name(mut self, name: impl Into<String>) -> Self {
                self.name = Some(name.into());
                self
            }

            pub fn middleware<I, S>(mut self, middleware: I) -> Self
            where
                I: IntoIterator<Item = S>,
                S: Into<String>,
            {
                self.middleware.extend(middleware.into_iter().map(Into::into));
                self
            }
        }

        impl RouteAttribute for $name {
            fn instantiate(&self) -> Result<RouteDefinition, CoreError> {
                validate_uri(&self.uri)?;
                Ok(RouteDefinition {
                    methods: vec![$($method),+],
                    uri: self.uri.clone(),
                    name: self.name.clone(),
                    middleware: self.middleware.clone(),
                })
            }
        }
    };
}

verb_attribute!(
    /// `GET` route.
    Get => [HttpMethod::Get]
);
verb_attribute!(
    /// `POST` route.
    Post => [HttpMethod::Post]
);
verb_attribute!(
    /// `PUT` route.
    Put => [HttpMethod::Put]
);
verb_attribute!(
    /// `PATCH` route.
    Patch => [HttpMethod::Patch]
);
verb_attribute!(
    /// `DELETE` route.
    Delete => [HttpMethod::Delete]
);
verb_attribute!(
    /// `OPTIONS` route.
    Options => [HttpMethod::Options]
);
verb_attribute!(
    /// Route answering to every verb.
    Any => [
        HttpMethod::Get,
        HttpMethod::Head,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Options
    ]
);
