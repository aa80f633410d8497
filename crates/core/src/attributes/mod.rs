//! Declarative attribute surface.
//!
//! An [`Attribute`] is one piece of metadata attached to a controller or to
//! one of its methods. Route and constraint attributes are trait objects so
//! that every verb-specific or pattern-specific variant is handled through
//! the same capability ([`RouteAttribute`], [`WhereAttribute`]).

mod class;
mod markers;
mod route;
mod wheres;

use std::sync::Arc;

pub use class::{Domain, DomainFromConfig, Group, Middleware, Prefix, Resource};
pub use markers::{Defaults, Fallback, ScopeBindings};
pub use route::{
    Any, Delete, Get, Options, Patch, Post, Put, Route, RouteAttribute, RouteDefinition,
};
pub use wheres::{
    Where, WhereAlpha, WhereAlphaNumeric, WhereAttribute, WhereIn, WhereNumber, WhereUlid,
    WhereUuid,
};

#[derive(Debug, Clone)]
pub enum Attribute {
    Route(Arc<dyn RouteAttribute>),
    Where(Arc<dyn WhereAttribute>),
    Defaults(Defaults),
    Fallback(Fallback),
    ScopeBindings(ScopeBindings),
    Prefix(Prefix),
    Domain(Domain),
    DomainFromConfig(DomainFromConfig),
    Group(Group),
    Middleware(Middleware),
    Resource(Resource),
}

macro_rules! into_attribute {
    ($variant:ident: $($ty:ty),+ => shared) => {
        $(
            impl From<$ty> for Attribute {
                fn from(value: $ty) -> Self {
                    Attribute::$variant(Arc::new(value))
                }
            }
        )+
    };
    ($($ty:ident),+) => {
        $(
            impl From<$ty> for Attribute {
                fn from(value: $ty) -> Self {
                    Attribute::$ty(value)
                }
            }
        )+
    };
}

into_attribute!(Route: Route, Get, Post, Put, Patch, Delete, Options, Any => shared);
into_attribute!(
    Where: Where, WhereAlpha, WhereAlphaNumeric, WhereNumber, WhereUuid, WhereUlid, WhereIn
    => shared
);
into_attribute!(
    Defaults,
    Fallback,
    ScopeBindings,
    Prefix,
    Domain,
    DomainFromConfig,
    Group,
    Middleware,
    Resource
);
