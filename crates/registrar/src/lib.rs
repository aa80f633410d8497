//! Attribute-driven route registration.
//!
//! [`RouteRegistrar`] walks [`ControllerDescriptor`]s from a
//! [`ControllerCatalog`] and registers the routes they declare with any
//! [`Router`] implementation. [`RouteTable`] is the in-memory router used
//! for listing routes, for tests, and as input to host-framework bindings.
//!
//! [`ControllerDescriptor`]: routemark_core::ControllerDescriptor

pub mod catalog;
pub mod config;
pub mod error;
pub mod registrar;
pub mod resource;
pub mod route_table;
pub mod router;
pub mod scan;

pub use catalog::{Controller, ControllerCatalog, ControllerRegistration};
pub use config::{ConfigError, RegistrarConfig};
pub use error::{RegistrarError, RegistrarResult};
pub use registrar::RouteRegistrar;
pub use route_table::{RouteEntry, RouteTable};
pub use router::{PendingResource, RouteHandle, Router};

#[doc(hidden)]
pub use inventory;
