//! Declarative route metadata.
//!
//! Controllers describe their routes as data: attributes on the controller
//! and on each method, collected into a [`ControllerDescriptor`]. The
//! registrar crate turns these descriptors into router calls.

pub mod attributes;
pub mod class_attributes;
pub mod controller;
pub mod error;
pub mod method;

pub use class_attributes::{ClassRouteAttributes, GroupOptions};
pub use controller::{Action, AttributeSet, ControllerDescriptor, MethodDescriptor, INVOKE_METHOD};
pub use error::CoreError;
pub use method::HttpMethod;
