//! Attributes that decorate a route without declaring one.

/// A default value for a route parameter or route-level key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    pub key: String,
    pub value: String,
}

impl Defaults {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Marks the member's routes as fallback routes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fallback;

/// Turns scoped implicit bindings on or off.
///
/// On a controller it sets the default for every route; on a method it
/// overrides that default, including switching it off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeBindings {
    pub scope_bindings: bool,
}

impl ScopeBindings {
    pub fn new() -> Self {
        Self {
            scope_bindings: true,
        }
    }

    pub fn disabled() -> Self {
        Self {
            scope_bindings: false,
        }
    }
}

impl Default for ScopeBindings {
    fn default() -> Self {
        Self::new()
    }
}
