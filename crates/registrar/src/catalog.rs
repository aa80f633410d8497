//! Controller catalog: the statically registered metadata table.
//!
//! Controllers are added explicitly with [`ControllerCatalog::register`] or
//! submitted at link time with [`register_controller!`](crate::register_controller)
//! and picked up by [`ControllerCatalog::discover`].

use std::collections::HashMap;

use routemark_core::ControllerDescriptor;

/// A type that can describe its own routes.
pub trait Controller {
    fn describe() -> ControllerDescriptor;
}

/// Link-time registration entry collected by `inventory`.
pub struct ControllerRegistration {
    pub describe: fn() -> ControllerDescriptor,
}

inventory::collect!(ControllerRegistration);

/// Submit a [`Controller`] implementor to the link-time catalog.
///
/// ```ignore
/// routemark_registrar::register_controller!(UserController);
/// ```
#[macro_export]
macro_rules! register_controller {
    ($controller:ty) => {
        $crate::inventory::submit! {
            $crate::catalog::ControllerRegistration {
                describe: <$controller as $crate::catalog::Controller>::describe,
            }
        }
    };
}

/// Controllers known to the registrar, in registration order.
#[derive(Debug, Default, Clone)]
pub struct ControllerCatalog {
    controllers: Vec<ControllerDescriptor>,
    by_name: HashMap<String, usize>,
}

impl ControllerCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from every controller submitted with
    /// [`register_controller!`](crate::register_controller).
    ///
    /// Link order is unspecified, so entries are sorted by name.
    pub fn discover() -> Self {
        let mut descriptors: Vec<ControllerDescriptor> =
            inventory::iter::<ControllerRegistration>
                .into_iter()
                .map(|r| (r.describe)())
                .collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));

        let mut catalog = Self::new();
        for descriptor in descriptors {
            catalog.register(descriptor);
        }
        tracing::debug!(count = catalog.len(), "Discovered controllers");
        catalog
    }

    /// Add a controller. A descriptor with an already known name replaces
    /// the previous one in place.
    pub fn register(&mut self, descriptor: ControllerDescriptor) -> &mut Self {
        match self.by_name.get(&descriptor.name) {
            Some(&index) => {
                tracing::warn!(controller = %descriptor.name, "Replacing duplicate controller descriptor");
                self.controllers[index] = descriptor;
            }
            None => {
                self.by_name
                    .insert(descriptor.name.clone(), self.controllers.len());
                self.controllers.push(descriptor);
            }
        }
        self
    }

    pub fn with<C: Controller>(mut self) -> Self {
        self.register(C::describe());
        self
    }

    pub fn get(&self, name: &str) -> Option<&ControllerDescriptor> {
        self.by_name.get(name).map(|&i| &self.controllers[i])
    }

    /// Controllers declared in `module`, in registration order.
    pub fn in_module<'a>(
        &'a self,
        module: &'a str,
    ) -> impl Iterator<Item = &'a ControllerDescriptor> + 'a {
        self.controllers.iter().filter(move |c| c.module == module)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ControllerDescriptor> {
        self.controllers.iter()
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}

impl FromIterator<ControllerDescriptor> for ControllerCatalog {
    fn from_iter<T: IntoIterator<Item = ControllerDescriptor>>(iter: T) -> Self {
        let mut catalog = Self::new();
        for descriptor in iter {
            catalog.register(descriptor);
        }
        catalog
    }
}
