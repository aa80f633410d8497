//! Expansion of a resource declaration into its CRUD routes.
//!
//! ```text
//! index    GET        /photos
//! create   GET        /photos/create
//! store    POST       /photos
//! show     GET        /photos/{photo}
//! edit     GET        /photos/{photo}/edit
//! update   PUT|PATCH  /photos/{photo}
//! destroy  DELETE     /photos/{photo}
//! ```

use routemark_core::HttpMethod;

use crate::router::PendingResource;

pub const RESOURCE_ACTIONS: [&str; 7] =
    ["index", "create", "store", "show", "edit", "update", "destroy"];

pub const API_RESOURCE_ACTIONS: [&str; 5] = ["index", "store", "show", "update", "destroy"];

/// One route produced by a resource declaration, relative to the
/// surrounding group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRoute {
    pub action: &'static str,
    pub methods: Vec<HttpMethod>,
    pub uri: String,
    pub name: String,
}

/// Expand `resource` into routes, honouring `only`, `except`, `names`,
/// `parameters` and `shallow`.
pub fn expand(resource: &PendingResource) -> Vec<ResourceRoute> {
    let segments: Vec<&str> = resource
        .name
        .split('.')
        .filter(|s| !s.is_empty())
        .collect();
    let Some((last, parents)) = segments.split_last() else {
        return Vec::new();
    };

    let nested_prefix = parents
        .iter()
        .map(|s| format!("{s}/{{{}}}", parameter_name(resource, s)))
        .collect::<Vec<_>>()
        .join("/");
    let nest = |uri: String| {
        if nested_prefix.is_empty() {
            uri
        } else {
            format!("{nested_prefix}/{uri}")
        }
    };

    let collection = nest(last.to_string());
    let member = format!("{last}/{{{}}}", parameter_name(resource, last));
    let member = if resource.shallow {
        member
    } else {
        nest(member)
    };

    let full_name = segments.join(".");
    let shallow_name = last.to_string();

    let actions: &[&'static str] = if resource.api {
        &API_RESOURCE_ACTIONS
    } else {
        &RESOURCE_ACTIONS
    };

    actions
        .iter()
        .copied()
        .filter(|&action| {
            resource
                .only
                .as_ref()
                .map_or(true, |only| only.iter().any(|o| o == action))
        })
        .filter(|&action| {
            resource
                .except
                .as_ref()
                .map_or(true, |except| !except.iter().any(|e| e == action))
        })
        .map(|action| {
            let (methods, uri, is_member) = match action {
                "index" => (vec![HttpMethod::Get], collection.clone(), false),
                "create" => (vec![HttpMethod::Get], format!("{collection}/create"), false),
                "store" => (vec![HttpMethod::Post], collection.clone(), false),
                "show" => (vec![HttpMethod::Get], member.clone(), true),
                "edit" => (vec![HttpMethod::Get], format!("{member}/edit"), true),
                "update" => (
                    vec![HttpMethod::Put, HttpMethod::Patch],
                    member.clone(),
                    true,
                ),
                _ => (vec![HttpMethod::Delete], member.clone(), true),
            };

            let name = match resource.names.get(action) {
                Some(name) => name.clone(),
                None if is_member && resource.shallow => format!("{shallow_name}.{action}"),
                None => format!("{full_name}.{action}"),
            };

            ResourceRoute {
                action,
                methods,
                uri,
                name,
            }
        })
        .collect()
}

fn parameter_name(resource: &PendingResource, segment: &str) -> String {
    match resource.parameters.get(segment) {
        Some(name) => name.clone(),
        None => singular(segment).replace('-', "_"),
    }
}

/// Naive English singular, enough for conventional resource names.
fn singular(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{stem}y");
    }
    for suffix in ["sses", "shes", "ches", "xes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    match word.strip_suffix('s') {
        Some(stem) if !stem.ends_with('s') && !stem.is_empty() => stem.to_string(),
        _ => word.to_string(),
    }
}
