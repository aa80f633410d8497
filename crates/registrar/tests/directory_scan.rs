use std::fs;
use std::path::Path;

use assert_matches::assert_matches;
use routemark_core::attributes::Get;
use routemark_core::{ControllerDescriptor, MethodDescriptor};
use routemark_registrar::{ControllerCatalog, RegistrarError, RouteRegistrar, RouteTable};

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "").unwrap();
}

fn controller(module: &str, ident: &str, uri: &str) -> ControllerDescriptor {
    ControllerDescriptor::new(module, ident)
        .method(MethodDescriptor::new("index").attribute(Get::new(uri)))
}

fn catalog() -> ControllerCatalog {
    vec![
        controller("app::controllers::users", "UserController", "users"),
        controller("app::controllers::admin", "DashboardController", "admin"),
        controller("app::controllers::articles", "ArticleController", "articles"),
        controller("app::other", "OtherController", "other"),
    ]
    .into_iter()
    .collect()
}

#[test]
fn registers_controllers_declared_in_scanned_files() {
    let src = tempfile::tempdir().unwrap();
    touch(src.path(), "controllers/users.rs");
    touch(src.path(), "controllers/admin/mod.rs");
    touch(src.path(), "controllers/helpers.rs");
    touch(src.path(), "controllers/README.md");

    let catalog = catalog();
    let mut table = RouteTable::new();
    RouteRegistrar::new(&mut table, &catalog)
        .use_base_path(src.path())
        .use_root_namespace("app")
        .register_directory(&[src.path().join("controllers")])
        .unwrap();

    let uris: Vec<_> = table.routes().iter().map(|r| r.uri.as_str()).collect();
    assert_eq!(uris, vec!["admin", "users"]);
}

#[test]
fn files_from_several_directories_are_sorted() {
    let src = tempfile::tempdir().unwrap();
    touch(src.path(), "controllers/users.rs");
    touch(src.path(), "controllers/articles.rs");
    touch(src.path(), "other.rs");

    let catalog = catalog();
    let mut table = RouteTable::new();
    RouteRegistrar::new(&mut table, &catalog)
        .use_base_path(src.path())
        .use_root_namespace("app")
        .register_directory(&[src.path().join("controllers"), src.path().to_path_buf()])
        .unwrap();

    let uris: Vec<_> = table.routes().iter().map(|r| r.uri.as_str()).collect();
    assert_eq!(uris, vec!["articles", "articles", "users", "users", "other"]);
}

#[test]
fn extension_filters_files() {
    let src = tempfile::tempdir().unwrap();
    touch(src.path(), "controllers/users.txt");
    touch(src.path(), "controllers/articles.rs");

    let catalog = catalog();
    let mut table = RouteTable::new();
    RouteRegistrar::new(&mut table, &catalog)
        .use_base_path(src.path())
        .use_root_namespace("app")
        .use_extension(".txt")
        .register_directory(&[src.path()])
        .unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.routes()[0].uri, "users");
}

#[test]
fn missing_directory_is_an_error() {
    let src = tempfile::tempdir().unwrap();
    let catalog = catalog();
    let mut table = RouteTable::new();

    let result = RouteRegistrar::new(&mut table, &catalog)
        .register_directory(&[src.path().join("does-not-exist")]);

    assert_matches!(result, Err(RegistrarError::NotADirectory(_)));
    assert!(table.is_empty());
}

#[test]
fn register_file_maps_a_single_file() {
    let src = tempfile::tempdir().unwrap();
    touch(src.path(), "controllers/users.rs");

    let catalog = catalog();
    let mut table = RouteTable::new();
    RouteRegistrar::new(&mut table, &catalog)
        .use_base_path(src.path())
        .use_root_namespace("app")
        .register_file(src.path().join("controllers/users.rs"));

    assert_eq!(table.len(), 1);
}
