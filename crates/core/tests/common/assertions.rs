//! Custom assertion helpers for integration tests.

use rk_protocol::{Resource, ResourceKind};

/// Assert that the resources have the given kinds, in order.
#[allow(dead_code)]
pub fn assert_kinds(resources: &[Resource], expected: &[ResourceKind]) {
    let kinds: Vec<ResourceKind> = resources.iter().map(Resource::kind).collect();
    assert_eq!(kinds, expected, "Unexpected resource kinds");
}

/// Assert that every resource points at the given config file and its directory.
#[allow(dead_code)]
pub fn assert_located_at(resources: &[Resource], config_path: &std::path::Path) {
    for resource in resources {
        assert_eq!(resource.config_path(), config_path);
        assert_eq!(Some(resource.path()), config_path.parent());
        assert!(resource.path().is_absolute(), "path should be absolute");
    }
}
