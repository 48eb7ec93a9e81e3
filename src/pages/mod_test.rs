use super::*;
use crate::routes::ProtectionProfile;

#[test]
fn registry_covers_every_route() {
    let registry = page_registry(&RouteTable::standard(ProtectionProfile::Protected));
    assert!(registry.missing().is_empty(), "{registry:?}");
}

#[test]
fn registry_follows_table_entries() {
    let table = RouteTable::standard(ProtectionProfile::Open);
    let registry = page_registry(&table);
    for name in RouteName::ALL {
        assert!(registry.contains(name), "{name}");
    }
}
