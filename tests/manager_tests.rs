//! Integration tests for manager construction, configuration and lookups.

use role_tree::{
    actions, Direction, Error, RoleManager, RoleManagerConfig, RoleManagerConfigBuilder,
    RoleSpec, WalkOptions, DEFAULT_ROOT,
};
use std::{
    sync::{Arc, Mutex},
    thread,
};

#[derive(Debug, Clone, PartialEq)]
struct Meta {
    label: &'static str,
    seats: u32,
}

fn org() -> RoleSpec<Meta> {
    RoleSpec::new()
        .actions(["org.view"])
        .custom(Meta { label: "Everyone", seats: 0 })
        .child(
            "member",
            RoleSpec::new()
                .actions(actions!["org.comment", "org.view"])
                .custom(Meta { label: "Member", seats: 50 })
                .child(
                    "owner",
                    RoleSpec::new()
                        .action("org.delete")
                        .custom(Meta { label: "Owner", seats: 1 }),
                ),
        )
        .child("auditor", RoleSpec::new().action("org.audit"))
}

#[test]
fn test_custom_root_name() {
    let config = RoleManagerConfigBuilder::new().root_name("anonymous").build();
    let manager = RoleManager::with_config(org(), config).unwrap();

    assert_eq!(manager.root().role(), "anonymous");
    assert_eq!(manager.config().root_name, "anonymous");
    assert!(manager.can(Vec::<&str>::new(), "org.view"));
    assert!(manager.is("owner", "anonymous"));
    assert!(manager.get_role(DEFAULT_ROOT).is_none());
}

#[test]
fn test_super_role_need_not_exist() {
    let config = RoleManagerConfig {
        super_role: Some("root".to_string()),
        ..RoleManagerConfig::default()
    };
    let manager = RoleManager::with_config(org(), config).unwrap();

    assert!(manager.get_role("root").is_none());
    assert!(manager.can(["auditor", "root"], "org.delete"));
    assert!(!manager.can(["auditor"], "org.delete"));
    assert!(manager.is_all(["root"], "owner"));
}

#[test]
fn test_custom_data_is_carried_to_nodes() {
    let manager = RoleManager::new(org()).unwrap();

    let owner = manager.find_by_role("owner").unwrap();
    assert_eq!(owner.custom().map(|meta| meta.label), Some("Owner"));
    assert!(manager.find_by_role("auditor").unwrap().custom().is_none());

    let labels = owner.collect_values(Direction::Up, |node| node.custom().map(|meta| meta.label));
    assert_eq!(labels, vec!["Owner", "Member", "Everyone"]);

    let seats: Vec<u32> = manager.calc_complete_values(
        ["owner", "auditor"],
        Direction::Up,
        |node| node.custom().map(|meta| meta.seats),
    );
    assert_eq!(seats, vec![1, 50, 0]);
}

#[test]
fn test_custom_data_is_one_object_shared_with_definition() {
    let audit_log = Arc::new(Mutex::new(Vec::new()));
    let spec = RoleSpec::new().child(
        "a",
        RoleSpec::new().shared_custom(Arc::clone(&audit_log)),
    );
    let manager = RoleManager::new(spec).unwrap();

    let node = manager.find_by_role("a").unwrap();
    let declared = manager.raw().children["a"].custom.as_ref().unwrap();
    assert!(std::ptr::eq(node.custom().unwrap(), &**declared));
    assert!(Arc::ptr_eq(declared, &audit_log));

    node.custom().unwrap().lock().unwrap().push("opened");
    assert_eq!(*audit_log.lock().unwrap(), vec!["opened"]);
    assert_eq!(declared.lock().unwrap().len(), 1);
}

#[test]
fn test_raw_definition_is_kept() {
    let manager = RoleManager::new(org()).unwrap();

    assert_eq!(manager.raw().children.len(), 2);
    assert_eq!(manager.raw().count_descendants(), manager.tree().len() - 1);
    assert_eq!(manager.roles(), [DEFAULT_ROOT, "member", "owner", "auditor"]);
    assert_eq!(manager.actions().len(), 5);
}

#[test]
fn test_first_duplicate_in_pre_order_is_reported() {
    let spec: RoleSpec = RoleSpec::new()
        .child(
            "x",
            RoleSpec::new().child("y", RoleSpec::new().child("z", RoleSpec::new())),
        )
        .child("y", RoleSpec::new())
        .child("z", RoleSpec::new());

    let err = RoleManager::new(spec).unwrap_err();
    assert_eq!(err, Error::DuplicateRoleName("y".to_string()));
    assert_eq!(err.role(), "y");
}

#[test]
fn test_unknown_role_lookup() {
    let manager = RoleManager::new(org()).unwrap();

    match manager.find_by_role("guest") {
        Err(Error::UnknownRole(role)) => assert_eq!(role, "guest"),
        other => panic!("unexpected lookup result: {other:?}"),
    }
    assert!(manager.calc_complete_roles("guest").is_empty());
    assert!(!manager.can("guest", "org.view"));
}

#[test]
fn test_walks_through_public_api() {
    let manager = RoleManager::new(org()).unwrap();
    let root = manager.root();

    let mut seen = Vec::new();
    root.walk_down(|node| seen.push(node.role()), &WalkOptions::new());
    assert_eq!(seen, vec![DEFAULT_ROOT, "member", "owner", "auditor"]);

    let mut seen = Vec::new();
    root.walk_down(
        |node| {
            seen.push(node.role());
            node.role() != "member"
        },
        &WalkOptions::new().short_circuit(true),
    );
    assert_eq!(seen, vec![DEFAULT_ROOT, "member"]);

    let owner = manager.find_by_role("owner").unwrap();
    assert_eq!(owner.count_ascendants(), 2);
    assert_eq!(root.count_descendants(), 3);
    assert_eq!(owner.collect_roles(Direction::Up), vec!["owner", "member", DEFAULT_ROOT]);
    assert_eq!(
        manager.tree().find_by_role(root.id(), "auditor"),
        manager.get_role("auditor").map(|node| node.id())
    );
}

#[test]
fn test_manager_shared_between_threads() {
    let manager = Arc::new(RoleManager::new(org()).unwrap());

    let handles: Vec<_> = ["member", "owner", "auditor"]
        .into_iter()
        .map(|role| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || manager.can(role, "org.view"))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
