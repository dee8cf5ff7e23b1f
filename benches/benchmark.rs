use criterion::{criterion_group, criterion_main, Criterion};
use role_tree::{Direction, Pattern, RoleManager, RoleSpec};
use std::hint::black_box;

/// A chain of `depth` roles, each declaring `width` literal actions.
fn deep_spec(depth: usize, width: usize) -> RoleSpec {
    let mut spec = RoleSpec::new();
    for level in (1..=depth).rev() {
        let actions = (0..width).map(|i| format!("level{level}.action{i}"));
        spec = RoleSpec::new()
            .actions(actions)
            .child(format!("role{level}"), spec);
    }
    spec.action("root.action")
}

/// A root with `fanout` children, each with `fanout` children of their own.
fn wide_spec(fanout: usize) -> RoleSpec {
    let mut root = RoleSpec::new().action("root.action");
    for i in 0..fanout {
        let mut child = RoleSpec::new().action(format!("child{i}.action"));
        for j in 0..fanout {
            child = child.child(format!("leaf{i}_{j}"), RoleSpec::new().action(format!("leaf{i}_{j}.action")));
        }
        root = root.child(format!("child{i}"), child);
    }
    root
}

fn bench_construction(c: &mut Criterion) {
    let spec = wide_spec(20);

    c.bench_function("construction", |b| {
        b.iter(|| black_box(RoleManager::new(spec.clone()).unwrap()))
    });
}

fn bench_inherited_permission_check(c: &mut Criterion) {
    let manager = RoleManager::new(deep_spec(10, 5)).unwrap();

    c.bench_function("inherited_permission_check", |b| {
        b.iter(|| black_box(manager.can("role10", "root.action")))
    });
}

fn bench_denied_permission_check(c: &mut Criterion) {
    let manager = RoleManager::new(wide_spec(20)).unwrap();

    c.bench_function("denied_permission_check", |b| {
        b.iter(|| black_box(manager.can(["leaf19_19", "leaf0_0"], "missing.action")))
    });
}

fn bench_pattern_permission_check(c: &mut Criterion) {
    let spec: RoleSpec = RoleSpec::new().child(
        "salesman",
        RoleSpec::new().action(Pattern::new(r"^salesman\.\w+$").unwrap()),
    );
    let manager = RoleManager::new(spec).unwrap();

    c.bench_function("pattern_permission_check", |b| {
        b.iter(|| black_box(manager.can("salesman", "salesman.close_deal")))
    });
}

fn bench_ancestry_check(c: &mut Criterion) {
    let manager = RoleManager::new(deep_spec(10, 1)).unwrap();

    c.bench_function("ancestry_check", |b| {
        b.iter(|| black_box(manager.is_all(["role10", "role9"], "role1")))
    });
}

fn bench_complete_values(c: &mut Criterion) {
    let manager = RoleManager::new(wide_spec(20)).unwrap();

    c.bench_function("complete_values_down", |b| {
        b.iter(|| {
            black_box(manager.calc_complete_values("_public_", Direction::Down, |node| {
                Some(node.role())
            }))
        })
    });
}

criterion_group!(
    benches,
    bench_construction,
    bench_inherited_permission_check,
    bench_denied_permission_check,
    bench_pattern_permission_check,
    bench_ancestry_check,
    bench_complete_values
);
criterion_main!(benches);
