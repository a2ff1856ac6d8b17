//! Registration, bootstrap and teardown of the checker registry.

use std::sync::Arc;

use checkerd::checker::{ArmingPolicy, Checker, CheckerId, CheckerRegistry, BOOTSTRAP_DELAY};
use checkerd::topology::{ServiceKey, Topology};

mod common;

use common::{add_service, inet, CountingCheck, RecordingScheduler};

#[test]
fn test_identities_restart_after_teardown() {
    let mut topology = Topology::new();
    let (vs, rs) = add_service(&mut topology, inet("10.0.0.5:80"), false, "192.168.1.10:80");
    let mut registry = CheckerRegistry::with_policy(ArmingPolicy::FailoverGoverned);

    for round in 0..2 {
        let ids: Vec<u32> = (0..5)
            .map(|_| registry.register(&mut topology, vs, rs, CountingCheck::new("c")).id().into())
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4], "round {}", round);
        registry.teardown_all();
    }
}

#[test]
fn test_initial_arming_and_alpha_marks() {
    let mut topology = Topology::new();
    let (inet_vs, inet_rs) = add_service(&mut topology, inet("10.0.0.5:80"), true, "192.168.1.10:80");
    let (fw_vs, fw_rs) = add_service(&mut topology, ServiceKey::FirewallMark(42), true, "192.168.2.10:80");
    let mut registry = CheckerRegistry::with_policy(ArmingPolicy::FailoverGoverned);

    let inet_check = registry.register(&mut topology, inet_vs, inet_rs, CountingCheck::new("a"));
    let inet_id = inet_check.id();
    assert!(!inet_check.is_enabled());

    let fw_check = registry.register(&mut topology, fw_vs, fw_rs, CountingCheck::new("b"));
    let fw_id = fw_check.id();
    assert!(fw_check.is_enabled());

    assert!(topology.real_server(inet_rs).failed_checkers().contains(&inet_id));
    assert!(topology.real_server(fw_rs).failed_checkers().contains(&fw_id));
}

#[test]
fn test_standalone_policy_arms_address_services() {
    let mut topology = Topology::new();
    let (vs, rs) = add_service(&mut topology, inet("[2001:db8::5]:443"), false, "[2001:db8::10]:443");
    let mut registry = CheckerRegistry::with_policy(ArmingPolicy::Standalone);

    assert!(registry.register(&mut topology, vs, rs, CountingCheck::new("a")).is_enabled());
    assert!(topology.real_server(rs).failed_checkers().is_empty());
}

#[test]
fn test_activate_all_schedules_each_launchable_checker_once() {
    let mut topology = Topology::new();
    let (vs, rs) = add_service(&mut topology, inet("10.0.0.5:80"), false, "192.168.1.10:80");
    let mut registry = CheckerRegistry::with_policy(ArmingPolicy::FailoverGoverned);
    registry.register(&mut topology, vs, rs, CountingCheck::new("a"));
    registry.register(&mut topology, vs, rs, CountingCheck::without_launch("b"));
    registry.register(&mut topology, vs, rs, CountingCheck::new("c"));

    let mut scheduler = RecordingScheduler::default();
    registry.activate_all(&topology, &mut scheduler, std::time::Duration::ZERO);

    let mut armed = Vec::new();
    registry.for_each(|r| armed.push(r.is_enabled()));
    assert_eq!(armed, vec![true, true, true]);
    assert_eq!(
        scheduler.scheduled,
        vec![(BOOTSTRAP_DELAY, CheckerId(0)), (BOOTSTRAP_DELAY, CheckerId(2))]
    );
}

#[test]
fn test_teardown_releases_every_payload_exactly_once() {
    let mut topology = Topology::new();
    let (vs, rs) = add_service(&mut topology, ServiceKey::FirewallMark(1), false, "192.168.1.10:80");
    let mut registry = CheckerRegistry::new();
    let checks: Vec<Arc<CountingCheck>> = (0..3).map(|_| CountingCheck::new("c")).collect();
    for check in &checks {
        registry.register(&mut topology, vs, rs, check.clone() as Arc<dyn Checker>);
    }

    registry.teardown_all();
    registry.teardown_all();

    assert!(registry.is_empty());
    assert!(checks.iter().all(|c| c.releases() == 1));
}

#[test]
fn test_describe_blocks_follow_registration_order() {
    let mut topology = Topology::new();
    let mut registry = CheckerRegistry::new();
    assert!(registry.describe(&topology).is_empty());

    let (vs1, rs1) = add_service(&mut topology, inet("10.0.0.5:80"), false, "192.168.1.10:80");
    let (vs2, rs2) = add_service(&mut topology, inet("[2001:db8::5]:80"), false, "[2001:db8::10]:8080");
    registry.register(&mut topology, vs2, rs2, CountingCheck::new("first"));
    registry.register(&mut topology, vs1, rs1, CountingCheck::new("second"));

    let lines = registry.describe(&topology);
    assert_eq!(lines.len(), 5);
    assert_eq!(&lines[1..], &[
        " [2001:db8::10]:8080".to_string(),
        "   Check = first".to_string(),
        " 192.168.1.10:80".to_string(),
        "   Check = second".to_string(),
    ]);
}
