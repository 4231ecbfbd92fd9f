//! S1: master "A" and joiner "B", both required, reach RUNNING with a
//! field-identical replicated ExCO.

use std::thread;

use fedlink::ExecutionMode;
use fedlink_test::helpers::{spawn_federate, two_federate_config, MockFederation};

#[test]
fn test_two_federates_reach_running() {
    let _ = env_logger::builder().is_test(true).try_init();
    let bus = MockFederation::new();

    let mut master = spawn_federate(&bus, two_federate_config("A", true));
    let mut joiner = spawn_federate(&bus, two_federate_config("B", false));

    let master_thread = thread::spawn(move || {
        master.manager.initialize().expect("master init");
        master
    });
    let joiner_thread = thread::spawn(move || {
        joiner.manager.initialize().expect("joiner init");
        joiner
    });

    let mut master = master_thread.join().expect("master thread");
    let mut joiner = joiner_thread.join().expect("joiner thread");

    assert_eq!(master.manager.execution_mode(), ExecutionMode::Running);
    assert_eq!(joiner.manager.execution_mode(), ExecutionMode::Running);
    assert_eq!(bus.time_regulating("A"), Some(true));
    assert_eq!(bus.time_regulating("B"), Some(true));

    // A few lockstep cycles let B drain the master's final (RUNNING)
    // publish; time regulation keeps the two within one step of each
    // other, so equal cycle counts complete together
    let cycles = 8;
    let master_cycles = thread::spawn(move || {
        for _ in 0..cycles {
            master.manager.process_cycle().expect("master cycle");
        }
        master
    });
    let joiner_cycles = thread::spawn(move || {
        for _ in 0..cycles {
            joiner.manager.process_cycle().expect("joiner cycle");
        }
        joiner
    });
    let master = master_cycles.join().expect("master cycles");
    let joiner = joiner_cycles.join().expect("joiner cycles");

    // The replicated ExCO on B equals the one A published, field by field
    assert_eq!(
        joiner.manager.exco_snapshot(),
        master.manager.exco_snapshot()
    );
    assert_eq!(
        master.manager.exco_snapshot().current_execution_mode,
        ExecutionMode::Running
    );
}

#[test]
fn test_second_master_fails_at_join() {
    let _ = env_logger::builder().is_test(true).try_init();
    let bus = MockFederation::new();

    let mut first = spawn_federate(&bus, {
        let mut config = two_federate_config("A", true);
        config.known_federates = vec![fedlink::KnownFederate::required("A")];
        config
    });
    first.manager.initialize().expect("first master init");

    // A second master claim must fail at join (P7)
    let mut pretender = spawn_federate(&bus, {
        let mut config = two_federate_config("B", true);
        config.known_federates = vec![fedlink::KnownFederate::required("B")];
        config
    });
    let result = pretender.manager.initialize();
    assert!(result.is_err());
    assert!(!bus.is_joined("B"));
}
