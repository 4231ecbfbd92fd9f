//! S2: the joiner runs a different base-time multiplier and must shut
//! down with the mismatch exit code as soon as the first ExCO reflection
//! lands; the master keeps running.

use std::{thread, time::Duration};

use fedlink::{BaseTimeUnit, ExecutionMode, ExitCode, FederationError};
use fedlink_test::helpers::{spawn_federate, two_federate_config, MockFederation};

#[test]
fn test_multiplier_mismatch_shuts_joiner_down() {
    let _ = env_logger::builder().is_test(true).try_init();
    let bus = MockFederation::new();

    let mut master = spawn_federate(&bus, two_federate_config("A", true));

    // B launches with milliseconds against A's microseconds
    let mut mismatched_config = two_federate_config("B", false);
    mismatched_config.base_time_unit = BaseTimeUnit::Millisecond;
    mismatched_config.wait_timeout = Duration::from_secs(5);
    let mut joiner = spawn_federate(&bus, mismatched_config);

    let master_thread = thread::spawn(move || {
        // The master's own init succeeds regardless of B's fate: its
        // required roster is satisfied the moment B joins
        let result = master.manager.initialize();
        (master, result)
    });
    let joiner_thread = thread::spawn(move || {
        let result = joiner.manager.initialize();
        (joiner, result)
    });

    let (joiner, joiner_result) = joiner_thread.join().expect("joiner thread");
    match joiner_result {
        Err(FederationError::Execution(fedlink::ExecutionError::BaseTimeMismatch {
            local,
            remote,
        })) => {
            assert_eq!(local, 1_000);
            assert_eq!(remote, 1_000_000);
        }
        other => panic!("expected base-time mismatch, got {:?}", other),
    }
    assert_eq!(joiner.manager.exit_code(), Some(ExitCode::BaseTimeMismatch));
    assert_eq!(joiner.manager.execution_mode(), ExecutionMode::Shutdown);
    assert!(!bus.is_joined("B"));

    let (master, master_result) = master_thread.join().expect("master thread");
    // A continues: B joined long enough to satisfy the roster, and A's
    // init gates never depended on B achieving anything it skipped
    assert!(master_result.is_ok());
    assert_eq!(master.manager.execution_mode(), ExecutionMode::Running);
    assert!(bus.is_joined("A"));
}
