//! S3: the joiner requests FREEZE at scenario time 20.0 TT; both
//! federates freeze exactly at the boundary and never advance past it.
//! The joiner carries a 2.5 s sim offset, so its local clock pauses at
//! 17.5 s.

use std::{
    thread,
    time::{Duration, Instant},
};

use fedlink::{CycleStatus, ExecutionMode, MtrMode, SimScheduler};
use fedlink_test::helpers::{spawn_federate, two_federate_config, MockFederation, TestFederate};

const FREEZE_AT_TT: f64 = 20.0;
const SEND_AT_TT: f64 = 10.0;

fn drive_to_freeze(mut federate: TestFederate, send_mtr: bool) -> TestFederate {
    let deadline = Instant::now() + Duration::from_secs(30);
    let mut sent = false;
    loop {
        assert!(Instant::now() < deadline, "federate never froze");
        let status = federate.manager.process_cycle().expect("cycle");

        // Never advances past the freeze boundary (P6)
        let scenario_now = federate.manager.scenario_time();
        assert!(
            scenario_now <= FREEZE_AT_TT + 1.0e-9,
            "scenario time {} ran past the freeze boundary",
            scenario_now
        );

        if send_mtr && !sent && scenario_now >= SEND_AT_TT {
            federate
                .manager
                .send_mtr_at(MtrMode::GotoFreeze, FREEZE_AT_TT)
                .expect("send MTR");
            sent = true;
        }

        match status {
            CycleStatus::Running { .. } | CycleStatus::Frozen => {
                if federate.manager.execution_mode() == ExecutionMode::Freeze {
                    return federate;
                }
            }
            CycleStatus::Shutdown { .. } => panic!("unexpected shutdown"),
        }
        thread::sleep(Duration::from_micros(200));
    }
}

#[test]
fn test_freeze_at_requested_scenario_time() {
    let _ = env_logger::builder().is_test(true).try_init();
    let bus = MockFederation::new();

    let mut master = spawn_federate(&bus, two_federate_config("A", true));

    let mut joiner_config = two_federate_config("B", false);
    joiner_config.sim_offset = 2.5;
    let mut joiner = spawn_federate(&bus, joiner_config);

    let master_thread = thread::spawn(move || {
        master.manager.initialize().expect("master init");
        drive_to_freeze(master, false)
    });
    let joiner_thread = thread::spawn(move || {
        joiner.manager.initialize().expect("joiner init");
        // B is the requester
        drive_to_freeze(joiner, true)
    });

    let master = master_thread.join().expect("master thread");
    let joiner = joiner_thread.join().expect("joiner thread");

    // The master accepted the requested boundary verbatim
    assert_eq!(
        master.manager.exco_snapshot().next_execution_mode,
        ExecutionMode::Freeze
    );
    assert_eq!(
        master.manager.exco_snapshot().next_mode_scenario_time,
        FREEZE_AT_TT
    );

    // Both froze exactly at the boundary
    assert!((master.manager.scenario_time() - FREEZE_AT_TT).abs() < 1.0e-6);
    assert!((joiner.manager.scenario_time() - FREEZE_AT_TT).abs() < 1.0e-6);

    // B's 2.5 s sim offset pauses its local clock at 17.5 s
    let joiner_sim_time = joiner
        .manager
        .scenario_timeline()
        .compute_simulation_time(joiner.manager.scenario_time());
    assert!((joiner_sim_time - 17.5).abs() < 1.0e-6);
    assert!((joiner.scheduler.sim_tics() as f64 / 1.0e6 - 17.5).abs() < 1.0e-6);

    // Frozen federates hold the clock (P6): more cycles move nothing
    let mut master = master;
    for _ in 0..5 {
        let status = master.manager.process_cycle().expect("frozen cycle");
        assert_eq!(status, CycleStatus::Frozen);
    }
    assert!((master.manager.scenario_time() - FREEZE_AT_TT).abs() < 1.0e-6);
}
