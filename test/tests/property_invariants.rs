//! Property suites for the universal invariants: base-time round trips,
//! quantization idempotence, scenario mappings and queue conservation.

use proptest::prelude::*;

use fedlink::{
    AttributeItem, BaseTime, BaseTimeUnit, ItemQueue, LogicalTime, ScenarioTimeline,
    SimScheduler, SimTimeline, Timeline,
};
use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};

struct FixedScheduler {
    tics: AtomicI64,
    rate: i64,
}

impl SimScheduler for FixedScheduler {
    fn sim_tics(&self) -> i64 {
        self.tics.load(Ordering::SeqCst)
    }
    fn tics_per_second(&self) -> i64 {
        self.rate
    }
    fn advance_to(&self, seconds: f64) {
        self.tics
            .store((seconds * self.rate as f64) as i64, Ordering::SeqCst);
    }
    fn set_terminate_time(&self, _seconds: f64) {}
}

fn scenario_timeline(epoch: f64, sim_offset: f64) -> ScenarioTimeline {
    let sim = SimTimeline::new(Arc::new(FixedScheduler {
        tics: AtomicI64::new(0),
        rate: 1_000_000,
    }));
    let timeline =
        ScenarioTimeline::new(sim, BaseTime::new(BaseTimeUnit::Microsecond), epoch);
    timeline.set_sim_offset(sim_offset);
    timeline
}

proptest! {
    // P1: seconds -> ticks -> seconds is exact for values already on a
    // tick boundary within the representable range
    #[test]
    fn p1_base_time_round_trip(ticks in -4_000_000_000_000i64..4_000_000_000_000i64) {
        let base_time = BaseTime::new(BaseTimeUnit::Microsecond);
        let seconds = base_time.to_seconds(ticks);
        prop_assert_eq!(base_time.to_base_time(seconds), ticks);
    }

    // P2: quantize is idempotent on every timeline
    #[test]
    fn p2_quantize_idempotent(value in -1.0e6f64..1.0e6f64) {
        let timeline = scenario_timeline(0.0, 0.0);
        let once = timeline.quantize(value);
        prop_assert_eq!(timeline.quantize(once), once);
    }

    // P3: sim(scn(s)) = s and scn(sim(t)) = t within one microsecond LSB
    // over 24 hours of elapsed time
    #[test]
    fn p3_scenario_mappings_invert(
        sim_seconds in 0.0f64..86_400.0f64,
        epoch in 0.0f64..1.0e6f64,
        sim_offset in 0.0f64..1_000.0f64,
    ) {
        let timeline = scenario_timeline(epoch, sim_offset);

        let scenario = timeline.time_from_simulation_time(sim_seconds);
        prop_assert!((timeline.compute_simulation_time(scenario) - sim_seconds).abs() <= 1.0e-6);

        let scenario_seconds = epoch + sim_seconds;
        let simulation = timeline.compute_simulation_time(scenario_seconds);
        prop_assert!(
            (timeline.time_from_simulation_time(simulation) - scenario_seconds).abs() <= 1.0e-6
        );
    }

    // P3 (HLT leg): scenario -> HLT -> scenario round-trips modulo one
    // base-time tick
    #[test]
    fn p3_hlt_round_trip(
        scenario_delta in 0.0f64..86_400.0f64,
        hlt_offset in -1_000_000i64..1_000_000i64,
    ) {
        let epoch = 5_000.0;
        let timeline = scenario_timeline(epoch, 0.0);
        timeline.set_hlt_offset(LogicalTime::from_ticks(hlt_offset));

        let scenario_time = epoch + scenario_delta;
        let hlt = timeline.compute_hlt(scenario_time);
        prop_assert!((timeline.time_from_hlt(hlt) - scenario_time).abs() <= 1.0e-6);
    }

    // P4 (sequential leg): any interleaving of push/pop/next/rewind
    // delivers every pushed item exactly once by the final drain
    #[test]
    fn p4_queue_conserves_items(operations in proptest::collection::vec(0u8..4u8, 0..200)) {
        let queue: ItemQueue<AttributeItem> = ItemQueue::new();
        let mut pushed = 0u32;
        let mut popped = Vec::new();

        for operation in operations {
            match operation {
                0 | 1 => {
                    queue
                        .push(AttributeItem::copied_from(0, &pushed.to_be_bytes()))
                        .unwrap();
                    pushed += 1;
                }
                2 => {
                    if let Some(item) = queue.pop().unwrap() {
                        popped.push(item);
                    }
                }
                _ => {
                    queue.next().unwrap();
                }
            }
        }

        queue.rewind().unwrap();
        while let Some(item) = queue.pop().unwrap() {
            popped.push(item);
        }

        // A pop during a walk removes the logical (advanced) head, so the
        // global order may interleave; delivery must still be exactly-once
        prop_assert_eq!(popped.len() as u32, pushed);
        let mut seen = vec![false; pushed as usize];
        for item in &popped {
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(&item.data);
            let sequence = u32::from_be_bytes(bytes) as usize;
            prop_assert!(!seen[sequence], "item {} delivered twice", sequence);
            seen[sequence] = true;
        }
        prop_assert!(seen.into_iter().all(|was_seen| was_seen));
        prop_assert!(queue.is_empty().unwrap());
    }
}
