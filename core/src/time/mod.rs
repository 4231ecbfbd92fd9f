//! The multi-timeline time model: the process-wide base-time tick unit,
//! the abstract timeline contract, and the four concrete timelines a
//! federate keeps coupled (simulation, scenario, HLA logical time, CTE).

pub mod base_time;
pub mod clock;
pub mod cte_timeline;
pub mod error;
pub mod hlt_timeline;
pub mod logical_time;
pub mod scenario_timeline;
pub mod sim_timeline;
pub mod timeline;
