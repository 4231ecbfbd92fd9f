use std::{thread, time::Duration};

use log::warn;

use crate::config::RetryPolicy;

use super::error::RtiError;

/// Run `operation`, retrying transient RTI faults with doubling, jittered
/// backoff. Structural faults and exhausted retries return the last error
/// for the state machine to convert into a shutdown.
pub fn retry_transient<T>(
    policy: &RetryPolicy,
    what: &str,
    mut operation: impl FnMut() -> Result<T, RtiError>,
) -> Result<T, RtiError> {
    let mut backoff = policy.initial_backoff;
    let mut attempt = 0u32;
    loop {
        match operation() {
            Ok(value) => return Ok(value),
            Err(rti_error) if rti_error.is_transient() && attempt < policy.max_retries => {
                attempt += 1;
                // Jitter at 50-100% of the nominal delay keeps retry bursts
                // from lining up across federates
                let jittered = backoff.mul_f32(0.5 + fastrand::f32() * 0.5);
                warn!(
                    "{} failed ({}), retry {}/{} in {:?}",
                    what, rti_error, attempt, policy.max_retries, jittered
                );
                thread::sleep(jittered);
                backoff = (backoff * 2).min(policy.max_backoff);
            }
            Err(rti_error) => return Err(rti_error),
        }
    }
}

/// Sleep bound used when only a single short wait is appropriate.
pub const FINAL_ACHIEVE_DEADLINE: Duration = Duration::from_secs(1);
