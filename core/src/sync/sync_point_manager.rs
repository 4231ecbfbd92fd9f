use std::{
    collections::HashMap,
    sync::{Arc, Condvar, Mutex, MutexGuard},
    time::{Duration, Instant},
};

use log::{debug, info, warn};

use super::{
    error::SyncError,
    sync_point::{SyncPoint, SyncPointState},
};

/// Tracks the registered/announced/achieved/synchronized lifecycle of every
/// named sync point this federate touches.
///
/// The handle is cloneable; the callback-thread listener holds one clone
/// and moves states under the table lock, while the simulator thread waits
/// on the condvar with a deadline.
#[derive(Clone, Default)]
pub struct SyncPointManager {
    shared: Arc<SyncPointTable>,
}

#[derive(Default)]
struct SyncPointTable {
    points: Mutex<HashMap<String, SyncPoint>>,
    changed: Condvar,
}

impl SyncPointManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, SyncPoint>>, SyncError> {
        self.shared
            .points
            .lock()
            .map_err(|_| SyncError::LockPoisoned)
    }

    /// Record a locally initiated registration. The RTI call itself is the
    /// caller's job; this installs the `Registered` record the callbacks
    /// will advance.
    pub fn mark_registered(&self, label: &str) -> Result<(), SyncError> {
        let mut points = self.lock()?;
        let point = points
            .entry(label.to_string())
            .or_insert_with(SyncPoint::known);
        match point.state {
            // A synchronized record's lifecycle is over; re-registering
            // the label starts a fresh round (freeze gates are reused)
            SyncPointState::Known | SyncPointState::Synchronized => {
                point.state = SyncPointState::Registered;
                point.tag.clear();
                debug!("sync point \"{}\" registered", label);
                Ok(())
            }
            from => Err(SyncError::InvalidTransition {
                label: label.to_string(),
                from,
                operation: "be registered",
            }),
        }
    }

    /// Callback-thread entry: the RTI announced the point to this federate.
    pub fn on_announce(&self, label: &str, tag: &[u8]) -> Result<(), SyncError> {
        let mut points = self.lock()?;
        let point = points
            .entry(label.to_string())
            .or_insert_with(SyncPoint::known);
        match point.state {
            SyncPointState::Known
            | SyncPointState::Registered
            | SyncPointState::Synchronized => {
                point.state = SyncPointState::Announced;
                point.tag = tag.to_vec();
                info!("sync point \"{}\" announced", label);
                self.shared.changed.notify_all();
                Ok(())
            }
            from => {
                point.state = SyncPointState::Error;
                self.shared.changed.notify_all();
                Err(SyncError::InvalidTransition {
                    label: label.to_string(),
                    from,
                    operation: "be announced",
                })
            }
        }
    }

    /// Record that this federate achieved the point. The RTI achieve call
    /// is the caller's job.
    pub fn mark_achieved(&self, label: &str) -> Result<(), SyncError> {
        let mut points = self.lock()?;
        let point = points
            .get_mut(label)
            .ok_or_else(|| SyncError::UnknownLabel {
                label: label.to_string(),
            })?;
        match point.state {
            SyncPointState::Announced => {
                point.state = SyncPointState::Achieved;
                debug!("sync point \"{}\" achieved", label);
                self.shared.changed.notify_all();
                Ok(())
            }
            from => {
                point.state = SyncPointState::Error;
                self.shared.changed.notify_all();
                Err(SyncError::InvalidTransition {
                    label: label.to_string(),
                    from,
                    operation: "be achieved",
                })
            }
        }
    }

    /// Callback-thread entry: the RTI reported the whole federation
    /// synchronized on the point.
    ///
    /// A label with no local record is legal here: a late joiner learns of
    /// points that synchronized before it arrived, and reports them
    /// `Synchronized` without ever having seen them `Announced`.
    pub fn on_synchronized(&self, label: &str) -> Result<(), SyncError> {
        let mut points = self.lock()?;
        let point = points
            .entry(label.to_string())
            .or_insert_with(SyncPoint::known);
        match point.state {
            SyncPointState::Achieved | SyncPointState::Known => {
                point.state = SyncPointState::Synchronized;
                info!("sync point \"{}\" synchronized", label);
                self.shared.changed.notify_all();
                Ok(())
            }
            // A duplicate report is harmless
            SyncPointState::Synchronized => Ok(()),
            from => {
                point.state = SyncPointState::Error;
                self.shared.changed.notify_all();
                Err(SyncError::InvalidTransition {
                    label: label.to_string(),
                    from,
                    operation: "be synchronized",
                })
            }
        }
    }

    /// Callback-thread entry: registration raced with another federate.
    /// Not an error; the announcement will arrive regardless of who won.
    pub fn on_registration_failed(&self, label: &str) {
        warn!(
            "sync point \"{}\" already registered by another federate",
            label
        );
    }

    pub fn state(&self, label: &str) -> Result<SyncPointState, SyncError> {
        let points = self.lock()?;
        points
            .get(label)
            .map(|point| point.state)
            .ok_or_else(|| SyncError::UnknownLabel {
                label: label.to_string(),
            })
    }

    pub fn is_announced(&self, label: &str) -> bool {
        matches!(
            self.state(label),
            Ok(SyncPointState::Announced)
                | Ok(SyncPointState::Achieved)
                | Ok(SyncPointState::Synchronized)
        )
    }

    pub fn is_synchronized(&self, label: &str) -> bool {
        matches!(self.state(label), Ok(SyncPointState::Synchronized))
    }

    /// Block the simulator thread until the point is announced or the
    /// deadline passes.
    pub fn wait_for_announced(&self, label: &str, deadline: Duration) -> Result<(), SyncError> {
        self.wait_for(label, deadline, |point| {
            matches!(
                point.state,
                SyncPointState::Announced
                    | SyncPointState::Achieved
                    | SyncPointState::Synchronized
            )
        })
    }

    /// Block the simulator thread until the federation synchronizes on the
    /// point or the deadline passes.
    pub fn wait_for_synchronized(&self, label: &str, deadline: Duration) -> Result<(), SyncError> {
        self.wait_for(label, deadline, |point| point.is_synchronized())
    }

    fn wait_for(
        &self,
        label: &str,
        deadline: Duration,
        reached: impl Fn(&SyncPoint) -> bool,
    ) -> Result<(), SyncError> {
        let started = Instant::now();
        let mut points = self.lock()?;
        loop {
            if let Some(point) = points.get(label) {
                if reached(point) {
                    return Ok(());
                }
                if point.state == SyncPointState::Error {
                    return Err(SyncError::InvalidTransition {
                        label: label.to_string(),
                        from: SyncPointState::Error,
                        operation: "be waited on",
                    });
                }
            }
            let elapsed = started.elapsed();
            if elapsed >= deadline {
                return Err(SyncError::WaitTimeout {
                    label: label.to_string(),
                    waited: elapsed,
                });
            }
            let (guard, wait_result) = self
                .shared
                .changed
                .wait_timeout(points, deadline - elapsed)
                .map_err(|_| SyncError::LockPoisoned)?;
            points = guard;
            if wait_result.timed_out() {
                return Err(SyncError::WaitTimeout {
                    label: label.to_string(),
                    waited: started.elapsed(),
                });
            }
        }
    }
}
