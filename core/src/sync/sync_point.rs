/// Lifecycle of one named synchronization point as seen by this federate.
///
/// ```text
/// Known -> Registered -> Announced -> Achieved -> Synchronized
/// ```
///
/// `Registered` is skipped for points another federate registered;
/// `Synchronized` may be entered directly for points that were already
/// federation-wide synchronized when this federate joined. Any other jump
/// lands the record in `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPointState {
    Known,
    Registered,
    Announced,
    Achieved,
    Synchronized,
    Error,
}

/// One sync-point record: state plus the user tag delivered with the
/// announcement. Records live from registration until federation-wide
/// synchronized (and are kept after that for state queries).
#[derive(Debug, Clone)]
pub struct SyncPoint {
    pub state: SyncPointState,
    pub tag: Vec<u8>,
}

impl SyncPoint {
    pub fn known() -> Self {
        Self {
            state: SyncPointState::Known,
            tag: Vec::new(),
        }
    }

    pub fn is_achieved(&self) -> bool {
        matches!(
            self.state,
            SyncPointState::Achieved | SyncPointState::Synchronized
        )
    }

    pub fn is_synchronized(&self) -> bool {
        self.state == SyncPointState::Synchronized
    }
}
