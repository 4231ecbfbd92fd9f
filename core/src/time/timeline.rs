/// One of the coupled timelines a federate keeps in step: simulation time,
/// scenario time, HLA logical time, or the central timing equipment.
///
/// All times are in seconds on the timeline's own scale; `epoch` anchors
/// the timeline to its origin.
pub trait Timeline {
    /// Current time on this timeline, in seconds.
    fn time(&self) -> f64;

    /// The smallest representable time step, in seconds.
    fn min_resolution(&self) -> f64;

    /// The timeline origin, in seconds.
    fn epoch(&self) -> f64 {
        0.0
    }

    /// Seconds elapsed since the epoch.
    fn elapsed_time(&self) -> f64 {
        self.time() - self.epoch()
    }

    /// Truncate `value` to a whole multiple of the minimum resolution.
    ///
    /// Values already on a resolution boundary (within floating-point
    /// noise) are left on it, which keeps the operation idempotent.
    fn quantize(&self, value: f64) -> f64 {
        let resolution = self.min_resolution();
        if resolution <= 0.0 {
            return value;
        }
        let steps = value / resolution;
        let nearest = steps.round();
        // The tolerance scales with magnitude so re-quantizing an already
        // quantized value always lands back on its own boundary
        let tolerance = 1.0e-9 + steps.abs() * 1.0e-12;
        let whole = if (steps - nearest).abs() <= tolerance {
            nearest
        } else {
            steps.trunc()
        };
        whole * resolution
    }
}
