use std::time::{Instant, SystemTime};

use super::error::TimeError;

/// A wall-clock capability used by the CTE timeline.
///
/// `init` must run before the first `time` read; a source whose device is
/// unreachable reports the failure from `init` so the federate can degrade
/// locally without taking the federation down.
pub trait ClockSource: Send + Sync {
    /// One-time setup (device open, origin capture).
    fn init(&mut self) -> Result<(), TimeError>;

    /// Current time in seconds on this clock's scale.
    fn time(&self) -> Result<f64, TimeError>;

    /// Smallest reportable step, in seconds.
    fn min_resolution(&self) -> f64;

    /// Release the underlying device, if any.
    fn stop(&mut self);

    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;
}

/// System clock flavors: a monotonic reading anchored at `init`, or the
/// realtime clock (which may step; readers must simply re-read).
pub enum SystemClock {
    Monotonic { origin: Option<Instant> },
    Realtime,
}

impl SystemClock {
    pub fn monotonic() -> Self {
        SystemClock::Monotonic { origin: None }
    }

    pub fn realtime() -> Self {
        SystemClock::Realtime
    }
}

impl ClockSource for SystemClock {
    fn init(&mut self) -> Result<(), TimeError> {
        if let SystemClock::Monotonic { origin } = self {
            *origin = Some(Instant::now());
        }
        Ok(())
    }

    fn time(&self) -> Result<f64, TimeError> {
        match self {
            SystemClock::Monotonic { origin } => {
                let Some(origin) = origin else {
                    return Err(TimeError::ClockNotInitialized {
                        source_name: "monotonic",
                    });
                };
                Ok(origin.elapsed().as_secs_f64())
            }
            SystemClock::Realtime => SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .map(|duration| duration.as_secs_f64())
                .map_err(|_| TimeError::SystemTimeBeforeEpoch),
        }
    }

    fn min_resolution(&self) -> f64 {
        1.0e-9
    }

    fn stop(&mut self) {}

    fn name(&self) -> &'static str {
        match self {
            SystemClock::Monotonic { .. } => "monotonic",
            SystemClock::Realtime => "realtime",
        }
    }
}

cfg_if! {
    if #[cfg(unix)] {
        use std::{fs::File, os::unix::fs::FileExt, path::PathBuf};

        /// External PCIe timing hardware exposed as a device node carrying a
        /// 64-bit little-endian nanosecond register at offset zero.
        pub struct HardwareCte {
            device_path: PathBuf,
            device: Option<File>,
        }

        impl HardwareCte {
            pub fn new(device_path: impl Into<PathBuf>) -> Self {
                Self {
                    device_path: device_path.into(),
                    device: None,
                }
            }

            pub fn device_path(&self) -> &std::path::Path {
                &self.device_path
            }
        }

        impl ClockSource for HardwareCte {
            fn init(&mut self) -> Result<(), TimeError> {
                let device = File::open(&self.device_path).map_err(|io_error| {
                    TimeError::ClockUnavailable {
                        source_name: "hardware CTE",
                        detail: format!("{}: {}", self.device_path.display(), io_error),
                    }
                })?;
                self.device = Some(device);
                Ok(())
            }

            fn time(&self) -> Result<f64, TimeError> {
                let device = self.device.as_ref().ok_or(TimeError::ClockNotInitialized {
                    source_name: "hardware CTE",
                })?;
                let mut register = [0u8; 8];
                device.read_exact_at(&mut register, 0).map_err(|io_error| {
                    TimeError::ClockUnavailable {
                        source_name: "hardware CTE",
                        detail: format!("{}: {}", self.device_path.display(), io_error),
                    }
                })?;
                let nanoseconds = u64::from_le_bytes(register);
                Ok(nanoseconds as f64 / 1.0e9)
            }

            fn min_resolution(&self) -> f64 {
                1.0e-9
            }

            fn stop(&mut self) {
                self.device = None;
            }

            fn name(&self) -> &'static str {
                "hardware CTE"
            }
        }
    } else {
        use std::path::PathBuf;

        /// Timing hardware is only reachable on unix targets; elsewhere the
        /// variant exists but always degrades at init.
        pub struct HardwareCte {
            device_path: PathBuf,
        }

        impl HardwareCte {
            pub fn new(device_path: impl Into<PathBuf>) -> Self {
                Self {
                    device_path: device_path.into(),
                }
            }
        }

        impl ClockSource for HardwareCte {
            fn init(&mut self) -> Result<(), TimeError> {
                Err(TimeError::ClockUnavailable {
                    source_name: "hardware CTE",
                    detail: format!(
                        "{}: device access unsupported on this platform",
                        self.device_path.display()
                    ),
                })
            }

            fn time(&self) -> Result<f64, TimeError> {
                Err(TimeError::ClockNotInitialized {
                    source_name: "hardware CTE",
                })
            }

            fn min_resolution(&self) -> f64 {
                1.0e-9
            }

            fn stop(&mut self) {}

            fn name(&self) -> &'static str {
                "hardware CTE"
            }
        }
    }
}
