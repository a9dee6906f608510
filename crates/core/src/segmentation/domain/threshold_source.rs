use std::sync::{Arc, RwLock};

use crate::shared::threshold_config::ThresholdConfig;

/// Supplies the skin threshold range at the start of each frame.
///
/// The pipeline never stores the returned value; an operator may retune the
/// source between frames and the next frame picks up the change.
pub trait ThresholdSource: Send {
    fn current(&mut self) -> ThresholdConfig;
}

/// A range that never changes during the run.
pub struct FixedThresholds(pub ThresholdConfig);

impl ThresholdSource for FixedThresholds {
    fn current(&mut self) -> ThresholdConfig {
        self.0
    }
}

/// A range shared with another thread (a tuning UI, a control socket...).
///
/// Writers replace the whole config under the lock, so a frame always sees
/// a consistent set of six bounds.
#[derive(Clone, Default)]
pub struct SharedThresholds {
    inner: Arc<RwLock<ThresholdConfig>>,
}

impl SharedThresholds {
    pub fn new(initial: ThresholdConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn set(&self, cfg: ThresholdConfig) {
        match self.inner.write() {
            Ok(mut guard) => *guard = cfg,
            Err(poisoned) => *poisoned.into_inner() = cfg,
        }
    }
}

impl ThresholdSource for SharedThresholds {
    fn current(&mut self) -> ThresholdConfig {
        match self.inner.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_returns_same_value() {
        let cfg = ThresholdConfig {
            low_v: 10,
            ..ThresholdConfig::default()
        };
        let mut source = FixedThresholds(cfg);
        assert_eq!(source.current(), cfg);
        assert_eq!(source.current(), cfg);
    }

    #[test]
    fn test_shared_sees_updates_from_other_handle() {
        let mut reader = SharedThresholds::new(ThresholdConfig::default());
        let writer = reader.clone();
        assert_eq!(reader.current().low_v, 165);

        writer.set(ThresholdConfig {
            low_v: 90,
            ..ThresholdConfig::default()
        });
        assert_eq!(reader.current().low_v, 90);
    }

    #[test]
    fn test_shared_update_from_thread() {
        let mut reader = SharedThresholds::default();
        let writer = reader.clone();
        std::thread::spawn(move || {
            writer.set(ThresholdConfig {
                high_h: 25,
                ..ThresholdConfig::default()
            })
        })
        .join()
        .unwrap();
        assert_eq!(reader.current().high_h, 25);
    }
}
