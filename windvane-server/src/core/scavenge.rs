use tracing::trace;

/// Decides, cheaply, whether a cache should schedule a background sweep
/// after an insert. The trigger is a hint, not a correctness mechanism:
/// lazy expiration on reads is the backstop either way.
pub trait ScavengeTrigger: Send + Sync {
    fn should_scavenge(&self) -> bool;
}

/// Default trigger: fires when the ratio of available to total system
/// memory drops below a threshold. Any failure reading the counters is
/// treated as "do not scavenge now".
#[derive(Debug, Clone)]
pub struct MemoryPressureTrigger {
    threshold: f64,
}

impl MemoryPressureTrigger {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Default for MemoryPressureTrigger {
    fn default() -> Self {
        Self::new(0.10)
    }
}

impl ScavengeTrigger for MemoryPressureTrigger {
    fn should_scavenge(&self) -> bool {
        match sys_info::mem_info() {
            Ok(mem) if mem.total > 0 => {
                let ratio = mem.avail as f64 / mem.total as f64;
                trace!("Memory pressure probe: avail/total={:.3}", ratio);
                ratio < self.threshold
            }
            _ => false,
        }
    }
}

/// Trigger that never fires; used where proactive sweeping is unwanted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverTrigger;

impl ScavengeTrigger for NeverTrigger {
    fn should_scavenge(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_threshold_never_fires() {
        let trigger = MemoryPressureTrigger::new(0.0);
        assert!(!trigger.should_scavenge());
    }

    #[test]
    fn full_threshold_fires_when_counters_available() {
        // With threshold 1.0 the probe fires whenever mem_info succeeds;
        // on platforms where it fails the trigger must stay silent.
        let trigger = MemoryPressureTrigger::new(1.0);
        let expected = sys_info::mem_info().map(|m| m.total > 0).unwrap_or(false);
        assert_eq!(trigger.should_scavenge(), expected);
    }

    #[test]
    fn never_trigger_is_silent() {
        assert!(!NeverTrigger.should_scavenge());
    }
}
