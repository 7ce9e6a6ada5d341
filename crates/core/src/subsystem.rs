use std::sync::atomic::{AtomicBool, Ordering};

use crate::Connector;

static INITIALIZED: AtomicBool = AtomicBool::new(false);

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SubsystemError {
    #[error("network subsystem is already initialized")]
    AlreadyInitialized,
}

/// Scope during which socket operations are allowed.
///
/// At most one guard exists per process at a time. Dropping it tears the
/// subsystem down, so teardown also happens on early returns and unwinding.
/// A [`Connector`] borrows the guard, which keeps connection attempts inside
/// the initialized scope.
#[derive(Debug)]
pub struct NetworkSubsystem {
    _private: (),
}

impl NetworkSubsystem {
    /// Initialize the subsystem. Fails if another guard is still alive.
    pub fn init() -> Result<Self, SubsystemError> {
        if INITIALIZED
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SubsystemError::AlreadyInitialized);
        }
        tracing::info!("network subsystem initialized");
        Ok(Self { _private: () })
    }

    /// Whether a guard is currently alive.
    pub fn is_initialized() -> bool {
        INITIALIZED.load(Ordering::Acquire)
    }

    /// Connector bound to this subsystem scope.
    pub fn connector(&self) -> Connector<'_> {
        Connector::new(self)
    }
}

impl Drop for NetworkSubsystem {
    fn drop(&mut self) {
        INITIALIZED.store(false, Ordering::Release);
        tracing::info!("network subsystem torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn second_init_is_rejected() {
        let net = NetworkSubsystem::init().unwrap();
        assert!(NetworkSubsystem::is_initialized());
        assert_eq!(
            NetworkSubsystem::init().unwrap_err(),
            SubsystemError::AlreadyInitialized
        );
        drop(net);
    }

    #[test]
    #[serial]
    fn drop_allows_reinit() {
        drop(NetworkSubsystem::init().unwrap());
        assert!(!NetworkSubsystem::is_initialized());
        let net = NetworkSubsystem::init().unwrap();
        assert!(NetworkSubsystem::is_initialized());
        drop(net);
    }

    #[test]
    #[serial]
    fn teardown_runs_on_early_return() {
        fn fails_midway() -> Result<(), SubsystemError> {
            let _net = NetworkSubsystem::init()?;
            Err(SubsystemError::AlreadyInitialized)
        }

        assert!(fails_midway().is_err());
        assert!(!NetworkSubsystem::is_initialized());
    }
}
