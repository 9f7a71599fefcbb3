//! Exclusive device session
//!
//! A `DeviceSession` only exists once the device is open, any kernel driver
//! has been detached, and the interface is claimed. Command execution takes
//! `&mut DeviceSession`, so commands are strictly sequential and can only
//! run against a fully prepared session. Dropping the session releases the
//! claim on every exit path, including errors after open.

use crate::usb::error::{DeviceError, Result};
use rusb::{Context, Device, DeviceHandle};
use std::time::Duration;
use tracing::{debug, warn};

/// The strip exposes a single interface
pub const INTERFACE: u8 = 0;

/// Kernel-driver and claim operations on one interface
///
/// `DeviceHandle` is the real implementation; tests substitute a recording
/// one to exercise the preparation sequence without hardware.
pub(crate) trait InterfaceControl {
    fn kernel_driver_active(&self, interface: u8) -> std::result::Result<bool, rusb::Error>;
    fn detach_kernel_driver(&self, interface: u8) -> std::result::Result<(), rusb::Error>;
    fn attach_kernel_driver(&self, interface: u8) -> std::result::Result<(), rusb::Error>;
    fn claim_interface(&self, interface: u8) -> std::result::Result<(), rusb::Error>;
}

impl InterfaceControl for DeviceHandle<Context> {
    fn kernel_driver_active(&self, interface: u8) -> std::result::Result<bool, rusb::Error> {
        DeviceHandle::kernel_driver_active(self, interface)
    }

    fn detach_kernel_driver(&self, interface: u8) -> std::result::Result<(), rusb::Error> {
        DeviceHandle::detach_kernel_driver(self, interface)
    }

    fn attach_kernel_driver(&self, interface: u8) -> std::result::Result<(), rusb::Error> {
        DeviceHandle::attach_kernel_driver(self, interface)
    }

    fn claim_interface(&self, interface: u8) -> std::result::Result<(), rusb::Error> {
        DeviceHandle::claim_interface(self, interface)
    }
}

/// Detach an active kernel driver, then claim the interface
///
/// Returns whether a kernel driver was detached, so the caller owes a
/// reattach on close. If the claim fails after a successful detach, the
/// driver is reattached here before the error goes up; no session value
/// exists yet at that point, so Drop cannot do it.
fn prepare_interface<H: InterfaceControl>(handle: &H, interface: u8) -> Result<bool> {
    let detached = match handle.kernel_driver_active(interface) {
        Ok(true) => {
            debug!("detaching kernel driver from interface {}", interface);
            handle
                .detach_kernel_driver(interface)
                .map_err(|source| DeviceError::KernelDetach { interface, source })?;
            true
        }
        Ok(false) => false,
        Err(e) => {
            debug!("could not check kernel driver status: {}", e);
            false
        }
    };

    if let Err(source) = handle.claim_interface(interface) {
        if detached {
            if let Err(e) = handle.attach_kernel_driver(interface) {
                debug!(
                    "could not reattach kernel driver to interface {}: {}",
                    interface, e
                );
            }
        }
        return Err(DeviceError::Claim { interface, source });
    }
    debug!("claimed interface {}", interface);

    Ok(detached)
}

/// An open, exclusively-held session to the one located device
pub struct DeviceSession {
    handle: DeviceHandle<Context>,
    /// Whether we detached a kernel driver and owe a reattach on close
    detached_kernel_driver: bool,
}

impl DeviceSession {
    /// Open the located device and prepare it for command execution
    ///
    /// Steps, in order: open the handle, detach an active kernel driver if
    /// one holds the interface (a no-op otherwise), claim the interface.
    /// Failure at any step surfaces as its own error variant.
    pub fn open(device: Device<Context>) -> Result<Self> {
        let handle = device.open().map_err(DeviceError::Open)?;
        debug!("PowerUSB device opened");

        let detached_kernel_driver = prepare_interface(&handle, INTERFACE)?;

        Ok(Self {
            handle,
            detached_kernel_driver,
        })
    }

    /// Blocking interrupt write of `data` to `endpoint`
    pub(crate) fn write_interrupt(
        &self,
        endpoint: u8,
        data: &[u8],
        timeout: Duration,
    ) -> std::result::Result<usize, rusb::Error> {
        self.handle.write_interrupt(endpoint, data, timeout)
    }

    /// Blocking interrupt read from `endpoint` into `buf`
    pub(crate) fn read_interrupt(
        &self,
        endpoint: u8,
        buf: &mut [u8],
        timeout: Duration,
    ) -> std::result::Result<usize, rusb::Error> {
        self.handle.read_interrupt(endpoint, buf, timeout)
    }
}

impl Drop for DeviceSession {
    fn drop(&mut self) {
        if let Err(e) = self.handle.release_interface(INTERFACE) {
            warn!("failed to release interface {}: {}", INTERFACE, e);
        }

        if self.detached_kernel_driver {
            // Hand the device back to the driver we displaced.
            if let Err(e) = self.handle.attach_kernel_driver(INTERFACE) {
                debug!(
                    "could not reattach kernel driver to interface {}: {}",
                    INTERFACE, e
                );
            }
        }

        debug!("PowerUSB device closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// Records the call sequence and fails where scripted
    struct MockInterface {
        kernel_driver: bool,
        fail_detach: bool,
        fail_claim: bool,
        calls: RefCell<Vec<&'static str>>,
        attach_calls: Cell<usize>,
    }

    impl MockInterface {
        fn new(kernel_driver: bool) -> Self {
            MockInterface {
                kernel_driver,
                fail_detach: false,
                fail_claim: false,
                calls: RefCell::new(Vec::new()),
                attach_calls: Cell::new(0),
            }
        }
    }

    impl InterfaceControl for MockInterface {
        fn kernel_driver_active(&self, _: u8) -> std::result::Result<bool, rusb::Error> {
            self.calls.borrow_mut().push("active?");
            Ok(self.kernel_driver)
        }

        fn detach_kernel_driver(&self, _: u8) -> std::result::Result<(), rusb::Error> {
            self.calls.borrow_mut().push("detach");
            if self.fail_detach {
                Err(rusb::Error::Access)
            } else {
                Ok(())
            }
        }

        fn attach_kernel_driver(&self, _: u8) -> std::result::Result<(), rusb::Error> {
            self.calls.borrow_mut().push("attach");
            self.attach_calls.set(self.attach_calls.get() + 1);
            Ok(())
        }

        fn claim_interface(&self, _: u8) -> std::result::Result<(), rusb::Error> {
            self.calls.borrow_mut().push("claim");
            if self.fail_claim {
                Err(rusb::Error::Busy)
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_no_kernel_driver_goes_straight_to_claim() {
        let mock = MockInterface::new(false);
        let detached = prepare_interface(&mock, INTERFACE).unwrap();
        assert!(!detached);
        assert_eq!(*mock.calls.borrow(), vec!["active?", "claim"]);
    }

    #[test]
    fn test_active_kernel_driver_is_detached_once() {
        let mock = MockInterface::new(true);
        let detached = prepare_interface(&mock, INTERFACE).unwrap();
        assert!(detached);
        assert_eq!(*mock.calls.borrow(), vec!["active?", "detach", "claim"]);
    }

    #[test]
    fn test_detach_failure_stops_before_claim() {
        let mut mock = MockInterface::new(true);
        mock.fail_detach = true;

        let err = prepare_interface(&mock, INTERFACE).unwrap_err();
        assert!(matches!(
            err,
            DeviceError::KernelDetach {
                interface: INTERFACE,
                source: rusb::Error::Access,
            }
        ));
        assert!(!mock.calls.borrow().contains(&"claim"));
    }

    #[test]
    fn test_claim_failure_reattaches_displaced_driver() {
        let mut mock = MockInterface::new(true);
        mock.fail_claim = true;

        let err = prepare_interface(&mock, INTERFACE).unwrap_err();
        assert!(matches!(
            err,
            DeviceError::Claim {
                interface: INTERFACE,
                source: rusb::Error::Busy,
            }
        ));
        assert_eq!(mock.attach_calls.get(), 1, "displaced driver must come back");
    }

    #[test]
    fn test_claim_failure_without_detach_leaves_driver_alone() {
        let mut mock = MockInterface::new(false);
        mock.fail_claim = true;

        assert!(matches!(
            prepare_interface(&mock, INTERFACE),
            Err(DeviceError::Claim { .. })
        ));
        assert_eq!(mock.attach_calls.get(), 0);
    }
}
