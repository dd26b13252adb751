//! Extension point for mirroring turbine state on an accelerator device.
//!
//! The turbine computation always runs on the host. A backend may keep a
//! device-resident copy of each turbine's footprint between
//! [`Windfarm::prepare_device`](crate::farm::Windfarm::prepare_device) and
//! [`Windfarm::clear_device`](crate::farm::Windfarm::clear_device); results
//! must not depend on which backend is installed.

use crate::turbine::Footprint;

/// Capability a device backend may implement.
///
/// Both hooks default to doing nothing, so a backend opts into whichever
/// part of the lifecycle it needs.
pub trait AccelerationBackend {
    /// Called once per turbine at startup with its final footprint.
    fn upload(&mut self, _turbine: usize, _footprint: &Footprint) {}

    /// Called once per turbine at teardown.
    fn release(&mut self, _turbine: usize) {}

    /// Returns a human-readable backend name.
    fn name(&self) -> &'static str;
}

/// Backend that keeps everything on the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostOnly;

impl AccelerationBackend for HostOnly {
    fn name(&self) -> &'static str {
        "host"
    }
}
