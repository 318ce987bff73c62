//! Lookup tables derived from a car-control configuration.
//!
//! Three maps keyed by [`ControllerKey`]: bool controllers (power and toggle),
//! mode controllers, and range controllers. Power controllers are keyed by the
//! endpoint id alone; every other controller by `endpoint#instance`.

use crate::config::{Capability, CarControlConfig, ControllerKey, Endpoint, EndpointId, Interface};
use crate::controllers::{BoolController, ControllerError, ModeController, RangeController};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndexError {
    #[error("{interface} capability on endpoint {endpoint} has no instance")]
    MissingInstance {
        endpoint: EndpointId,
        interface: Interface,
    },
    #[error("range controller {key}: {source}")]
    InvalidRange {
        key: ControllerKey,
        source: ControllerError,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryCounts {
    pub bools: usize,
    pub modes: usize,
    pub ranges: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControllerRegistry {
    bools: BTreeMap<ControllerKey, BoolController>,
    modes: BTreeMap<ControllerKey, ModeController>,
    ranges: BTreeMap<ControllerKey, RangeController>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every power/toggle/mode/range capability declared in `config`.
    ///
    /// Mode controllers without values and range controllers without a
    /// supported range are skipped; they declare nothing to look up. Other
    /// interfaces are ignored. A later declaration of the same key replaces
    /// an earlier one.
    pub fn from_config(config: &CarControlConfig) -> Result<Self, IndexError> {
        let mut registry = Self::new();
        for endpoint in &config.endpoints {
            for capability in &endpoint.capabilities {
                registry.index_capability(endpoint, capability)?;
            }
        }
        Ok(registry)
    }

    fn index_capability(
        &mut self,
        endpoint: &Endpoint,
        capability: &Capability,
    ) -> Result<(), IndexError> {
        let configuration = capability.configuration.as_ref();
        match &capability.interface {
            Interface::Power => {
                let key = ControllerKey::endpoint(endpoint.endpoint_id.clone());
                debug!(%key, "indexed power controller");
                self.bools.insert(key, BoolController::new());
            }
            Interface::Toggle => {
                let key = instance_key(endpoint, capability)?;
                debug!(%key, "indexed toggle controller");
                self.bools.insert(key, BoolController::new());
            }
            Interface::Mode => {
                let key = instance_key(endpoint, capability)?;
                let modes = configuration
                    .map(|c| c.supported_modes.as_slice())
                    .unwrap_or_default();
                if modes.is_empty() {
                    warn!(%key, "mode controller declares no modes; skipped");
                    return Ok(());
                }
                let mut controller = ModeController::new();
                for mode in modes {
                    controller.add_mode(mode.value.clone());
                }
                debug!(%key, modes = controller.modes().len(), "indexed mode controller");
                self.modes.insert(key, controller);
            }
            Interface::Range => {
                let key = instance_key(endpoint, capability)?;
                let Some(range) = configuration.and_then(|c| c.supported_range.as_ref()) else {
                    warn!(%key, "range controller declares no range; skipped");
                    return Ok(());
                };
                let controller = RangeController::new(range.minimum_value, range.maximum_value)
                    .map_err(|source| IndexError::InvalidRange {
                        key: key.clone(),
                        source,
                    })?;
                debug!(
                    %key,
                    minimum = controller.minimum(),
                    maximum = controller.maximum(),
                    "indexed range controller"
                );
                self.ranges.insert(key, controller);
            }
            Interface::Other(name) => {
                debug!(endpoint = %endpoint.endpoint_id, interface = %name, "ignoring interface");
            }
        }
        Ok(())
    }

    /// Copy every entry from `other` into `self`; `other` wins on key collisions.
    pub fn merge(&mut self, other: ControllerRegistry) {
        self.bools.extend(other.bools);
        self.modes.extend(other.modes);
        self.ranges.extend(other.ranges);
    }

    pub fn bool_controller(&self, endpoint: &str, instance: Option<&str>) -> Option<&BoolController> {
        self.bools.get(&ControllerKey::lookup(endpoint, instance))
    }

    pub fn bool_controller_mut(
        &mut self,
        endpoint: &str,
        instance: Option<&str>,
    ) -> Option<&mut BoolController> {
        self.bools.get_mut(&ControllerKey::lookup(endpoint, instance))
    }

    pub fn mode_controller(&self, endpoint: &str, instance: &str) -> Option<&ModeController> {
        self.modes.get(&ControllerKey::lookup(endpoint, Some(instance)))
    }

    pub fn mode_controller_mut(
        &mut self,
        endpoint: &str,
        instance: &str,
    ) -> Option<&mut ModeController> {
        self.modes
            .get_mut(&ControllerKey::lookup(endpoint, Some(instance)))
    }

    pub fn range_controller(&self, endpoint: &str, instance: &str) -> Option<&RangeController> {
        self.ranges.get(&ControllerKey::lookup(endpoint, Some(instance)))
    }

    pub fn range_controller_mut(
        &mut self,
        endpoint: &str,
        instance: &str,
    ) -> Option<&mut RangeController> {
        self.ranges
            .get_mut(&ControllerKey::lookup(endpoint, Some(instance)))
    }

    pub fn bools(&self) -> impl Iterator<Item = (&ControllerKey, &BoolController)> {
        self.bools.iter()
    }

    pub fn modes(&self) -> impl Iterator<Item = (&ControllerKey, &ModeController)> {
        self.modes.iter()
    }

    pub fn ranges(&self) -> impl Iterator<Item = (&ControllerKey, &RangeController)> {
        self.ranges.iter()
    }

    /// Resolve a parsed key against all three tables.
    pub fn find(&self, key: &ControllerKey) -> Option<ControllerRef<'_>> {
        if let Some(controller) = self.bools.get(key) {
            return Some(ControllerRef::Bool(controller));
        }
        if let Some(controller) = self.modes.get(key) {
            return Some(ControllerRef::Mode(controller));
        }
        self.ranges.get(key).map(ControllerRef::Range)
    }

    pub fn counts(&self) -> RegistryCounts {
        RegistryCounts {
            bools: self.bools.len(),
            modes: self.modes.len(),
            ranges: self.ranges.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bools.is_empty() && self.modes.is_empty() && self.ranges.is_empty()
    }
}

/// A controller found by [`ControllerRegistry::find`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerRef<'a> {
    Bool(&'a BoolController),
    Mode(&'a ModeController),
    Range(&'a RangeController),
}

fn instance_key(endpoint: &Endpoint, capability: &Capability) -> Result<ControllerKey, IndexError> {
    match capability.instance.as_ref().filter(|id| !id.0.is_empty()) {
        Some(instance) => Ok(ControllerKey::new(
            endpoint.endpoint_id.clone(),
            Some(instance.clone()),
        )),
        None => Err(IndexError::MissingInstance {
            endpoint: endpoint.endpoint_id.clone(),
            interface: capability.interface.clone(),
        }),
    }
}
