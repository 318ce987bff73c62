//! Fluent builder for car-control configurations.
//!
//! The builder keeps a cursor on the most recently opened item (zone,
//! endpoint, controller, mode value, or preset) so chained calls read like the
//! document they produce:
//!
//! ```text
//! builder
//!     .create_endpoint("driver.fan")
//!         .add_asset_id(device::FAN)
//!         .add_power_controller(false)
//!         .add_range_controller("speed", false, 1.0, 10.0, 1.0)
//!             .add_preset(1.0)
//!                 .add_asset_id(value::LOW);
//! ```
//!
//! Misuse (a preset on a mode controller, members without a zone) is recorded
//! rather than reported immediately; `build` surfaces the first such error and
//! then validates cross references across the whole document.

use crate::config::identity::{
    AssetId, ControllerId, ControllerKey, EndpointId, Interface, ZoneId,
};
use crate::config::model::{
    ActionMapping, Capability, CarControlConfig, Configuration, Endpoint, Preset, Resources,
    SupportedMode, Zone, ZoneMember,
};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use thiserror::Error;

const TURN_ON: &str = "TurnOn";
const TURN_OFF: &str = "TurnOff";
const SET_MODE: &str = "SetMode";
const ADJUST_MODE: &str = "AdjustMode";
const SET_RANGE_VALUE: &str = "SetRangeValue";
const ADJUST_RANGE_VALUE: &str = "AdjustRangeValue";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("{operation} requires an open {expected}")]
    NoOpenItem {
        operation: &'static str,
        expected: &'static str,
    },
    #[error("{operation} is not valid on {interface} controller {key}")]
    WrongController {
        operation: &'static str,
        interface: Interface,
        key: ControllerKey,
    },
    #[error("{operation} requires at least one action")]
    EmptyActions { operation: &'static str },
    #[error("endpoint id must not be empty")]
    EmptyEndpointId,
    #[error("zone id must not be empty")]
    EmptyZoneId,
    #[error("{interface} controller on endpoint {endpoint} has an empty instance")]
    EmptyInstance {
        endpoint: EndpointId,
        interface: Interface,
    },
    #[error("mode controller {0} declares an empty value")]
    EmptyModeValue(ControllerKey),
    #[error("duplicate endpoint id {0}")]
    DuplicateEndpoint(EndpointId),
    #[error("duplicate zone id {0}")]
    DuplicateZone(ZoneId),
    #[error("duplicate controller {0}")]
    DuplicateController(ControllerKey),
    #[error("zone {zone} references undefined endpoint {endpoint}")]
    UnknownZoneMember { zone: ZoneId, endpoint: EndpointId },
    #[error("default zone {0} is not defined")]
    UnknownDefaultZone(ZoneId),
    #[error("range controller {key} has minimum {minimum} above maximum {maximum}")]
    InvalidRange {
        key: ControllerKey,
        minimum: f64,
        maximum: f64,
    },
    #[error("range controller {key} has non-positive precision {precision}")]
    InvalidPrecision { key: ControllerKey, precision: f64 },
    #[error("value {value} on range controller {key} is outside the supported range")]
    ValueOutOfRange { key: ControllerKey, value: f64 },
    #[error("mode controller {0} declares no values")]
    EmptyModes(ControllerKey),
    #[error("mode controller {key} declares value {value} more than once")]
    DuplicateMode { key: ControllerKey, value: String },
    #[error("action on mode controller {key} targets undeclared mode {value}")]
    UnknownMode { key: ControllerKey, value: String },
    #[error("mode controller {0} must be ordered to adjust modes")]
    UnorderedAdjust(ControllerKey),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Cursor {
    #[default]
    None,
    Zone(usize),
    Endpoint(usize),
    Controller {
        endpoint: usize,
        capability: usize,
    },
    ModeValue {
        endpoint: usize,
        capability: usize,
        value: usize,
    },
    Preset {
        endpoint: usize,
        capability: usize,
        preset: usize,
    },
}

impl Cursor {
    fn endpoint(self) -> Option<usize> {
        match self {
            Cursor::Endpoint(endpoint)
            | Cursor::Controller { endpoint, .. }
            | Cursor::ModeValue { endpoint, .. }
            | Cursor::Preset { endpoint, .. } => Some(endpoint),
            Cursor::None | Cursor::Zone(_) => None,
        }
    }

    fn controller(self) -> Option<(usize, usize)> {
        match self {
            Cursor::Controller {
                endpoint,
                capability,
            }
            | Cursor::ModeValue {
                endpoint,
                capability,
                ..
            }
            | Cursor::Preset {
                endpoint,
                capability,
                ..
            } => Some((endpoint, capability)),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct CarControlConfigBuilder {
    config: CarControlConfig,
    cursor: Cursor,
    error: Option<BuildError>,
}

impl CarControlConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a zone; subsequent `add_asset_id`/`add_members` calls apply to it.
    pub fn create_zone(&mut self, id: impl Into<ZoneId>) -> &mut Self {
        self.config.zones.push(Zone {
            zone_id: id.into(),
            zone_resources: Resources::default(),
            members: Vec::new(),
        });
        self.cursor = Cursor::Zone(self.config.zones.len() - 1);
        self
    }

    pub fn add_members<I, S>(&mut self, members: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<EndpointId>,
    {
        let zone = match self.cursor {
            Cursor::Zone(idx) => self.config.zones.get_mut(idx),
            _ => None,
        };
        let Some(zone) = zone else {
            return self.fail(BuildError::NoOpenItem {
                operation: "add_members",
                expected: "zone",
            });
        };
        zone.members.extend(members.into_iter().map(|id| ZoneMember {
            endpoint_id: id.into(),
        }));
        self
    }

    /// Zone whose endpoints win when an utterance matches several zones.
    pub fn set_default_zone(&mut self, id: impl Into<ZoneId>) -> &mut Self {
        self.config.default_zone_id = Some(id.into());
        self
    }

    pub fn create_endpoint(&mut self, id: impl Into<EndpointId>) -> &mut Self {
        self.config.endpoints.push(Endpoint {
            endpoint_id: id.into(),
            endpoint_resources: Resources::default(),
            capabilities: Vec::new(),
        });
        self.cursor = Cursor::Endpoint(self.config.endpoints.len() - 1);
        self
    }

    /// Attach an asset id to the innermost open item.
    pub fn add_asset_id(&mut self, asset: impl Into<AssetId>) -> &mut Self {
        let asset = asset.into();
        match self.open_resources() {
            Some(resources) => {
                resources.push_asset(asset);
                self
            }
            None => self.fail(BuildError::NoOpenItem {
                operation: "add_asset_id",
                expected: "zone, endpoint, controller, mode value, or preset",
            }),
        }
    }

    pub fn add_power_controller(&mut self, retrievable: bool) -> &mut Self {
        self.push_capability("add_power_controller", Capability::power(retrievable))
    }

    pub fn add_toggle_controller(
        &mut self,
        instance: impl Into<ControllerId>,
        retrievable: bool,
    ) -> &mut Self {
        self.push_capability(
            "add_toggle_controller",
            Capability::toggle(instance.into(), retrievable),
        )
    }

    pub fn add_mode_controller(
        &mut self,
        instance: impl Into<ControllerId>,
        retrievable: bool,
        ordered: bool,
    ) -> &mut Self {
        self.push_capability(
            "add_mode_controller",
            Capability::mode(instance.into(), retrievable, ordered),
        )
    }

    pub fn add_range_controller(
        &mut self,
        instance: impl Into<ControllerId>,
        retrievable: bool,
        minimum: f64,
        maximum: f64,
        precision: f64,
    ) -> &mut Self {
        self.push_capability(
            "add_range_controller",
            Capability::range(instance.into(), retrievable, minimum, maximum, precision, None),
        )
    }

    pub fn add_range_controller_with_unit(
        &mut self,
        instance: impl Into<ControllerId>,
        retrievable: bool,
        minimum: f64,
        maximum: f64,
        precision: f64,
        unit: &str,
    ) -> &mut Self {
        self.push_capability(
            "add_range_controller",
            Capability::range(
                instance.into(),
                retrievable,
                minimum,
                maximum,
                precision,
                Some(unit.to_string()),
            ),
        )
    }

    /// Declare a mode value on the open mode controller.
    pub fn add_value(&mut self, mode: impl Into<String>) -> &mut Self {
        let ((endpoint, capability), target) =
            match self.open_controller("add_value", &[Interface::Mode]) {
                Ok(found) => found,
                Err(err) => return self.fail(err),
            };
        let modes = &mut target
            .configuration
            .get_or_insert_with(Configuration::default)
            .supported_modes;
        modes.push(SupportedMode {
            value: mode.into(),
            mode_resources: Resources::default(),
        });
        let value = modes.len() - 1;
        self.cursor = Cursor::ModeValue {
            endpoint,
            capability,
            value,
        };
        self
    }

    /// Declare a named preset on the open range controller.
    pub fn add_preset(&mut self, range_value: f64) -> &mut Self {
        let ((endpoint, capability), target) =
            match self.open_controller("add_preset", &[Interface::Range]) {
                Ok(found) => found,
                Err(err) => return self.fail(err),
            };
        let presets = &mut target
            .configuration
            .get_or_insert_with(Configuration::default)
            .presets;
        presets.push(Preset {
            range_value,
            preset_resources: Resources::default(),
        });
        let preset = presets.len() - 1;
        self.cursor = Cursor::Preset {
            endpoint,
            capability,
            preset,
        };
        self
    }

    pub fn add_action_turn_on<I, S>(&mut self, actions: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_action(
            "add_action_turn_on",
            &[Interface::Power, Interface::Toggle],
            actions,
            TURN_ON,
            Map::new(),
        )
    }

    pub fn add_action_turn_off<I, S>(&mut self, actions: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_action(
            "add_action_turn_off",
            &[Interface::Power, Interface::Toggle],
            actions,
            TURN_OFF,
            Map::new(),
        )
    }

    pub fn add_action_set_mode<I, S>(&mut self, actions: I, mode: impl Into<String>) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_action(
            "add_action_set_mode",
            &[Interface::Mode],
            actions,
            SET_MODE,
            payload("mode", Value::from(mode.into())),
        )
    }

    pub fn add_action_adjust_mode<I, S>(&mut self, actions: I, delta: i32) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_action(
            "add_action_adjust_mode",
            &[Interface::Mode],
            actions,
            ADJUST_MODE,
            payload("modeDelta", Value::from(delta)),
        )
    }

    pub fn add_action_set_range<I, S>(&mut self, actions: I, value: f64) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_action(
            "add_action_set_range",
            &[Interface::Range],
            actions,
            SET_RANGE_VALUE,
            payload("rangeValue", Value::from(value)),
        )
    }

    pub fn add_action_adjust_range<I, S>(&mut self, actions: I, delta: f64) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_action(
            "add_action_adjust_range",
            &[Interface::Range],
            actions,
            ADJUST_RANGE_VALUE,
            payload("rangeValueDelta", Value::from(delta)),
        )
    }

    /// Return the configuration, or the first recorded misuse or validation error.
    pub fn build(&self) -> Result<CarControlConfig, BuildError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        validate_config(&self.config)?;
        Ok(self.config.clone())
    }

    fn fail(&mut self, err: BuildError) -> &mut Self {
        if self.error.is_none() {
            self.error = Some(err);
        }
        self
    }

    fn push_capability(&mut self, operation: &'static str, capability: Capability) -> &mut Self {
        let target = self
            .cursor
            .endpoint()
            .and_then(|idx| self.config.endpoints.get_mut(idx).map(|e| (idx, e)));
        let Some((endpoint, target)) = target else {
            return self.fail(BuildError::NoOpenItem {
                operation,
                expected: "endpoint",
            });
        };
        target.capabilities.push(capability);
        self.cursor = Cursor::Controller {
            endpoint,
            capability: target.capabilities.len() - 1,
        };
        self
    }

    fn push_action<I, S>(
        &mut self,
        operation: &'static str,
        allowed: &[Interface],
        actions: I,
        directive: &str,
        payload: Map<String, Value>,
    ) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let actions: Vec<String> = actions.into_iter().map(Into::into).collect();
        if actions.is_empty() {
            return self.fail(BuildError::EmptyActions { operation });
        }
        match self.open_controller(operation, allowed) {
            Ok((_, target)) => {
                target.push_action(ActionMapping::new(actions, directive, payload));
                self
            }
            Err(err) => self.fail(err),
        }
    }

    fn open_controller(
        &mut self,
        operation: &'static str,
        allowed: &[Interface],
    ) -> Result<((usize, usize), &mut Capability), BuildError> {
        let missing = BuildError::NoOpenItem {
            operation,
            expected: "controller",
        };
        let Some((endpoint, capability)) = self.cursor.controller() else {
            return Err(missing);
        };
        let Some(entry) = self.config.endpoints.get_mut(endpoint) else {
            return Err(missing);
        };
        let endpoint_id = entry.endpoint_id.clone();
        let Some(target) = entry.capabilities.get_mut(capability) else {
            return Err(missing);
        };
        if !allowed.contains(&target.interface) {
            return Err(BuildError::WrongController {
                operation,
                interface: target.interface.clone(),
                key: ControllerKey::new(endpoint_id, target.instance.clone()),
            });
        }
        Ok(((endpoint, capability), target))
    }

    fn open_resources(&mut self) -> Option<&mut Resources> {
        match self.cursor {
            Cursor::None => None,
            Cursor::Zone(idx) => self.config.zones.get_mut(idx).map(|z| &mut z.zone_resources),
            Cursor::Endpoint(idx) => self
                .config
                .endpoints
                .get_mut(idx)
                .map(|e| &mut e.endpoint_resources),
            Cursor::Controller {
                endpoint,
                capability,
            } => self
                .capability_mut(endpoint, capability)
                .map(|c| c.capability_resources.get_or_insert_with(Resources::default)),
            Cursor::ModeValue {
                endpoint,
                capability,
                value,
            } => self
                .capability_mut(endpoint, capability)
                .and_then(|c| c.configuration.as_mut())
                .and_then(|cfg| cfg.supported_modes.get_mut(value))
                .map(|mode| &mut mode.mode_resources),
            Cursor::Preset {
                endpoint,
                capability,
                preset,
            } => self
                .capability_mut(endpoint, capability)
                .and_then(|c| c.configuration.as_mut())
                .and_then(|cfg| cfg.presets.get_mut(preset))
                .map(|preset| &mut preset.preset_resources),
        }
    }

    fn capability_mut(&mut self, endpoint: usize, capability: usize) -> Option<&mut Capability> {
        self.config
            .endpoints
            .get_mut(endpoint)?
            .capabilities
            .get_mut(capability)
    }
}

fn payload(key: &str, value: Value) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    map
}

fn validate_config(config: &CarControlConfig) -> Result<(), BuildError> {
    let mut endpoint_ids: BTreeSet<&EndpointId> = BTreeSet::new();
    for endpoint in &config.endpoints {
        if endpoint.endpoint_id.as_str().is_empty() {
            return Err(BuildError::EmptyEndpointId);
        }
        if !endpoint_ids.insert(&endpoint.endpoint_id) {
            return Err(BuildError::DuplicateEndpoint(endpoint.endpoint_id.clone()));
        }
        let mut keys: BTreeSet<ControllerKey> = BTreeSet::new();
        for capability in &endpoint.capabilities {
            // An empty instance would otherwise collapse onto the endpoint-level key.
            let empty_instance = match &capability.instance {
                Some(instance) => instance.as_str().is_empty(),
                None => capability.interface.requires_instance(),
            };
            if empty_instance {
                return Err(BuildError::EmptyInstance {
                    endpoint: endpoint.endpoint_id.clone(),
                    interface: capability.interface.clone(),
                });
            }
            let key = ControllerKey::new(endpoint.endpoint_id.clone(), capability.instance.clone());
            validate_capability(&key, capability)?;
            if !keys.insert(key.clone()) {
                return Err(BuildError::DuplicateController(key));
            }
        }
    }

    let mut zone_ids: BTreeSet<&ZoneId> = BTreeSet::new();
    for zone in &config.zones {
        if zone.zone_id.as_str().is_empty() {
            return Err(BuildError::EmptyZoneId);
        }
        if !zone_ids.insert(&zone.zone_id) {
            return Err(BuildError::DuplicateZone(zone.zone_id.clone()));
        }
        for member in &zone.members {
            if !endpoint_ids.contains(&member.endpoint_id) {
                return Err(BuildError::UnknownZoneMember {
                    zone: zone.zone_id.clone(),
                    endpoint: member.endpoint_id.clone(),
                });
            }
        }
    }

    if let Some(default_zone) = &config.default_zone_id {
        if !zone_ids.contains(default_zone) {
            return Err(BuildError::UnknownDefaultZone(default_zone.clone()));
        }
    }
    Ok(())
}

fn validate_capability(key: &ControllerKey, capability: &Capability) -> Result<(), BuildError> {
    let configuration = capability.configuration.as_ref();
    let mappings = capability
        .semantics
        .as_ref()
        .map(|s| s.action_mappings.as_slice())
        .unwrap_or_default();

    match capability.interface {
        Interface::Range => {
            let Some(range) = configuration.and_then(|c| c.supported_range.as_ref()) else {
                return Ok(());
            };
            let (minimum, maximum) = (range.minimum_value, range.maximum_value);
            // NaN bounds fail this comparison too.
            if !(minimum <= maximum) {
                return Err(BuildError::InvalidRange {
                    key: key.clone(),
                    minimum,
                    maximum,
                });
            }
            if !(range.precision > 0.0) {
                return Err(BuildError::InvalidPrecision {
                    key: key.clone(),
                    precision: range.precision,
                });
            }
            let presets = configuration.map(|c| c.presets.as_slice()).unwrap_or_default();
            let set_values = mappings
                .iter()
                .filter(|m| m.directive.name == SET_RANGE_VALUE)
                .filter_map(|m| m.directive.payload.get("rangeValue").and_then(Value::as_f64));
            for value in presets.iter().map(|p| p.range_value).chain(set_values) {
                if !(minimum..=maximum).contains(&value) {
                    return Err(BuildError::ValueOutOfRange {
                        key: key.clone(),
                        value,
                    });
                }
            }
        }
        Interface::Mode => {
            let modes = configuration
                .map(|c| c.supported_modes.as_slice())
                .unwrap_or_default();
            if modes.is_empty() {
                return Err(BuildError::EmptyModes(key.clone()));
            }
            let mut declared: BTreeSet<&str> = BTreeSet::new();
            for mode in modes {
                if mode.value.is_empty() {
                    return Err(BuildError::EmptyModeValue(key.clone()));
                }
                if !declared.insert(mode.value.as_str()) {
                    return Err(BuildError::DuplicateMode {
                        key: key.clone(),
                        value: mode.value.clone(),
                    });
                }
            }
            let ordered = configuration.and_then(|c| c.ordered).unwrap_or(false);
            for mapping in mappings {
                match mapping.directive.name.as_str() {
                    SET_MODE => {
                        let target = mapping
                            .directive
                            .payload
                            .get("mode")
                            .and_then(Value::as_str)
                            .unwrap_or_default();
                        if !declared.contains(target) {
                            return Err(BuildError::UnknownMode {
                                key: key.clone(),
                                value: target.to_string(),
                            });
                        }
                    }
                    ADJUST_MODE if !ordered => {
                        return Err(BuildError::UnorderedAdjust(key.clone()));
                    }
                    _ => {}
                }
            }
        }
        Interface::Power | Interface::Toggle | Interface::Other(_) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::assets::{action, device, location, setting, value};

    #[test]
    fn asset_ids_attach_to_innermost_item() {
        let mut builder = CarControlConfigBuilder::new();
        builder
            .create_endpoint("all.fan")
            .add_asset_id(device::FAN)
            .add_range_controller("speed", false, 1.0, 10.0, 1.0)
            .add_asset_id(setting::FAN_SPEED)
            .add_preset(1.0)
            .add_asset_id(value::LOW)
            .add_asset_id(value::MINIMUM);
        let config = builder.build().unwrap();

        let endpoint = &config.endpoints[0];
        let endpoint_assets: Vec<&str> =
            endpoint.endpoint_resources.asset_ids().map(AssetId::as_str).collect();
        assert_eq!(endpoint_assets, vec![device::FAN]);

        let capability = &endpoint.capabilities[0];
        let controller_assets: Vec<&str> = capability
            .capability_resources
            .as_ref()
            .unwrap()
            .asset_ids()
            .map(AssetId::as_str)
            .collect();
        assert_eq!(controller_assets, vec![setting::FAN_SPEED]);

        let preset = &capability.configuration.as_ref().unwrap().presets[0];
        assert_eq!(preset.range_value, 1.0);
        let preset_assets: Vec<&str> =
            preset.preset_resources.asset_ids().map(AssetId::as_str).collect();
        assert_eq!(preset_assets, vec![value::LOW, value::MINIMUM]);
    }

    #[test]
    fn zones_collect_members_and_default() {
        let mut builder = CarControlConfigBuilder::new();
        builder
            .create_zone("zone.driver")
            .add_asset_id(location::DRIVER)
            .add_members(["driver.light"])
            .set_default_zone("zone.driver")
            .create_endpoint("driver.light")
            .add_power_controller(false);
        let config = builder.build().unwrap();
        assert_eq!(config.default_zone_id, Some(ZoneId::from("zone.driver")));
        assert_eq!(
            config.zones[0].members,
            vec![ZoneMember {
                endpoint_id: EndpointId::from("driver.light")
            }]
        );
    }

    #[test]
    fn actions_attach_to_enclosing_controller() {
        let mut builder = CarControlConfigBuilder::new();
        builder
            .create_endpoint("driver.window")
            .add_range_controller("height", false, 0.0, 100.0, 1.0)
            .add_preset(50.0)
            .add_asset_id(value::MEDIUM)
            .add_action_set_range([action::OPEN], 0.0)
            .add_action_adjust_range([action::LOWER], -10.0);
        let config = builder.build().unwrap();
        let mappings = &config.endpoints[0].capabilities[0]
            .semantics
            .as_ref()
            .unwrap()
            .action_mappings;
        assert_eq!(mappings.len(), 2);
        assert_eq!(mappings[0].actions, vec![action::OPEN.to_string()]);
        assert_eq!(mappings[0].directive.name, "SetRangeValue");
        assert_eq!(mappings[0].directive.payload["rangeValue"], 0.0);
        assert_eq!(mappings[1].directive.name, "AdjustRangeValue");
        assert_eq!(mappings[1].directive.payload["rangeValueDelta"], -10.0);
    }

    #[test]
    fn preset_on_mode_controller_is_reported() {
        let mut builder = CarControlConfigBuilder::new();
        builder
            .create_endpoint("ac")
            .add_mode_controller("mode", false, false)
            .add_value("AUTO")
            .add_preset(1.0);
        let err = builder.build().unwrap_err();
        assert!(matches!(
            err,
            BuildError::WrongController {
                operation: "add_preset",
                interface: Interface::Mode,
                ..
            }
        ));
    }

    #[test]
    fn first_misuse_wins() {
        let mut builder = CarControlConfigBuilder::new();
        builder
            .add_asset_id(device::CAR)
            .add_members(["car"])
            .create_endpoint("car");
        assert_eq!(
            builder.build().unwrap_err(),
            BuildError::NoOpenItem {
                operation: "add_asset_id",
                expected: "zone, endpoint, controller, mode value, or preset",
            }
        );
    }

    #[test]
    fn controller_requires_endpoint() {
        let mut builder = CarControlConfigBuilder::new();
        builder.create_zone("zone.all").add_power_controller(false);
        assert!(matches!(
            builder.build(),
            Err(BuildError::NoOpenItem {
                operation: "add_power_controller",
                expected: "endpoint"
            })
        ));
    }

    #[test]
    fn zone_members_must_be_defined() {
        let mut builder = CarControlConfigBuilder::new();
        builder.create_zone("zone.rear").add_members(["rear.windshield"]);
        assert_eq!(
            builder.build().unwrap_err(),
            BuildError::UnknownZoneMember {
                zone: ZoneId::from("zone.rear"),
                endpoint: EndpointId::from("rear.windshield"),
            }
        );
    }

    #[test]
    fn default_zone_must_be_defined() {
        let mut builder = CarControlConfigBuilder::new();
        builder.set_default_zone("zone.all");
        assert_eq!(
            builder.build().unwrap_err(),
            BuildError::UnknownDefaultZone(ZoneId::from("zone.all"))
        );
    }

    #[test]
    fn duplicate_power_controllers_are_rejected() {
        let mut builder = CarControlConfigBuilder::new();
        builder
            .create_endpoint("vent")
            .add_power_controller(true)
            .add_power_controller(false);
        assert_eq!(
            builder.build().unwrap_err(),
            BuildError::DuplicateController(ControllerKey::endpoint("vent"))
        );
    }

    #[test]
    fn range_values_are_checked() {
        let mut inverted = CarControlConfigBuilder::new();
        inverted
            .create_endpoint("seat")
            .add_range_controller("heat", false, 3.0, 1.0, 1.0);
        assert!(matches!(
            inverted.build(),
            Err(BuildError::InvalidRange { .. })
        ));

        let mut outside = CarControlConfigBuilder::new();
        outside
            .create_endpoint("seat")
            .add_range_controller("heat", false, 1.0, 3.0, 1.0)
            .add_preset(4.0);
        assert_eq!(
            outside.build().unwrap_err(),
            BuildError::ValueOutOfRange {
                key: ControllerKey::instance("seat", "heat"),
                value: 4.0,
            }
        );

        let mut precision = CarControlConfigBuilder::new();
        precision
            .create_endpoint("seat")
            .add_range_controller("heat", false, 1.0, 3.0, 0.0);
        assert!(matches!(
            precision.build(),
            Err(BuildError::InvalidPrecision { .. })
        ));
    }

    #[test]
    fn mode_actions_are_checked() {
        let mut unordered = CarControlConfigBuilder::new();
        unordered
            .create_endpoint("ac")
            .add_mode_controller("mode", false, false)
            .add_value("ECONOMY")
            .add_action_adjust_mode([action::RAISE], 1);
        assert_eq!(
            unordered.build().unwrap_err(),
            BuildError::UnorderedAdjust(ControllerKey::instance("ac", "mode"))
        );

        let mut unknown = CarControlConfigBuilder::new();
        unknown
            .create_endpoint("ac")
            .add_mode_controller("mode", false, true)
            .add_value("ECONOMY")
            .add_action_set_mode([action::LOWER], "TURBO");
        assert!(matches!(
            unknown.build(),
            Err(BuildError::UnknownMode { value, .. }) if value == "TURBO"
        ));

        let mut empty = CarControlConfigBuilder::new();
        empty
            .create_endpoint("ac")
            .add_mode_controller("mode", false, true);
        assert_eq!(
            empty.build().unwrap_err(),
            BuildError::EmptyModes(ControllerKey::instance("ac", "mode"))
        );
    }

    #[test]
    fn set_mode_action_targets_declared_value() {
        let mut builder = CarControlConfigBuilder::new();
        builder
            .create_endpoint("ac")
            .add_mode_controller("intensity", false, true)
            .add_value("LOW")
            .add_value("HIGH")
            .add_action_set_mode([action::RAISE], "HIGH");
        let config = builder.build().unwrap();

        let semantics = config.endpoints[0].capabilities[0]
            .semantics
            .as_ref()
            .unwrap();
        assert_eq!(semantics.action_mappings.len(), 1);
        let mapping = &semantics.action_mappings[0];
        assert_eq!(mapping.actions, vec![action::RAISE.to_string()]);
        assert_eq!(mapping.directive.name, "SetMode");
        assert_eq!(
            Value::Object(mapping.directive.payload.clone()),
            serde_json::json!({"mode": "HIGH"})
        );
    }

    #[test]
    fn empty_identifiers_are_rejected() {
        let mut toggle = CarControlConfigBuilder::new();
        toggle
            .create_endpoint("car")
            .add_power_controller(false)
            .add_toggle_controller("", false);
        assert_eq!(
            toggle.build().unwrap_err(),
            BuildError::EmptyInstance {
                endpoint: EndpointId::from("car"),
                interface: Interface::Toggle,
            }
        );

        let mut endpoint = CarControlConfigBuilder::new();
        endpoint
            .create_endpoint("")
            .add_mode_controller("color", false, false)
            .add_value("RED");
        assert_eq!(endpoint.build().unwrap_err(), BuildError::EmptyEndpointId);

        let mut mode = CarControlConfigBuilder::new();
        mode.create_endpoint("ambient.light")
            .add_mode_controller("color", false, false)
            .add_value("");
        assert_eq!(
            mode.build().unwrap_err(),
            BuildError::EmptyModeValue(ControllerKey::instance("ambient.light", "color"))
        );

        let mut zone = CarControlConfigBuilder::new();
        zone.create_zone("");
        assert_eq!(zone.build().unwrap_err(), BuildError::EmptyZoneId);
    }

    #[test]
    fn turn_on_requires_actions_and_bool_controller() {
        let mut builder = CarControlConfigBuilder::new();
        builder
            .create_endpoint("vent")
            .add_toggle_controller("height", false)
            .add_action_turn_on(Vec::<String>::new());
        assert_eq!(
            builder.build().unwrap_err(),
            BuildError::EmptyActions {
                operation: "add_action_turn_on"
            }
        );

        let mut wrong = CarControlConfigBuilder::new();
        wrong
            .create_endpoint("driver.window")
            .add_range_controller("height", false, 0.0, 100.0, 1.0)
            .add_action_turn_on([action::OPEN]);
        assert!(matches!(
            wrong.build(),
            Err(BuildError::WrongController {
                interface: Interface::Range,
                ..
            })
        ));
    }
}
