//! Serde representation of the `aace.carControl` configuration block.
//!
//! The same types are produced by the builder and consumed by the loader, so
//! a generated document always indexes the way a hand-written one does. Field
//! names follow the engine's camelCase wire format. Everything the indexer
//! does not need is optional so partially specified documents still load.

use crate::config::identity::{AssetId, ControllerId, EndpointId, Interface, ZoneId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Top-level key under which the engine expects the car-control block.
pub const CAR_CONTROL_KEY: &str = "aace.carControl";

const CAPABILITY_TYPE: &str = "AlexaInterface";
const CAPABILITY_VERSION: &str = "3";
const ACTION_MAPPING_TYPE: &str = "ActionsToDirective";

/// Full car-control configuration: endpoints plus optional zone layout.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarControlConfig {
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub zones: Vec<Zone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_zone_id: Option<ZoneId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub endpoint_id: EndpointId,
    #[serde(default, skip_serializing_if = "Resources::is_empty")]
    pub endpoint_resources: Resources,
    #[serde(default)]
    pub capabilities: Vec<Capability>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub zone_id: ZoneId,
    #[serde(default, skip_serializing_if = "Resources::is_empty")]
    pub zone_resources: Resources,
    #[serde(default)]
    pub members: Vec<ZoneMember>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneMember {
    pub endpoint_id: EndpointId,
}

/// Friendly names attached to an endpoint, zone, controller, mode value, or preset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resources {
    #[serde(default)]
    pub friendly_names: Vec<FriendlyName>,
}

impl Resources {
    pub fn is_empty(&self) -> bool {
        self.friendly_names.is_empty()
    }

    pub fn push_asset(&mut self, asset: AssetId) {
        self.friendly_names.push(FriendlyName::Asset { asset_id: asset });
    }

    /// Asset ids in declaration order; literal text names are skipped.
    pub fn asset_ids(&self) -> impl Iterator<Item = &AssetId> {
        self.friendly_names.iter().filter_map(|name| match name {
            FriendlyName::Asset { asset_id } => Some(asset_id),
            FriendlyName::Text { .. } => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "@type", content = "value")]
pub enum FriendlyName {
    #[serde(rename = "asset")]
    Asset {
        #[serde(rename = "assetId")]
        asset_id: AssetId,
    },
    #[serde(rename = "text")]
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        locale: Option<String>,
    },
}

/// One capability declared on an endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capability {
    #[serde(rename = "type", default = "default_capability_type")]
    pub kind: String,
    pub interface: Interface,
    #[serde(default = "default_capability_version")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<ControllerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capability_resources: Option<Resources>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<Configuration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantics: Option<Semantics>,
}

fn default_capability_type() -> String {
    CAPABILITY_TYPE.to_string()
}

fn default_capability_version() -> String {
    CAPABILITY_VERSION.to_string()
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Properties {
    #[serde(default)]
    pub supported: Vec<PropertyName>,
    #[serde(default)]
    pub proactively_reported: bool,
    #[serde(default)]
    pub retrievable: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertyName {
    pub name: String,
}

/// Controller configuration; mode controllers use `ordered`/`supported_modes`,
/// range controllers use `supported_range`/`unit_of_measure`/`presets`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordered: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supported_modes: Vec<SupportedMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_range: Option<SupportedRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_of_measure: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub presets: Vec<Preset>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportedMode {
    pub value: String,
    #[serde(default, skip_serializing_if = "Resources::is_empty")]
    pub mode_resources: Resources,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportedRange {
    pub minimum_value: f64,
    pub maximum_value: f64,
    #[serde(default = "default_precision")]
    pub precision: f64,
}

fn default_precision() -> f64 {
    1.0
}

/// Named value on a range controller (e.g., "medium" = 5).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub range_value: f64,
    #[serde(default, skip_serializing_if = "Resources::is_empty")]
    pub preset_resources: Resources,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semantics {
    #[serde(default)]
    pub action_mappings: Vec<ActionMapping>,
}

/// Maps spoken actions (e.g. `Alexa.Actions.Open`) to a controller directive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionMapping {
    #[serde(rename = "@type", default = "default_action_mapping_type")]
    pub kind: String,
    pub actions: Vec<String>,
    pub directive: Directive,
}

fn default_action_mapping_type() -> String {
    ACTION_MAPPING_TYPE.to_string()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Directive {
    pub name: String,
    #[serde(default)]
    pub payload: Map<String, Value>,
}

impl Capability {
    fn with_interface(
        interface: Interface,
        instance: Option<ControllerId>,
        retrievable: bool,
    ) -> Self {
        let supported = interface
            .property_name()
            .map(|name| {
                vec![PropertyName {
                    name: name.to_string(),
                }]
            })
            .unwrap_or_default();
        Self {
            kind: default_capability_type(),
            interface,
            version: default_capability_version(),
            instance,
            properties: Some(Properties {
                supported,
                proactively_reported: false,
                retrievable,
            }),
            capability_resources: None,
            configuration: None,
            semantics: None,
        }
    }

    pub fn power(retrievable: bool) -> Self {
        Self::with_interface(Interface::Power, None, retrievable)
    }

    pub fn toggle(instance: ControllerId, retrievable: bool) -> Self {
        let mut capability = Self::with_interface(Interface::Toggle, Some(instance), retrievable);
        capability.capability_resources = Some(Resources::default());
        capability
    }

    pub fn mode(instance: ControllerId, retrievable: bool, ordered: bool) -> Self {
        let mut capability = Self::with_interface(Interface::Mode, Some(instance), retrievable);
        capability.capability_resources = Some(Resources::default());
        capability.configuration = Some(Configuration {
            ordered: Some(ordered),
            ..Default::default()
        });
        capability
    }

    pub fn range(
        instance: ControllerId,
        retrievable: bool,
        minimum: f64,
        maximum: f64,
        precision: f64,
        unit: Option<String>,
    ) -> Self {
        let mut capability = Self::with_interface(Interface::Range, Some(instance), retrievable);
        capability.capability_resources = Some(Resources::default());
        capability.configuration = Some(Configuration {
            supported_range: Some(SupportedRange {
                minimum_value: minimum,
                maximum_value: maximum,
                precision,
            }),
            unit_of_measure: unit,
            ..Default::default()
        });
        capability
    }

    pub fn push_action(&mut self, mapping: ActionMapping) {
        self.semantics
            .get_or_insert_with(Semantics::default)
            .action_mappings
            .push(mapping);
    }
}

impl ActionMapping {
    pub fn new(actions: Vec<String>, name: &str, payload: Map<String, Value>) -> Self {
        Self {
            kind: default_action_mapping_type(),
            actions,
            directive: Directive {
                name: name.to_string(),
                payload,
            },
        }
    }
}

impl CarControlConfig {
    pub fn endpoint(&self, id: &EndpointId) -> Option<&Endpoint> {
        self.endpoints.iter().find(|endpoint| &endpoint.endpoint_id == id)
    }

    pub fn zone(&self, id: &ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|zone| &zone.zone_id == id)
    }

    /// Wrap the document under [`CAR_CONTROL_KEY`] as the engine expects it.
    pub fn to_engine_json(&self) -> Result<Value, serde_json::Error> {
        let mut root = Map::new();
        root.insert(CAR_CONTROL_KEY.to_string(), serde_json::to_value(self)?);
        Ok(Value::Object(root))
    }
}

/// Read an engine configuration file and extract its car-control block.
///
/// Returns `Ok(None)` when the file is valid JSON without the block.
pub fn load_config_from_path(path: &Path) -> anyhow::Result<Option<CarControlConfig>> {
    let data = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&data)?;
    match value.get(CAR_CONTROL_KEY) {
        Some(block) => Ok(Some(serde_json::from_value(block.clone())?)),
        None => Ok(None),
    }
}
