use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Identifier of a controllable vehicle entity (e.g., `driver.fan`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointId(pub String);

/// Instance name of a toggle/mode/range controller on an endpoint.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControllerId(pub String);

/// Identifier of a zone grouping endpoints (e.g., `zone.driver`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(pub String);

/// Localization tag used for natural-language matching (e.g., `Alexa.Device.Fan`).
///
/// Asset ids are carried through verbatim; nothing in this crate resolves
/// them to friendly names.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(pub String);

macro_rules! string_id {
    ($($name:ident),*) => {
        $(
            impl $name {
                pub fn as_str(&self) -> &str {
                    &self.0
                }
            }

            impl From<&str> for $name {
                fn from(value: &str) -> Self {
                    Self(value.to_string())
                }
            }

            impl From<String> for $name {
                fn from(value: String) -> Self {
                    Self(value)
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }
        )*
    };
}

string_id!(EndpointId, ControllerId, ZoneId, AssetId);

/// Capability interface declared on an endpoint.
///
/// The four car-control interfaces are modeled explicitly; `Other` keeps
/// documents that declare additional interfaces loadable.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Interface {
    Power,
    Toggle,
    Mode,
    Range,
    Other(String),
}

impl Interface {
    pub fn as_str(&self) -> &str {
        match self {
            Interface::Power => "Alexa.PowerController",
            Interface::Toggle => "Alexa.ToggleController",
            Interface::Mode => "Alexa.ModeController",
            Interface::Range => "Alexa.RangeController",
            Interface::Other(value) => value.as_str(),
        }
    }

    fn from_str(value: &str) -> Self {
        match value {
            "Alexa.PowerController" => Interface::Power,
            "Alexa.ToggleController" => Interface::Toggle,
            "Alexa.ModeController" => Interface::Mode,
            "Alexa.RangeController" => Interface::Range,
            other => Interface::Other(other.to_string()),
        }
    }

    /// Name of the reported property for the interface.
    pub fn property_name(&self) -> Option<&'static str> {
        match self {
            Interface::Power => Some("powerState"),
            Interface::Toggle => Some("toggleState"),
            Interface::Mode => Some("mode"),
            Interface::Range => Some("rangeValue"),
            Interface::Other(_) => None,
        }
    }

    /// Whether the interface is addressed through an `instance` name.
    pub fn requires_instance(&self) -> bool {
        matches!(self, Interface::Toggle | Interface::Mode | Interface::Range)
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Interface {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Interface {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_str(&value))
    }
}

const KEY_SEPARATOR: char = '#';

/// Lookup key for a controller: `endpointId` or `endpointId#instance`.
///
/// Power controllers have no instance and are keyed by the endpoint alone.
/// An empty instance is treated the same as no instance so `x` and `x#`
/// never name different controllers.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ControllerKey {
    endpoint: EndpointId,
    instance: Option<ControllerId>,
}

impl ControllerKey {
    pub fn new(endpoint: impl Into<EndpointId>, instance: Option<ControllerId>) -> Self {
        let instance = instance.filter(|id| !id.0.is_empty());
        Self {
            endpoint: endpoint.into(),
            instance,
        }
    }

    /// Key for an endpoint-level controller (power).
    pub fn endpoint(endpoint: impl Into<EndpointId>) -> Self {
        Self::new(endpoint, None)
    }

    /// Key for a named controller instance on an endpoint.
    pub fn instance(endpoint: impl Into<EndpointId>, instance: impl Into<ControllerId>) -> Self {
        Self::new(endpoint, Some(instance.into()))
    }

    /// Build a key from borrowed lookup arguments.
    pub fn lookup(endpoint: &str, instance: Option<&str>) -> Self {
        Self::new(endpoint, instance.map(ControllerId::from))
    }

    /// Split `endpoint#instance` at the first separator.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(KEY_SEPARATOR) {
            Some((endpoint, instance)) => Self::lookup(endpoint, Some(instance)),
            None => Self::endpoint(raw),
        }
    }

    pub fn endpoint_id(&self) -> &EndpointId {
        &self.endpoint
    }

    pub fn instance_id(&self) -> Option<&ControllerId> {
        self.instance.as_ref()
    }
}

impl fmt::Display for ControllerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.instance {
            Some(instance) => write!(f, "{}{}{}", self.endpoint, KEY_SEPARATOR, instance),
            None => write!(f, "{}", self.endpoint),
        }
    }
}
