//! Car-control configuration document.
//!
//! `model` mirrors the `aace.carControl` block the engine consumes, `builder`
//! produces it fluently, and `sample` uses the builder to describe the
//! reference vehicle. Identifiers and the composite controller key live in
//! `identity`.

pub mod assets;
pub mod builder;
pub mod identity;
pub mod model;
pub mod sample;

pub use builder::{BuildError, CarControlConfigBuilder};
pub use identity::{AssetId, ControllerId, ControllerKey, EndpointId, Interface, ZoneId};
pub use model::{
    ActionMapping, CAR_CONTROL_KEY, Capability, CarControlConfig, Configuration, Directive,
    Endpoint, FriendlyName, Preset, Properties, Resources, Semantics, SupportedMode,
    SupportedRange, Zone, ZoneMember, load_config_from_path,
};
pub use sample::generate_car_control_config;
