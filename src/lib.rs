//! Car-control data provider.
//!
//! Loads the `aace.carControl` block from engine configuration sources and
//! indexes its declared controllers into lookup tables, or builds an
//! equivalent configuration programmatically when no block is supplied.
//!
//! - [`config`]: the document model, its fluent builder, and the reference
//!   vehicle.
//! - [`loader`]: scanning configuration streams for the block.
//! - [`registry`]: the bool/mode/range tables keyed by `endpoint` or
//!   `endpoint#instance`.
//! - [`provider`]: the owner of those tables that capability handlers query.

pub mod config;
pub mod controllers;
pub mod loader;
pub mod provider;
pub mod registry;
pub mod runtime;
pub mod schema;

pub use config::{
    BuildError, CAR_CONTROL_KEY, CarControlConfig, CarControlConfigBuilder, ControllerId,
    ControllerKey, EndpointId, Interface, ZoneId, generate_car_control_config,
    load_config_from_path,
};
pub use controllers::{BoolController, ControllerError, ModeController, RangeController};
pub use loader::{LoadError, LoadOptions, SkippedSource, SourceScan, parse_block, scan_sources};
pub use provider::{CarControlDataProvider, ConfigOrigin, LoadReport};
pub use registry::{ControllerRef, ControllerRegistry, IndexError, RegistryCounts};
pub use schema::{SchemaError, validate_block};
