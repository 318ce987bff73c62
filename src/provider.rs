//! Car-control data provider: owns the controller tables a capability
//! handler reads and writes.
//!
//! Initialization takes the engine configuration sources, indexes the first
//! car-control block found, and leaves every source rewound. Repeating it with
//! the same input leaves the tables unchanged; new input overwrites matching
//! keys and keeps the rest.

use crate::config::{CarControlConfig, generate_car_control_config};
use crate::controllers::{BoolController, ModeController, RangeController};
use crate::loader::{LoadError, LoadOptions, SkippedSource, parse_block, scan_sources};
use crate::registry::{ControllerRegistry, RegistryCounts};
use std::io::{Read, Seek};
use tracing::info;

/// Where the indexed configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// The source at this position in the list carried the block.
    Source(usize),
    /// No source carried a block; the reference vehicle was indexed.
    Generated,
    /// No source carried a block and nothing was indexed.
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub origin: ConfigOrigin,
    pub skipped: Vec<SkippedSource>,
    /// Table sizes after initialization.
    pub counts: RegistryCounts,
}

#[derive(Debug, Default)]
pub struct CarControlDataProvider {
    registry: ControllerRegistry,
    config: Option<CarControlConfig>,
    options: LoadOptions,
}

impl CarControlDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LoadOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Index the first car-control block found in `sources`.
    ///
    /// A missing block is not an error: the report says `NotFound` and the
    /// tables are left as they were. Unparseable sources are listed in the
    /// report. A block that does not describe valid controllers returns an
    /// error and leaves the tables untouched.
    pub fn initialize<I, S>(&mut self, sources: I) -> Result<LoadReport, LoadError>
    where
        I: IntoIterator<Item = S>,
        S: Read + Seek,
    {
        let scan = scan_sources(sources)?;
        let origin = match scan.found {
            Some((index, block)) => {
                let config = parse_block(&block, self.options)?;
                self.apply(config)?;
                ConfigOrigin::Source(index)
            }
            None => {
                info!("no car-control configuration found; nothing to configure");
                ConfigOrigin::NotFound
            }
        };
        let report = LoadReport {
            origin,
            skipped: scan.skipped,
            counts: self.registry.counts(),
        };
        info!(origin = ?report.origin, counts = ?report.counts, "car-control data initialized");
        Ok(report)
    }

    /// Like [`initialize`](Self::initialize), but index the reference vehicle
    /// when no source carries a block.
    pub fn initialize_or_generate<I, S>(&mut self, sources: I) -> Result<LoadReport, LoadError>
    where
        I: IntoIterator<Item = S>,
        S: Read + Seek,
    {
        let mut report = self.initialize(sources)?;
        if report.origin == ConfigOrigin::NotFound {
            let config = generate_car_control_config()?;
            self.apply(config)?;
            report.origin = ConfigOrigin::Generated;
            report.counts = self.registry.counts();
            info!(counts = ?report.counts, "indexed generated car-control configuration");
        }
        Ok(report)
    }

    /// Index an in-memory configuration, e.g. one produced by the builder.
    pub fn index_config(&mut self, config: CarControlConfig) -> Result<RegistryCounts, LoadError> {
        self.apply(config)?;
        Ok(self.registry.counts())
    }

    fn apply(&mut self, config: CarControlConfig) -> Result<(), LoadError> {
        let fresh = ControllerRegistry::from_config(&config)?;
        self.registry.merge(fresh);
        self.config = Some(config);
        Ok(())
    }

    /// The most recently indexed configuration document.
    pub fn config(&self) -> Option<&CarControlConfig> {
        self.config.as_ref()
    }

    pub fn registry(&self) -> &ControllerRegistry {
        &self.registry
    }

    /// Power controllers are looked up with `controller_id = None`.
    pub fn bool_controller(
        &self,
        endpoint_id: &str,
        controller_id: Option<&str>,
    ) -> Option<&BoolController> {
        self.registry.bool_controller(endpoint_id, controller_id)
    }

    pub fn bool_controller_mut(
        &mut self,
        endpoint_id: &str,
        controller_id: Option<&str>,
    ) -> Option<&mut BoolController> {
        self.registry.bool_controller_mut(endpoint_id, controller_id)
    }

    pub fn mode_controller(&self, endpoint_id: &str, controller_id: &str) -> Option<&ModeController> {
        self.registry.mode_controller(endpoint_id, controller_id)
    }

    pub fn mode_controller_mut(
        &mut self,
        endpoint_id: &str,
        controller_id: &str,
    ) -> Option<&mut ModeController> {
        self.registry.mode_controller_mut(endpoint_id, controller_id)
    }

    pub fn range_controller(
        &self,
        endpoint_id: &str,
        controller_id: &str,
    ) -> Option<&RangeController> {
        self.registry.range_controller(endpoint_id, controller_id)
    }

    pub fn range_controller_mut(
        &mut self,
        endpoint_id: &str,
        controller_id: &str,
    ) -> Option<&mut RangeController> {
        self.registry.range_controller_mut(endpoint_id, controller_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn source(text: &str) -> Cursor<Vec<u8>> {
        Cursor::new(text.as_bytes().to_vec())
    }

    #[test]
    fn invalid_block_leaves_tables_untouched() {
        let mut provider = CarControlDataProvider::new();
        provider
            .initialize([source(
                r#"{"aace.carControl": {"endpoints": [{"endpointId": "x", "capabilities": [{"interface": "Alexa.PowerController"}]}]}}"#,
            )])
            .unwrap();

        let err = provider
            .initialize([source(
                r#"{"aace.carControl": {"endpoints": [{"endpointId": "y", "capabilities": [
                    {"interface": "Alexa.PowerController"},
                    {"interface": "Alexa.ModeController", "configuration": {"supportedModes": [{"value": "A"}]}}
                ]}]}}"#,
            )])
            .unwrap_err();
        assert!(matches!(err, LoadError::Index(_)));
        assert!(provider.bool_controller("x", None).is_some());
        assert!(provider.bool_controller("y", None).is_none());
    }

    #[test]
    fn generate_fallback_only_when_nothing_found() {
        let mut provider = CarControlDataProvider::new();
        let report = provider
            .initialize_or_generate([source(r#"{"aace.vehicle": {}}"#)])
            .unwrap();
        assert_eq!(report.origin, ConfigOrigin::Generated);
        assert!(provider.range_controller("driver.window", "height").is_some());
        assert!(provider.config().is_some());

        let mut provider = CarControlDataProvider::new();
        let report = provider
            .initialize_or_generate([source(
                r#"{"aace.carControl": {"endpoints": [{"endpointId": "x", "capabilities": []}]}}"#,
            )])
            .unwrap();
        assert_eq!(report.origin, ConfigOrigin::Source(0));
        assert!(provider.registry().is_empty());
    }

    #[test]
    fn controllers_are_writable_through_the_provider() {
        let mut provider = CarControlDataProvider::new();
        provider
            .index_config(generate_car_control_config().unwrap())
            .unwrap();
        provider
            .bool_controller_mut("vent", None)
            .unwrap()
            .set_value(true);
        assert!(provider.bool_controller("vent", None).unwrap().value());

        let intensity = provider.mode_controller_mut("ac", "intensity").unwrap();
        assert_eq!(intensity.adjust_mode(1).unwrap(), "MEDIUM");
    }
}
