//! Embedded JSON Schema for the `aace.carControl` block.
//!
//! The schema ships inside the binary so validation does not depend on the
//! working directory. It checks document shape only; cross references (zone
//! members, duplicate keys) are the builder's job.

use jsonschema::JSONSchema;
use serde_json::Value;
use thiserror::Error;

const CAR_CONTROL_SCHEMA: &str = include_str!("../schema/car_control.schema.json");

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("embedded car-control schema is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("embedded car-control schema failed to compile: {0}")]
    Compile(String),
    #[error("car-control block failed schema validation:\n{}", .0.join("\n"))]
    Violations(Vec<String>),
}

/// The raw schema document.
pub fn car_control_schema() -> Result<Value, SchemaError> {
    Ok(serde_json::from_str(CAR_CONTROL_SCHEMA)?)
}

pub fn compile_car_control_schema() -> Result<JSONSchema, SchemaError> {
    let schema = car_control_schema()?;
    JSONSchema::compile(&schema).map_err(|err| SchemaError::Compile(err.to_string()))
}

/// Validate a car-control block (the value under `aace.carControl`).
///
/// Every violation is reported, prefixed with its instance path.
pub fn validate_block(block: &Value) -> Result<(), SchemaError> {
    let compiled = compile_car_control_schema()?;
    if let Err(errors) = compiled.validate(block) {
        let details = errors
            .map(|err| format!("{}: {}", err.instance_path, err))
            .collect::<Vec<_>>();
        return Err(SchemaError::Violations(details));
    }
    Ok(())
}
