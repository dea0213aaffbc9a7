//! JSON and YAML renderings.

use crate::error::RenderError;
use serde::Serialize;

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, RenderError> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn to_yaml<T: Serialize + ?Sized>(value: &T) -> Result<String, RenderError> {
    Ok(serde_yaml::to_string(value)?)
}
