use std::collections::HashMap;

use crate::error::ConfigurationError;

/// String-keyed compressor options, as found in a table's compression
/// parameters.
pub type CompressorOptions = HashMap<String, String>;

/// Read an integer option, falling back to `default` when the key is absent.
///
/// Only the syntax is checked here. Whether the value is acceptable to the
/// algorithm is decided when the algorithm is called.
pub fn parse_int_option(
    options: &CompressorOptions,
    key: &str,
    default: i32,
) -> Result<i32, ConfigurationError> {
    let Some(raw) = options.get(key) else {
        return Ok(default);
    };
    raw.parse::<i32>()
        .map_err(|source| ConfigurationError::InvalidOption {
            key: key.to_string(),
            value: raw.clone(),
            source,
        })
}
