use std::sync::LazyLock;

use regex::{
    Captures,
    Regex,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InterpolationError {
    #[error("Required environment variable not found: {0}")]
    RequiredVarNotFound(String),
}

pub type InterpolationResult<T> = Result<T, InterpolationError>;

/// `${NAME}` or `${NAME:-default}`
static VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}").expect("Invalid regex pattern")
});

/// Replaces every variable reference with its environment value, or with
/// its default when the variable is unset
pub fn interpolate(input: &str) -> InterpolationResult<String> {
    let mut output = String::with_capacity(input.len());
    let mut last = 0;

    for cap in VAR_PATTERN.captures_iter(input) {
        let Some(whole) = cap.get(0) else {
            continue;
        };
        output.push_str(&input[last..whole.start()]);
        output.push_str(&resolve(&cap)?);
        last = whole.end();
    }

    output.push_str(&input[last..]);
    Ok(output)
}

fn resolve(cap: &Captures<'_>) -> InterpolationResult<String> {
    let name = cap.get(1).map(|m| m.as_str()).unwrap_or_default();

    match std::env::var(name) {
        Ok(value) => Ok(value),
        Err(_) => cap
            .get(2)
            .map(|default| default.as_str().to_string())
            .ok_or_else(|| InterpolationError::RequiredVarNotFound(name.to_string())),
    }
}

/// Interpolates every string of a TOML document, tables and arrays included
pub fn interpolate_toml(value: &mut toml::Value) -> InterpolationResult<()> {
    match value {
        toml::Value::String(s) => {
            *s = interpolate(s)?;
        }
        toml::Value::Array(arr) => {
            for item in arr {
                interpolate_toml(item)?;
            }
        }
        toml::Value::Table(table) => {
            for (_, v) in table.iter_mut() {
                interpolate_toml(v)?;
            }
        }
        _ => {}
    }
    Ok(())
}
