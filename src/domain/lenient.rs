use serde::{de::DeserializeOwned, Deserialize, Deserializer};

/// Field deserializer for loosely decoded JSON bodies: a value of the wrong
/// type falls back to the field's default instead of failing the whole body.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;

    Ok(serde_json::from_value(value).unwrap_or_else(|err| {
        tracing::debug!("Ignoring mistyped field: {}", err);
        T::default()
    }))
}
