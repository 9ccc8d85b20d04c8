use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::relay::error::RelayError;

/// Form submission as posted by the form webhook.
///
/// Keys are the form's question titles. Any other key, including the empty
/// one the form sometimes sends, is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FormSubmission {
    #[serde(rename = "Nama Lengkap", default, deserialize_with = "lenient_string")]
    pub full_name: Option<String>,

    #[serde(rename = "Nama Perusahaan / Organisasi", default, deserialize_with = "lenient_string")]
    pub organization: Option<String>,

    #[serde(rename = "Nomor Telepon", default, deserialize_with = "lenient_string")]
    pub phone: Option<String>,

    #[serde(
        rename = "Rencana Berlangganan Google Workspace Untuk Berapa User ?",
        default,
        deserialize_with = "lenient_string"
    )]
    pub planned_users: Option<String>,
}

impl FormSubmission {
    /// Parse a request body holding either a JSON object or a JSON string
    /// whose content is itself a JSON object.
    pub fn from_body(body: &[u8]) -> Result<Self, RelayError> {
        let value: Value = serde_json::from_slice(body).map_err(RelayError::InvalidSubmission)?;
        let value = match value {
            Value::String(encoded) => {
                serde_json::from_str(&encoded).map_err(RelayError::InvalidSubmission)?
            }
            other => other,
        };
        if !value.is_object() {
            return Err(RelayError::InvalidSubmission(serde::de::Error::custom(
                "submission must be a JSON object",
            )));
        }
        serde_json::from_value(value).map_err(RelayError::InvalidSubmission)
    }
}

/// Strings pass through, other scalars are rendered as text, null is absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected a string, found {}",
            other
        ))),
    }
}
