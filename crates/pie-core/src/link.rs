// File: crates/pie-core/src/link.rs
// Summary: Shareable link parameters; the whole configuration as base64-encoded JSON.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::LinkError;
use crate::model::Configuration;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// Encode `config` as a single link parameter.
pub fn encode(config: &Configuration) -> Result<LinkParams, LinkError> {
    let json = serde_json::to_vec(config)?;
    Ok(LinkParams { data: Some(STANDARD.encode(json)) })
}

/// Decode `params` and shallow-merge the result over `current`. Without a
/// `data` parameter the current configuration is returned unchanged.
pub fn decode_over(current: &Configuration, params: &LinkParams) -> Result<Configuration, LinkError> {
    let Some(data) = params.data.as_deref().filter(|d| !d.is_empty()) else {
        return Ok(current.clone());
    };
    let unescaped = percent_decode_str(data).decode_utf8()?;
    let bytes = STANDARD.decode(unescaped.trim())?;
    let patch: Value = serde_json::from_slice(&bytes)?;
    Ok(current.merged_with(&patch)?)
}
