use std::collections::HashMap;

use alloy_primitives::U256;
use serde::Deserialize;
use serde_json::Value;

use crate::error::FlagError;
use crate::token::TokenId;

/// Shape of the asset API response: a top-level `assets` array.
#[derive(Debug, Deserialize)]
pub struct AssetsDocument {
    pub assets: Vec<AssetRecord>,
}

/// One asset record. Both fields stay untyped so that a record with a
/// non-boolean flag or an odd token id is reported with the offending
/// value instead of failing opaquely inside deserialization.
#[derive(Debug, Deserialize)]
pub struct AssetRecord {
    pub token_id: Value,
    pub supports_wyvern: Value,
}

/// Builds the token id -> flag mapping from every record in the document.
/// On duplicate token ids the last record wins.
pub fn build_flag_map(doc: &AssetsDocument) -> Result<HashMap<TokenId, bool>, FlagError> {
    let mut mapping = HashMap::with_capacity(doc.assets.len());
    for asset in &doc.assets {
        let flag = match &asset.supports_wyvern {
            Value::Bool(flag) => *flag,
            other => return Err(FlagError::Format(other.clone())),
        };
        mapping.insert(record_token_id(&asset.token_id)?, flag);
    }
    Ok(mapping)
}

/// Emits one '1'/'0' per token id, in input order.
pub fn flag_bitstring(doc: &AssetsDocument, token_ids: &[TokenId]) -> Result<String, FlagError> {
    let mapping = build_flag_map(doc)?;

    let mut result = String::with_capacity(token_ids.len());
    for token_id in token_ids {
        match mapping.get(token_id) {
            Some(true) => result.push('1'),
            Some(false) => result.push('0'),
            None => return Err(FlagError::Lookup(*token_id)),
        }
    }

    Ok(result)
}

fn record_token_id(value: &Value) -> Result<TokenId, FlagError> {
    match value {
        Value::String(raw) => raw
            .parse::<U256>()
            .map_err(|err| FlagError::Parse(format!("invalid token_id {value}: {err}"))),
        Value::Number(number) => number
            .as_u64()
            .map(U256::from)
            .ok_or_else(|| FlagError::Parse(format!("invalid token_id {value}"))),
        other => Err(FlagError::Parse(format!("invalid token_id {other}"))),
    }
}
