use alloy_primitives::U256;

use crate::error::FlagError;

pub type TokenId = U256;

/// Width of one encoded token id: 64 hex characters, i.e. 256 bits.
pub const TOKEN_HEX_WIDTH: usize = 64;

/// Splits a concatenated hex blob into big-endian 256-bit token ids,
/// preserving chunk order and duplicates.
pub fn decode_token_ids(hex_blob: &str) -> Result<Vec<TokenId>, FlagError> {
    if hex_blob.is_empty() {
        return Err(FlagError::InvalidInput(
            "encoded token ids can't be empty".to_string(),
        ));
    }

    if hex_blob.len() % TOKEN_HEX_WIDTH != 0 {
        return Err(FlagError::InvalidInput(format!(
            "length {} is not a multiple of {} hex characters",
            hex_blob.len(),
            TOKEN_HEX_WIDTH
        )));
    }

    let mut token_ids = Vec::with_capacity(hex_blob.len() / TOKEN_HEX_WIDTH);
    for chunk in hex_blob.as_bytes().chunks(TOKEN_HEX_WIDTH) {
        token_ids.push(chunk_to_token_id(chunk)?);
    }

    Ok(token_ids)
}

/// Encodes a token id back to its 64-character zero-padded hex form.
pub fn encode_token_id(token_id: TokenId) -> String {
    hex::encode(token_id.to_be_bytes::<32>())
}

fn chunk_to_token_id(chunk: &[u8]) -> Result<TokenId, FlagError> {
    let bytes = hex::decode(chunk)
        .map_err(|err| FlagError::InvalidInput(format!("bad hex in token id chunk: {err}")))?;
    let array: [u8; 32] = bytes
        .try_into()
        .map_err(|_| FlagError::InvalidInput("token id chunk has invalid length".to_string()))?;
    Ok(U256::from_be_bytes(array))
}
