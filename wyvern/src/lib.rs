pub mod error;
pub mod flags;
pub mod token;

pub use error::FlagError;
pub use flags::{build_flag_map, flag_bitstring, AssetRecord, AssetsDocument};
pub use token::{decode_token_ids, encode_token_id, TokenId};
