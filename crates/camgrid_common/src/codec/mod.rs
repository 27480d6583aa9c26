mod json;
mod raw;

pub use json::{decode_snapshot, decode_snapshot_bytes, encode_snapshot};
pub use raw::UndecodedCodec;
