use eventboard_core::{BoardError, BoardResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// JSON serializer for domain models
pub struct JsonSerializer;

impl JsonSerializer {
    /// Pretty-printed JSON, keys in declaration order.
    pub fn to_bytes<T: Serialize + ?Sized>(data: &T) -> BoardResult<Vec<u8>> {
        serde_json::to_vec_pretty(data).map_err(|e| BoardError::Serialization(e.to_string()))
    }

    pub fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> BoardResult<T> {
        serde_json::from_slice(bytes).map_err(|e| BoardError::MalformedData(e.to_string()))
    }
}
