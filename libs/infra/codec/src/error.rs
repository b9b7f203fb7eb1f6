use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("[CODEC_ENCODE]: failed to serialize frame: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("[CODEC_DECODE]: failed to deserialize frame: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("[CODEC_SHAPE]: envelope is missing a \"type\" field")]
    MissingType,

    #[error("[CODEC_SHAPE]: envelope is missing a \"data\" field")]
    MissingData,
}
