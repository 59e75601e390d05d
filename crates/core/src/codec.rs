// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Record codec: bytes on disk to [`JobRecord`] and back.

use crate::record::JobRecord;
use serde_json::Value;
use thiserror::Error;

/// Errors from encoding or decoding a record payload.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The bytes are not valid in the codec's format at all.
    #[error("malformed payload: {0}")]
    Malformed(String),
    /// The payload parsed but does not have the shape of a job record.
    #[error("not a job record: {0}")]
    NotARecord(String),
    #[error("encode failed: {0}")]
    Encode(String),
}

/// Encodes and decodes job records and result blobs.
pub trait RecordCodec: Send + Sync {
    fn encode(&self, record: &JobRecord) -> Result<Vec<u8>, CodecError>;
    fn decode(&self, bytes: &[u8]) -> Result<JobRecord, CodecError>;
    fn encode_value(&self, value: &Value) -> Result<Vec<u8>, CodecError>;
    fn decode_value(&self, bytes: &[u8]) -> Result<Value, CodecError>;
}

/// JSON codec backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl RecordCodec for JsonCodec {
    fn encode(&self, record: &JobRecord) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(record).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<JobRecord, CodecError> {
        let value = self.decode_value(bytes)?;
        if !value.is_object() {
            let message = format!("expected a mapping, got {}", kind(&value));
            return Err(CodecError::NotARecord(message));
        }
        serde_json::from_value(value).map_err(|e| CodecError::NotARecord(e.to_string()))
    }

    fn encode_value(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(value).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode_value(&self, bytes: &[u8]) -> Result<Value, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Malformed(e.to_string()))
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
