// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[test]
fn decode_reads_encoded_record() {
    let record = JobRecord::new(1234, "20261018").with_field("fun", "state.apply");
    let bytes = JsonCodec.encode(&record).unwrap();
    assert_eq!(JsonCodec.decode(&bytes).unwrap(), record);
}

#[yare::parameterized(
    array   = { b"[1, 2, 3]" },
    number  = { b"42" },
    string  = { b"\"pid\"" },
    null    = { b"null" },
    no_pid  = { br#"{"jid": "j"}"# },
    no_jid  = { br#"{"pid": 5}"# },
    bad_pid = { br#"{"pid": "five", "jid": "j"}"# },
)]
fn decode_rejects_non_record_shapes(bytes: &[u8]) {
    let err = JsonCodec.decode(bytes).unwrap_err();
    assert!(matches!(err, CodecError::NotARecord(_)), "got {err:?}");
}

#[yare::parameterized(
    truncated = { br#"{"pid": 5, "ji"# },
    garbage   = { b"\x80\x81\x82" },
    nul_bytes = { b"\0\0\0\0" },
)]
fn decode_reports_malformed_bytes(bytes: &[u8]) {
    let err = JsonCodec.decode(bytes).unwrap_err();
    assert!(matches!(err, CodecError::Malformed(_)), "got {err:?}");
}

#[test]
fn value_codec_handles_arbitrary_results() {
    let value = json!({"retcode": 0, "return": {"minion-1": true}, "out": ["a", "b"]});
    let bytes = JsonCodec.encode_value(&value).unwrap();
    assert_eq!(JsonCodec.decode_value(&bytes).unwrap(), value);
}
