// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;
use tempfile::tempdir;

#[test]
fn persist_creates_job_dir_and_file() {
    let dir = tempdir().unwrap();
    let cache = ResultCache::new(dir.path().join("minion_jobs"), JsonCodec);
    let jid = Jid::new("20261018120000000001");

    let path = cache.persist(&jid, &json!({"retcode": 0})).unwrap();

    assert_eq!(
        path,
        dir.path().join("minion_jobs/20261018120000000001/return.p")
    );
    assert!(path.is_file());
    assert!(!path.with_extension("p.tmp").exists());
}

#[test]
fn persist_overwrites_previous_result() {
    let dir = tempdir().unwrap();
    let cache = ResultCache::new(dir.path(), JsonCodec);
    let jid = Jid::new("j1");

    cache.persist(&jid, &json!({"return": "first"})).unwrap();
    cache.persist(&jid, &json!({"return": "second"})).unwrap();

    assert_eq!(cache.load(&jid).unwrap(), Some(json!({"return": "second"})));
}

#[test]
fn load_missing_result_is_none() {
    let dir = tempdir().unwrap();
    let cache = ResultCache::new(dir.path(), JsonCodec);

    assert_eq!(cache.load(&Jid::new("nope")).unwrap(), None);
}

#[test]
fn load_job_dir_without_file_is_none() {
    let dir = tempdir().unwrap();
    let cache = ResultCache::new(dir.path(), JsonCodec);
    std::fs::create_dir_all(dir.path().join("j1")).unwrap();

    assert_eq!(cache.load(&Jid::new("j1")).unwrap(), None);
}

#[test]
fn load_corrupt_result_is_codec_error() {
    let dir = tempdir().unwrap();
    let cache = ResultCache::new(dir.path(), JsonCodec);
    std::fs::create_dir_all(dir.path().join("j1")).unwrap();
    std::fs::write(dir.path().join("j1").join(RESULT_FILE), b"{oops").unwrap();

    let err = cache.load(&Jid::new("j1")).unwrap_err();

    assert!(matches!(err, StoreError::Codec(_)));
}

#[test]
fn persist_rejects_path_like_jid() {
    let dir = tempdir().unwrap();
    let cache = ResultCache::new(dir.path(), JsonCodec);

    let jid = Jid::new("../outside");
    let err = cache.persist(&jid, &json!(null)).unwrap_err();

    assert!(matches!(err, StoreError::InvalidJid(_)));
}

#[test]
fn from_config_uses_jobs_dir() {
    let cache = ResultCache::from_config(&HostConfig::new("/var/cache/minion"));
    assert_eq!(
        cache.result_path(&Jid::new("j")),
        PathBuf::from("/var/cache/minion/minion_jobs/j/return.p")
    );
}
