#![allow(dead_code)]

// tests/common/mod.rs

use quiz_backend::db::txn_policy::{set_txn_policy, TxnPolicy};

// Logging is auto-installed for every test binary that includes this module.
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

// Every test builds its own in-memory store, so committing is harmless and
// lets tests re-read what a workflow wrote. `QUIZ_TXN_POLICY=rollback`
// flips it per run.
#[ctor::ctor]
fn init_txn_policy() {
    let raw = std::env::var("QUIZ_TXN_POLICY").unwrap_or_default();
    set_txn_policy(TxnPolicy::from_setting(&raw));
}
