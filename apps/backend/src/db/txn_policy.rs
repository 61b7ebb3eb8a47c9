use std::sync::OnceLock;

/// What `with_txn` does with a transaction whose body returned `Ok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnPolicy {
    /// Persist the body's writes.
    CommitOnOk,
    /// Discard the body's writes but still return its value. Used by test
    /// binaries that must leave the store untouched.
    RollbackOnOk,
}

impl TxnPolicy {
    /// Parse a `QUIZ_TXN_POLICY` value. Anything but `rollback` commits.
    pub fn from_setting(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("rollback") {
            TxnPolicy::RollbackOnOk
        } else {
            TxnPolicy::CommitOnOk
        }
    }
}

static POLICY: OnceLock<TxnPolicy> = OnceLock::new();

/// The process policy; `CommitOnOk` until one is installed.
pub fn current() -> TxnPolicy {
    POLICY.get().copied().unwrap_or(TxnPolicy::CommitOnOk)
}

/// Install the process policy. Later calls are ignored.
pub fn set_txn_policy(policy: TxnPolicy) {
    let _ = POLICY.set(policy);
}
