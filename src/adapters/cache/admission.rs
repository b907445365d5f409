//! Admission predicates.
//!
//! A predicate decides whether an object the cache has never seen may enter
//! it. Predicates must be pure and cheap: they run on the caller's thread in
//! the middle of `add`, `update` and `replace`.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::models::{AdmissionConfig, Metadata, ANN_PROVISIONED_BY};

/// Caller-supplied first-admission check.
pub type AdmissionPredicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Admit every object.
pub fn admit_all<T: 'static>() -> AdmissionPredicate<T> {
    Arc::new(|_: &T| true)
}

/// Admit objects carrying label `key` with exactly `value`.
pub fn label_equals<T>(key: impl Into<String>, value: impl Into<String>) -> AdmissionPredicate<T>
where
    T: Metadata + 'static,
{
    let (key, value) = (key.into(), value.into());
    Arc::new(move |obj: &T| obj.metadata().label(&key) == Some(value.as_str()))
}

/// Admit objects carrying annotation `key` with exactly `value`.
pub fn annotation_equals<T>(
    key: impl Into<String>,
    value: impl Into<String>,
) -> AdmissionPredicate<T>
where
    T: Metadata + 'static,
{
    let (key, value) = (key.into(), value.into());
    Arc::new(move |obj: &T| obj.metadata().annotation(&key) == Some(value.as_str()))
}

/// Admit objects created by the named provisioner.
pub fn provisioned_by<T>(provisioner: impl Into<String>) -> AdmissionPredicate<T>
where
    T: Metadata + 'static,
{
    annotation_equals(ANN_PROVISIONED_BY, provisioner)
}

/// Build a predicate requiring every rule in `config`.
pub fn from_config<T>(config: &AdmissionConfig) -> AdmissionPredicate<T>
where
    T: Metadata + 'static,
{
    let provisioner = config.provisioner_name.clone();
    let match_labels: BTreeMap<String, String> = config.match_labels.clone();

    Arc::new(move |obj: &T| {
        let meta = obj.metadata();
        let provisioner_ok = provisioner
            .as_deref()
            .is_none_or(|name| meta.annotation(ANN_PROVISIONED_BY) == Some(name));
        provisioner_ok
            && match_labels
                .iter()
                .all(|(key, value)| meta.label(key) == Some(value.as_str()))
    })
}
