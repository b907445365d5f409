pub mod config;
pub mod object_meta;
pub mod volume;

pub use config::{
    AdmissionConfig, CacheConfig, Config, KeyStrategy, LogFormat, LoggingConfig, RotationPolicy,
};
pub use object_meta::{Metadata, ObjectMeta};
pub use volume::{
    PersistentVolume, PersistentVolumeSpec, PersistentVolumeStatus, ReclaimPolicy, VolumePhase,
    ANN_PROVISIONED_BY,
};
