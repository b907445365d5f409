//! Persistent volume model.
//!
//! Only the fields a local volume provisioner reasons about are modelled.
//! The cache itself never looks past [`ObjectMeta`].

use serde::{Deserialize, Serialize};

use super::object_meta::{Metadata, ObjectMeta};

/// Annotation recording which provisioner created a volume.
pub const ANN_PROVISIONED_BY: &str = "pv.kubernetes.io/provisioned-by";

/// What happens to the backing storage once the claim is released
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReclaimPolicy {
    /// Keep the storage for manual reclamation
    #[default]
    Retain,
    /// Delete the storage
    Delete,
    /// Scrub and reuse the storage
    Recycle,
}

/// Volume lifecycle phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumePhase {
    /// Not yet available
    #[default]
    Pending,
    /// Free for binding
    Available,
    /// Bound to a claim
    Bound,
    /// Claim deleted, storage not yet reclaimed
    Released,
    /// Automatic reclamation failed
    Failed,
}

/// Desired state of a volume
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistentVolumeSpec {
    /// Storage capacity as a quantity string (e.g. `10Gi`)
    #[serde(default)]
    pub capacity: String,

    /// Storage class the volume belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_class_name: Option<String>,

    /// Host path of the backing local disk
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_path: Option<String>,

    /// Node the local disk is attached to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_affinity_hostname: Option<String>,

    /// What to do with the storage once released
    #[serde(default)]
    pub reclaim_policy: ReclaimPolicy,
}

/// Observed state of a volume
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistentVolumeStatus {
    /// Current lifecycle phase
    #[serde(default)]
    pub phase: VolumePhase,
}

/// A cluster-scoped persistent volume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistentVolume {
    /// Identity, labels and annotations
    pub metadata: ObjectMeta,

    /// Desired state
    #[serde(default)]
    pub spec: PersistentVolumeSpec,

    /// Observed state
    #[serde(default)]
    pub status: PersistentVolumeStatus,
}

impl PersistentVolume {
    /// Create a pending volume with the given name and default spec.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            metadata: ObjectMeta::named(name),
            ..Default::default()
        }
    }

    /// Set a label on the volume.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata = self.metadata.with_label(key, value);
        self
    }

    /// Set an annotation on the volume.
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata = self.metadata.with_annotation(key, value);
        self
    }

    /// Mark the volume as created by `provisioner`.
    pub fn provisioned_by(self, provisioner: impl Into<String>) -> Self {
        self.with_annotation(ANN_PROVISIONED_BY, provisioner)
    }

    /// Set the lifecycle phase.
    pub fn with_phase(mut self, phase: VolumePhase) -> Self {
        self.status.phase = phase;
        self
    }

    /// The volume name.
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// The provisioner recorded on the volume, if any.
    pub fn provisioner(&self) -> Option<&str> {
        self.metadata.annotation(ANN_PROVISIONED_BY)
    }
}

impl Metadata for PersistentVolume {
    fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_volume_defaults() {
        let pv = PersistentVolume::new("local-pv-1");
        assert_eq!(pv.name(), "local-pv-1");
        assert_eq!(pv.status.phase, VolumePhase::Pending);
        assert_eq!(pv.spec.reclaim_policy, ReclaimPolicy::Retain);
        assert!(pv.provisioner().is_none());
    }

    #[test]
    fn test_provisioned_by_sets_annotation() {
        let pv = PersistentVolume::new("local-pv-1").provisioned_by("local-volume-provisioner");
        assert_eq!(pv.provisioner(), Some("local-volume-provisioner"));
    }

    #[test]
    fn test_yaml_manifest_parsing() {
        let yaml = r"
metadata:
  name: local-pv-2
  annotations:
    pv.kubernetes.io/provisioned-by: local-volume-provisioner
spec:
  capacity: 100Gi
  storageClassName: local-storage
  localPath: /mnt/disks/ssd1
  nodeAffinityHostname: node-a
  reclaimPolicy: Delete
status:
  phase: Available
";
        let pv: PersistentVolume = serde_yaml::from_str(yaml).expect("YAML should parse");
        assert_eq!(pv.name(), "local-pv-2");
        assert_eq!(pv.provisioner(), Some("local-volume-provisioner"));
        assert_eq!(pv.spec.capacity, "100Gi");
        assert_eq!(pv.spec.local_path.as_deref(), Some("/mnt/disks/ssd1"));
        assert_eq!(pv.spec.reclaim_policy, ReclaimPolicy::Delete);
        assert_eq!(pv.status.phase, VolumePhase::Available);
    }

    #[test]
    fn test_json_round_trip_preserves_identity() {
        let pv = PersistentVolume::new("local-pv-3").with_label("provisioner", "mine");
        let json = serde_json::to_string(&pv).expect("serialize");
        let back: PersistentVolume = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, pv);
    }
}
