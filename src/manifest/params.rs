//! Manifest parameter record: resource names and sizes derived from an application name

use serde::Serialize;

pub const DEFAULT_OPENEBS_STORAGE_CLASS: &str = "openebs-jiva-default";
pub const DEFAULT_STORAGE_SIZE: f64 = 5.0;

const PROVISIONER_STATEFUL_SUFFIX: &str = "openebs-nfs-provisioner";
const NFS_CLUSTER_ROLE_SUFFIX: &str = "openebs-nfs-provisioner-runner";
const NFS_CLUSTER_ROLE_BINDING_SUFFIX: &str = "openebs-run-nfs-provisioner";
const NFS_ROLE_SUFFIX: &str = "openebs-leader-locking-nfs-provisioner";
const PROVISIONER_SUFFIX: &str = "openebs.io/nfs";
const OPENEBS_PVC_SUFFIX: &str = "openebspvc";
const NFS_STORAGE_CLASS_SUFFIX: &str = "openebs-nfs";
const NFS_PVC_SUFFIX: &str = "openebs-nfs-pvc";

/// Fraction added on top of the requested size for the backing claim
const FILESYSTEM_HEADROOM: f64 = 0.1;

/// Access mode of the NFS-facing claim
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub enum AccessMode {
    #[default]
    ReadWriteMany,
}

impl AccessMode {
    pub fn as_str(&self) -> &str {
        match self {
            AccessMode::ReadWriteMany => "ReadWriteMany",
        }
    }
}

/// Every name and size substituted into the NFS manifest
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ManifestParams {
    pub application_name: String,
    pub provisioner_stateful_name: String,
    #[serde(rename = "NFSClusterRoleName")]
    pub nfs_cluster_role_name: String,
    #[serde(rename = "NFSClusterRoleBindingName")]
    pub nfs_cluster_role_binding_name: String,
    #[serde(rename = "NFSRoleName")]
    pub nfs_role_name: String,
    pub provisioner_name: String,
    #[serde(rename = "OpenebsPVCName")]
    pub openebs_pvc_name: String,
    #[serde(rename = "NFSStorageClass")]
    pub nfs_storage_class: String,
    #[serde(rename = "NFSPVCName")]
    pub nfs_pvc_name: String,
    pub openebs_storage_class: String,
    #[serde(rename = "NFSAccessMode")]
    pub nfs_access_mode: AccessMode,
    pub storage_size: f64,
    #[serde(rename = "NFSStorageSize")]
    pub nfs_storage_size: String,
    pub openebs_storage_size: String,
}

impl ManifestParams {
    /// Placeholder names a template may reference
    pub const FIELDS: &'static [&'static str] = &[
        "ApplicationName",
        "ProvisionerStatefulName",
        "NFSClusterRoleName",
        "NFSClusterRoleBindingName",
        "NFSRoleName",
        "ProvisionerName",
        "OpenebsPVCName",
        "NFSStorageClass",
        "NFSPVCName",
        "OpenebsStorageClass",
        "NFSAccessMode",
        "StorageSize",
        "NFSStorageSize",
        "OpenebsStorageSize",
    ];

    /// Derive the full record for an application.
    ///
    /// The application name is used verbatim; callers that need valid
    /// Kubernetes names should run [`super::validate::validate_application_name`] first.
    pub fn derive(app_name: &str, requested_size: f64, backing_storage_class: &str) -> Self {
        let hyphenated = |suffix: &str| format!("{}-{}", app_name, suffix);
        let joined = |suffix: &str| format!("{}{}", app_name, suffix);

        Self {
            application_name: app_name.to_string(),
            provisioner_stateful_name: hyphenated(PROVISIONER_STATEFUL_SUFFIX),
            nfs_cluster_role_name: hyphenated(NFS_CLUSTER_ROLE_SUFFIX),
            nfs_cluster_role_binding_name: hyphenated(NFS_CLUSTER_ROLE_BINDING_SUFFIX),
            nfs_role_name: hyphenated(NFS_ROLE_SUFFIX),
            provisioner_name: joined(PROVISIONER_SUFFIX),
            openebs_pvc_name: joined(OPENEBS_PVC_SUFFIX),
            nfs_storage_class: hyphenated(NFS_STORAGE_CLASS_SUFFIX),
            nfs_pvc_name: hyphenated(NFS_PVC_SUFFIX),
            openebs_storage_class: backing_storage_class.to_string(),
            nfs_access_mode: AccessMode::ReadWriteMany,
            storage_size: requested_size,
            nfs_storage_size: format_gigabytes(requested_size),
            openebs_storage_size: format_gigabytes(backing_size(requested_size)),
        }
    }

    pub fn derive_with_default_class(app_name: &str, requested_size: f64) -> Self {
        Self::derive(app_name, requested_size, DEFAULT_OPENEBS_STORAGE_CLASS)
    }

    /// Resolve a placeholder name to its rendered value
    pub fn lookup(&self, field: &str) -> Option<String> {
        let value = match field {
            "ApplicationName" => self.application_name.clone(),
            "ProvisionerStatefulName" => self.provisioner_stateful_name.clone(),
            "NFSClusterRoleName" => self.nfs_cluster_role_name.clone(),
            "NFSClusterRoleBindingName" => self.nfs_cluster_role_binding_name.clone(),
            "NFSRoleName" => self.nfs_role_name.clone(),
            "ProvisionerName" => self.provisioner_name.clone(),
            "OpenebsPVCName" => self.openebs_pvc_name.clone(),
            "NFSStorageClass" => self.nfs_storage_class.clone(),
            "NFSPVCName" => self.nfs_pvc_name.clone(),
            "OpenebsStorageClass" => self.openebs_storage_class.clone(),
            "NFSAccessMode" => self.nfs_access_mode.as_str().to_string(),
            "StorageSize" => self.storage_size.to_string(),
            "NFSStorageSize" => self.nfs_storage_size.clone(),
            "OpenebsStorageSize" => self.openebs_storage_size.clone(),
            _ => return None,
        };
        Some(value)
    }

    /// Names of every Kubernetes object derived from the application name
    pub fn resource_names(&self) -> [&str; 8] {
        [
            self.provisioner_stateful_name.as_str(),
            self.nfs_cluster_role_name.as_str(),
            self.nfs_cluster_role_binding_name.as_str(),
            self.nfs_role_name.as_str(),
            self.provisioner_name.as_str(),
            self.openebs_pvc_name.as_str(),
            self.nfs_storage_class.as_str(),
            self.nfs_pvc_name.as_str(),
        ]
    }
}

/// Size of the backing claim for a requested NFS size
pub fn backing_size(requested_size: f64) -> f64 {
    requested_size + FILESYSTEM_HEADROOM * requested_size
}

/// Render a GiB size the way it appears in the manifest
pub fn format_gigabytes(size: f64) -> String {
    format!("{:.2}G", size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_gigabytes(size: &str) -> f64 {
        size.trim_end_matches('G').parse().unwrap()
    }

    #[test]
    fn test_default_size_scenario() {
        let params = ManifestParams::derive_with_default_class("myapp", DEFAULT_STORAGE_SIZE);
        assert_eq!(params.nfs_storage_size, "5.00G");
        assert_eq!(params.openebs_storage_size, "5.50G");
        assert_eq!(params.provisioner_stateful_name, "myapp-openebs-nfs-provisioner");
        assert_eq!(params.openebs_storage_class, "openebs-jiva-default");
    }

    #[test]
    fn test_custom_size() {
        let params = ManifestParams::derive("foo", 10.0, "openebs-cstor");
        assert_eq!(params.nfs_storage_size, "10.00G");
        assert_eq!(params.openebs_storage_size, "11.00G");
        assert_eq!(params.openebs_storage_class, "openebs-cstor");
    }

    #[test]
    fn test_name_separators() {
        let params = ManifestParams::derive_with_default_class("web", 1.0);
        assert_eq!(params.nfs_cluster_role_name, "web-openebs-nfs-provisioner-runner");
        assert_eq!(params.nfs_cluster_role_binding_name, "web-openebs-run-nfs-provisioner");
        assert_eq!(params.nfs_role_name, "web-openebs-leader-locking-nfs-provisioner");
        assert_eq!(params.provisioner_name, "webopenebs.io/nfs");
        assert_eq!(params.openebs_pvc_name, "webopenebspvc");
        assert_eq!(params.nfs_storage_class, "web-openebs-nfs");
        assert_eq!(params.nfs_pvc_name, "web-openebs-nfs-pvc");
        assert_eq!(params.nfs_access_mode.as_str(), "ReadWriteMany");
    }

    #[test]
    fn test_backing_size_always_larger() {
        for size in [0.1, 0.5, 1.0, 2.5, 5.0, 7.25, 100.0, 1024.0] {
            let params = ManifestParams::derive_with_default_class("app", size);
            let nfs = parse_gigabytes(&params.nfs_storage_size);
            let openebs = parse_gigabytes(&params.openebs_storage_size);
            let expected = format!("{:.2}", size + 0.1 * size).parse::<f64>().unwrap();
            assert_eq!(openebs, expected, "size {}", size);
            assert!(openebs > nfs, "size {}", size);
        }
    }

    #[test]
    fn test_distinct_apps_never_collide() {
        let a = ManifestParams::derive_with_default_class("alpha", 5.0);
        let b = ManifestParams::derive_with_default_class("beta", 5.0);
        for (left, right) in a.resource_names().iter().zip(b.resource_names().iter()) {
            assert_ne!(left, right);
        }
    }

    #[test]
    fn test_derive_is_deterministic() {
        let first = ManifestParams::derive("db", 3.3, "openebs-jiva-default");
        let second = ManifestParams::derive("db", 3.3, "openebs-jiva-default");
        assert_eq!(first, second);
    }

    #[test]
    fn test_lookup_covers_every_field() {
        let params = ManifestParams::derive_with_default_class("myapp", 5.0);
        for field in ManifestParams::FIELDS {
            assert!(params.lookup(field).is_some(), "missing field {}", field);
        }
        assert!(params.lookup("Namespace").is_none());
        assert_eq!(params.lookup("StorageSize").as_deref(), Some("5"));
    }

    #[test]
    fn test_serialized_keys_match_fields() {
        let params = ManifestParams::derive_with_default_class("myapp", 5.0);
        let value = serde_json::to_value(&params).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), ManifestParams::FIELDS.len());
        for field in ManifestParams::FIELDS {
            assert!(object.contains_key(*field), "missing key {}", field);
        }
        assert_eq!(object["NFSAccessMode"], "ReadWriteMany");
    }
}
