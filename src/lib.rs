//! onfs - generate manifests that run an NFS provisioner on top of OpenEBS
//!
//! An application name and a storage size are turned into a consistent set of
//! Kubernetes object names and claim sizes, which are substituted into a fixed
//! multi-document manifest and written to `{app}-nfs.yaml`.

pub mod commands;
pub mod manifest;
pub mod utils;
