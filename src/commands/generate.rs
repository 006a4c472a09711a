//! Generate command: derive names, render the manifest and write it out

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::manifest::validate::{require_application_name, validate_application_name, validate_size};
use crate::manifest::{ManifestError, ManifestParams, output_file_name, render_manifest};

/// Options for generating an NFS manifest
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub app_name: String,
    pub size: f64,
    pub openebs_storage_class: String,
    pub skip_name_validation: bool,
    pub dry_run: bool,
    /// Directory the manifest is written to; the current directory when unset
    pub output_dir: Option<PathBuf>,
}

/// Handle the generate command.
///
/// Returns the path of the written manifest, or `None` in dry-run mode.
pub fn generate(options: GenerateOptions) -> Result<Option<PathBuf>> {
    if options.skip_name_validation {
        require_application_name(&options.app_name)?;
        crate::log_warn!(
            "Skipping validation of application name '{}'",
            options.app_name
        );
    } else {
        validate_application_name(&options.app_name)?;
    }
    validate_size(options.size)?;

    let params = ManifestParams::derive(
        &options.app_name,
        options.size,
        &options.openebs_storage_class,
    );

    crate::log_info!(
        "Generating NFS manifest for '{}' ({} NFS, {} backing on {})",
        params.application_name,
        params.nfs_storage_size,
        params.openebs_storage_size,
        params.openebs_storage_class
    );
    if let Ok(dump) = serde_json::to_string_pretty(&params) {
        crate::log_debug!("Manifest parameters:\n{}", dump);
    }

    let manifest = render_manifest(&params)?;

    if options.dry_run {
        crate::log_info!("Dry run: printing manifest instead of writing it");
        print!("{}", manifest);
        return Ok(None);
    }

    let file_name = output_file_name(&params.application_name);
    let path = match options.output_dir {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    };

    write_manifest(&path, &manifest)
        .with_context(|| format!("Failed to write manifest for '{}'", options.app_name))?;

    crate::log_info!("Wrote {}", path.display());
    Ok(Some(path))
}

/// Create (or truncate) `path` and write the rendered manifest into it
fn write_manifest(path: &Path, manifest: &str) -> Result<(), ManifestError> {
    let file_error = |source: std::io::Error| ManifestError::FileCreate {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(file_error)?;
    file.write_all(manifest.as_bytes()).map_err(file_error)?;
    file.flush().map_err(file_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(app_name: &str, dir: &Path) -> GenerateOptions {
        GenerateOptions {
            app_name: app_name.to_string(),
            size: 5.0,
            openebs_storage_class: "openebs-jiva-default".to_string(),
            skip_name_validation: false,
            dry_run: false,
            output_dir: Some(dir.to_path_buf()),
        }
    }

    #[test]
    fn test_generate_writes_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = generate(options("myapp", dir.path())).unwrap().unwrap();

        assert_eq!(path, dir.path().join("myapp-nfs.yaml"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("name: myapp-openebs-nfs-provisioner"));
        assert!(content.contains("storage: \"5.50G\""));
    }

    #[test]
    fn test_second_run_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("myapp-nfs.yaml");
        std::fs::write(&path, "stale content that is much longer than nothing\n".repeat(500))
            .unwrap();

        let mut opts = options("myapp", dir.path());
        opts.size = 10.0;
        generate(opts).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale content"));
        assert!(content.contains("storage: \"11.00G\""));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options("myapp", dir.path());
        opts.dry_run = true;

        assert!(generate(opts).unwrap().is_none());
        assert!(!dir.path().join("myapp-nfs.yaml").exists());
    }

    #[test]
    fn test_invalid_name_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let err = generate(options("My_App", dir.path())).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ManifestError>(),
            Some(ManifestError::InvalidApplicationName { .. })
        ));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_skip_name_validation() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options("MyApp", dir.path());
        opts.skip_name_validation = true;

        let path = generate(opts).unwrap().unwrap();
        assert!(path.ends_with("MyApp-nfs.yaml"));
    }

    #[test]
    fn test_invalid_size_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options("myapp", dir.path());
        opts.size = 0.0;

        let err = generate(opts).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ManifestError>(),
            Some(ManifestError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_tiny_size_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options("myapp", dir.path());
        opts.size = 0.004;

        assert!(generate(opts).is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_empty_name_rejected_even_when_skipping_validation() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options("", dir.path());
        opts.skip_name_validation = true;

        let err = generate(opts).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ManifestError>(),
            Some(ManifestError::InvalidApplicationName { .. })
        ));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_directory_reports_file_create() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let err = generate(options("myapp", &missing)).unwrap_err();
        let root = err.root_cause().to_string();
        assert!(
            err.chain()
                .any(|cause| matches!(
                    cause.downcast_ref::<ManifestError>(),
                    Some(ManifestError::FileCreate { .. })
                )),
            "unexpected error chain ending in: {}",
            root
        );
    }
}
