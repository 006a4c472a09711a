//! Input checks applied before deriving resource names

use super::error::ManifestError;
use super::params::{backing_size, format_gigabytes};
use regex::Regex;
use std::sync::OnceLock;

/// Suffix of the longest name that also ends up as a label value,
/// Service name and container name
const LABELLED_NAME_SUFFIX: &str = "-openebs-nfs-provisioner";

/// Kubernetes limit for label values and DNS-1035 labels
const MAX_LABEL_LENGTH: usize = 63;

pub const MAX_APPLICATION_NAME_LENGTH: usize = MAX_LABEL_LENGTH - LABELLED_NAME_SUFFIX.len();

static NAME_PATTERN: OnceLock<Regex> = OnceLock::new();

fn name_pattern() -> &'static Regex {
    // Service names are DNS-1035 labels, so the first character must be a letter
    NAME_PATTERN.get_or_init(|| {
        Regex::new(r"^[a-z]([-a-z0-9]*[a-z0-9])?$").expect("application name pattern is valid")
    })
}

/// Reject an empty application name; applies even when name rules are skipped
pub fn require_application_name(name: &str) -> Result<(), ManifestError> {
    if name.is_empty() {
        return Err(ManifestError::InvalidApplicationName {
            name: name.to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Check that every name derived from `name` is a valid Kubernetes object name
pub fn validate_application_name(name: &str) -> Result<(), ManifestError> {
    let invalid = |reason: String| ManifestError::InvalidApplicationName {
        name: name.to_string(),
        reason,
    };

    require_application_name(name)?;

    if name.len() > MAX_APPLICATION_NAME_LENGTH {
        return Err(invalid(format!(
            "must be at most {} characters so that '{}{}' fits in {} characters",
            MAX_APPLICATION_NAME_LENGTH, name, LABELLED_NAME_SUFFIX, MAX_LABEL_LENGTH
        )));
    }

    if !name_pattern().is_match(name) {
        return Err(invalid(
            "must consist of lowercase alphanumeric characters or '-', start with a letter and end with an alphanumeric character"
                .to_string(),
        ));
    }

    Ok(())
}

/// Check that both claim sizes render as finite, non-zero values with the
/// backing claim strictly larger than the NFS claim
pub fn validate_size(size: f64) -> Result<(), ManifestError> {
    let invalid = |reason: &str| ManifestError::InvalidSize {
        size,
        reason: reason.to_string(),
    };

    if !size.is_finite() || size <= 0.0 {
        return Err(invalid("must be a finite number greater than 0"));
    }

    let backing = backing_size(size);
    if !backing.is_finite() {
        return Err(invalid("backing claim size overflows"));
    }

    let nfs = rendered_value(size);
    if nfs <= 0.0 || rendered_value(backing) <= nfs {
        return Err(invalid(&format!(
            "too small: backing claim {} must be larger than NFS claim {}",
            format_gigabytes(backing),
            format_gigabytes(size)
        )));
    }

    Ok(())
}

/// Numeric value of a size after two-decimal rendering
fn rendered_value(size: f64) -> f64 {
    format!("{:.2}", size).parse().unwrap_or(0.0)
}
