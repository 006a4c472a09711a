//! NFS manifest derivation and rendering

pub mod error;
pub mod nfs;
pub mod params;
pub mod template;
pub mod validate;

// Re-export commonly used items
pub use error::ManifestError;
pub use nfs::{output_file_name, render_manifest};
pub use params::{AccessMode, ManifestParams};
pub use template::Template;
