//! User-facing errors with actionable suggestions

use colored::Colorize;
use thiserror::Error;

use crate::manifest::ManifestError;

/// Error with suggestions, printed once before the process exits
#[derive(Error, Debug)]
#[error("{message}")]
pub struct OnfsError {
    pub message: String,
    pub suggestions: Vec<String>,
}

impl OnfsError {
    /// Create a new error with suggestions
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestions: Vec::new(),
        }
    }

    /// Add a suggestion to the error
    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Print the error and its suggestions to stdout
    pub fn display(&self) {
        println!("{} {}", "Error:".red().bold(), self.message);

        if !self.suggestions.is_empty() {
            println!();
            println!("{}", "Suggestions:".yellow().bold());
            for suggestion in &self.suggestions {
                println!("  {} {}", "→".blue(), suggestion);
            }
        }
    }

    // Common error patterns

    pub fn invalid_application_name(message: String) -> Self {
        Self::new(message)
            .suggest("Use lowercase letters, digits and '-', starting with a letter")
            .suggest("Pass --skip-name-validation to use the name unchanged")
    }

    pub fn invalid_size(message: String) -> Self {
        Self::new(message).suggest("Pass a size of at least 0.1 GiB, e.g. --size 5")
    }

    pub fn file_create(message: String) -> Self {
        Self::new(message)
            .suggest("Check that the current directory exists and is writable")
            .suggest("Remove or fix permissions on an existing manifest file")
    }

    pub fn template(message: String) -> Self {
        Self::new(message).suggest("The built-in manifest template is broken; please report this")
    }
}

/// Helper to display error and exit
pub fn display_error_and_exit(error: OnfsError) -> ! {
    error.display();
    std::process::exit(1);
}

/// Convert an anyhow error into an [`OnfsError`] with suggestions
pub fn enhance_error(err: anyhow::Error) -> OnfsError {
    let message = format!("{:#}", err);

    let manifest_error = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<ManifestError>());

    match manifest_error {
        Some(ManifestError::InvalidApplicationName { .. }) => {
            OnfsError::invalid_application_name(message)
        }
        Some(ManifestError::InvalidSize { .. }) => OnfsError::invalid_size(message),
        Some(ManifestError::FileCreate { .. }) => OnfsError::file_create(message),
        Some(
            ManifestError::TemplateParse { .. }
            | ManifestError::UnknownPlaceholder { .. }
            | ManifestError::Render { .. },
        ) => OnfsError::template(message),
        None => OnfsError::new(message).suggest("Run with -v for more details"),
    }
}
