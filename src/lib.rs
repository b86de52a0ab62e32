//! dockgen - repository classifier and Dockerfile generator
//!
//! This library inspects an arbitrary source-code checkout, infers its
//! primary language, framework, and runnable entry point, and synthesizes a
//! containerization recipe (a Dockerfile plus a .dockerignore) tailored to
//! the detected stack.
//!
//! # Core Concepts
//!
//! - **FileIndex**: a one-pass, normalized index of the workspace tree that
//!   every detector shares
//! - **Detectors**: per-ecosystem signal scanners producing independent
//!   language candidates with confidence scores
//! - **Findings**: the classification result, serializable for transport
//!   and patchable by external refinement providers
//! - **Templates**: language-keyed strategies rendering the deployment
//!   artifacts
//!
//! # Example Usage
//!
//! ```no_run
//! use dockgen::{generate_deployment_files, Classifier, TemplateRegistry};
//! use std::path::Path;
//!
//! fn containerize(repo: &Path) -> anyhow::Result<()> {
//!     let findings = Classifier::with_defaults().classify(repo)?;
//!     println!("{} / {}", findings.language, findings.framework);
//!
//!     let registry = TemplateRegistry::with_defaults();
//!     let outcome = generate_deployment_files(repo, &findings, &registry);
//!     println!("Dockerfile written: {}", outcome.dockerfile_written);
//!     Ok(())
//! }
//! ```

// Public modules
pub mod cli;
pub mod config;
pub mod detect;
pub mod findings;
pub mod generate;
pub mod index;
pub mod refine;
pub mod scm;
pub mod tasks;
pub mod templates;
pub mod util;

// Re-export key types for convenient access
pub use config::{ConfigError, DockgenConfig};
pub use detect::{Classifier, LanguageCandidate, ManifestParseError, SignalDetector};
pub use findings::{Architecture, Findings, FindingsPatch, FindingsReport, Language};
pub use generate::{generate_deployment_files, GenerationOutcome};
pub use index::{FileIndex, IndexError};
pub use refine::{RefinementError, RefinementProvider, RefinementService};
pub use scm::{GitClient, ScmError};
pub use tasks::{LogBroadcaster, TaskRegistry, TaskStatus};
pub use templates::{DockerTemplate, TemplateRegistry};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_dockgen() {
        assert_eq!(NAME, "dockgen");
    }
}
