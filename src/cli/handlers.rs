//! Command handlers returning process exit codes

use super::commands::{ClassifyArgs, GenerateArgs};
use super::output::OutputFormatter;
use crate::config::DockgenConfig;
use crate::detect::Classifier;
use crate::generate::generate_deployment_files;
use crate::refine::RefinementService;
use crate::templates::TemplateRegistry;
use std::path::PathBuf;
use tracing::{error, warn};

pub async fn handle_classify(args: &ClassifyArgs, quiet: bool) -> i32 {
    let root = repository_path(args.repository_path.clone());
    let classifier = Classifier::with_defaults();

    let findings = match classifier.classify(&root) {
        Ok(findings) => findings,
        Err(err) => {
            error!(error = %err, "Classification failed");
            return 1;
        }
    };

    let formatter = OutputFormatter::new(args.format.into());
    let rendered = match formatter.format_report(&findings.to_report()) {
        Ok(rendered) => rendered,
        Err(err) => {
            error!(error = %err, "Failed to format findings");
            return 1;
        }
    };

    match &args.output {
        Some(path) => {
            if let Err(err) = std::fs::write(path, &rendered) {
                error!(path = %path.display(), error = %err, "Failed to write output file");
                return 1;
            }
        }
        None if !quiet => println!("{}", rendered),
        None => {}
    }
    0
}

pub async fn handle_generate(args: &GenerateArgs, quiet: bool) -> i32 {
    let root = repository_path(args.repository_path.clone());
    let classifier = Classifier::with_defaults();

    let mut findings = match classifier.classify(&root) {
        Ok(findings) => findings,
        Err(err) => {
            error!(error = %err, "Classification failed");
            return 1;
        }
    };

    if args.refine {
        match DockgenConfig::from_env() {
            Ok(config) => {
                let service = RefinementService::from_config(&config);
                if service.is_enabled() {
                    service.refine(&mut findings).await;
                } else {
                    warn!("Refinement requested but no provider is configured");
                }
            }
            Err(err) => {
                warn!(error = %err, "Invalid configuration, skipping refinement");
            }
        }
    }

    let registry = TemplateRegistry::with_defaults();
    let outcome = generate_deployment_files(&root, &findings, &registry);

    if !quiet {
        let formatter = OutputFormatter::new(args.format.into());
        match formatter.format_report(&findings.to_report()) {
            Ok(rendered) => println!("{}", rendered),
            Err(err) => error!(error = %err, "Failed to format findings"),
        }
        match formatter.format_outcome(&outcome) {
            Ok(rendered) => println!("{}", rendered),
            Err(err) => error!(error = %err, "Failed to format outcome"),
        }
    }
    0
}

fn repository_path(arg: Option<PathBuf>) -> PathBuf {
    arg.unwrap_or_else(|| PathBuf::from("."))
}
