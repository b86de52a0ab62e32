//! Python Dockerfile strategy
//!
//! Two-stage build: the dependency layer installs from the package manifest
//! alone so source edits reuse the cached layer, then a slim runtime stage
//! runs as a non-root user with a framework-specific launch command.

use super::{module_path, DockerTemplate};
use crate::findings::Findings;

const PYTHON_MANIFESTS: &[&str] = &["requirements.txt", "pyproject.toml", "setup.py", "Pipfile"];

pub struct PythonTemplate;

impl DockerTemplate for PythonTemplate {
    fn render_dockerfile(&self, findings: &Findings) -> String {
        let framework = findings.framework.as_str();
        let entry_point = findings.entry_point.as_deref().unwrap_or("main.py");
        let manifest = detected_manifest(findings);

        let port = match framework {
            "Flask" => 5000,
            _ => 8000,
        };

        let mut lines = vec![
            "# Multi-stage build for efficiency".to_string(),
            "FROM python:3.11-slim AS builder".to_string(),
            "WORKDIR /app".to_string(),
            "ENV PYTHONDONTWRITEBYTECODE 1".to_string(),
            "ENV PYTHONUNBUFFERED 1".to_string(),
            String::new(),
            "RUN apt-get update && apt-get install -y --no-install-recommends gcc python3-dev"
                .to_string(),
            String::new(),
            format!("COPY {} .", manifest),
            install_command(manifest),
            String::new(),
            "FROM python:3.11-slim".to_string(),
            "WORKDIR /app".to_string(),
            String::new(),
            "# Create a non-root user".to_string(),
            "RUN groupadd -r appuser && useradd -r -g appuser appuser".to_string(),
            String::new(),
            "COPY --from=builder /root/.local /home/appuser/.local".to_string(),
            "COPY . .".to_string(),
            String::new(),
            "ENV PATH=/home/appuser/.local/bin:$PATH".to_string(),
            format!("EXPOSE {}", port),
            String::new(),
            "USER appuser".to_string(),
        ];

        match framework {
            "FastAPI" => {
                let module = module_path(entry_point);
                lines.push(format!(
                    "CMD [\"uvicorn\", \"{}:app\", \"--host\", \"0.0.0.0\", \"--port\", \"{}\"]",
                    module, port
                ));
            }
            "Django" => {
                lines.push(format!(
                    "CMD [\"python\", \"{}\", \"runserver\", \"0.0.0.0:{}\"]",
                    entry_point, port
                ));
            }
            "Flask" => {
                let module = module_path(entry_point);
                lines.push(format!("ENV FLASK_APP={}", module));
                lines.push(format!(
                    "CMD [\"flask\", \"run\", \"--host=0.0.0.0\", \"--port={}\"]",
                    port
                ));
            }
            _ => {
                lines.push(format!("CMD [\"python\", \"{}\"]", entry_point));
            }
        }

        lines.push(String::new());
        lines.join("\n")
    }
}

fn install_command(manifest: &str) -> String {
    match manifest {
        "requirements.txt" => {
            "RUN pip install --no-cache-dir --user -r requirements.txt".to_string()
        }
        "Pipfile" => "RUN pip install --no-cache-dir --user pipenv && pipenv install --deploy"
            .to_string(),
        _ => "RUN pip install --no-cache-dir --user .".to_string(),
    }
}

/// First Python manifest the classifier actually saw, so the dependency
/// layer copies a file that exists.
fn detected_manifest(findings: &Findings) -> &str {
    PYTHON_MANIFESTS
        .iter()
        .find(|m| findings.detected_files.iter().any(|f| f == *m))
        .copied()
        .unwrap_or("requirements.txt")
}
