//! Node.js Dockerfile strategy
//!
//! Two-stage build: dependencies and the optional build script run in the
//! builder stage, the runtime stage copies the result and starts via the
//! package manager's start script as a non-root user.

use super::DockerTemplate;
use crate::findings::Findings;

const PORT: u16 = 3000;

pub struct NodeTemplate;

impl DockerTemplate for NodeTemplate {
    fn render_dockerfile(&self, _findings: &Findings) -> String {
        let lines = [
            "FROM node:20-slim AS builder".to_string(),
            "WORKDIR /app".to_string(),
            "COPY package*.json ./".to_string(),
            "RUN npm install".to_string(),
            "COPY . .".to_string(),
            "RUN npm run build --if-present".to_string(),
            String::new(),
            "FROM node:20-slim".to_string(),
            "WORKDIR /app".to_string(),
            "RUN groupadd -r appuser && useradd -r -g appuser appuser".to_string(),
            String::new(),
            "COPY --from=builder /app ./".to_string(),
            String::new(),
            format!("EXPOSE {}", PORT),
            "USER appuser".to_string(),
            "CMD [\"npm\", \"start\"]".to_string(),
            String::new(),
        ];
        lines.join("\n")
    }
}
