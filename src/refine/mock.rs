//! Mock refinement provider for tests

use super::{RefinementError, RefinementProvider};
use crate::findings::{Findings, FindingsPatch};
use async_trait::async_trait;

enum Behavior {
    Patch(FindingsPatch),
    Decline,
    Fail,
}

/// Scripted provider with a fixed response, used by unit and integration
/// tests to exercise the fallback chain without network access.
pub struct MockProvider {
    name: String,
    behavior: Behavior,
}

impl MockProvider {
    pub fn with_patch(name: &str, patch: FindingsPatch) -> Self {
        Self {
            name: name.to_string(),
            behavior: Behavior::Patch(patch),
        }
    }

    /// Returns `Ok(None)`, the "cannot help" signal.
    pub fn declining(name: &str) -> Self {
        Self {
            name: name.to_string(),
            behavior: Behavior::Decline,
        }
    }

    pub fn failing(name: &str) -> Self {
        Self {
            name: name.to_string(),
            behavior: Behavior::Fail,
        }
    }
}

#[async_trait]
impl RefinementProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn refine(&self, _findings: &Findings) -> Result<Option<FindingsPatch>, RefinementError> {
        match &self.behavior {
            Behavior::Patch(patch) => Ok(Some(patch.clone())),
            Behavior::Decline => Ok(None),
            Behavior::Fail => Err(RefinementError::EmptyResponse),
        }
    }
}
