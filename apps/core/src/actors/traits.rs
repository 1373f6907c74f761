use crate::actors::messages::AnalysisError;
use crate::models::{AnalysisRequest, AnalysisResult};
use async_trait::async_trait;

/// Defines the public interface for the remote analysis service.
///
/// This trait abstracts the transport, allowing the HTTP client to be swapped for a
/// mock in tests.
#[async_trait]
pub trait AnalysisService: Send + Sync + 'static {
    /// Submits text for analysis and returns the parsed result.
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalysisError>;
}
