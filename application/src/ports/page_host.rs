//! Page host port: how the coordinator reaches into the current page.

use async_trait::async_trait;
use sidelens_domain::AssistError;

/// Read access to the page the agent is attached to.
///
/// The coordinator pulls visible page text through this port when handling
/// `summarize` and `get-page-content`. Failures surface as
/// [`AssistError::PageUnavailable`].
#[async_trait]
pub trait PageHost: Send + Sync {
    /// The page's visible text content.
    async fn page_content(&self) -> Result<String, AssistError>;
}
