pub mod api;


pub use api::{RedditCommentClient, RedditCommentData, RedditListing};

use psyche_core::{CommentBatch, RedditApiError};
use std::future::Future;

/// Anything that can list a user's public comments, newest first.
///
/// Implementations must be shareable across concurrent analyses; they hold
/// no per-request state.
pub trait CommentSource: Send + Sync {
    fn user_comments(
        &self,
        username: &str,
        limit: usize,
    ) -> impl Future<Output = Result<CommentBatch, RedditApiError>> + Send;
}
