use crate::CommentSource;
use psyche_core::{Comment, CommentBatch, ConfigError, CoreError, RedditApiError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListing<T> {
    #[serde(default)]
    pub kind: String,
    pub data: RedditListingData<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingData<T> {
    pub children: Vec<RedditListingChild<T>>,
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub before: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingChild<T> {
    #[serde(default)]
    pub kind: String,
    pub data: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditCommentData {
    pub subreddit: String,
    pub body: String,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub score: i64,
}

impl From<RedditCommentData> for Comment {
    fn from(data: RedditCommentData) -> Self {
        Comment::new(data.subreddit, data.body)
    }
}

impl RedditListing<RedditCommentData> {
    pub fn into_batch(self, max_comments: usize) -> CommentBatch {
        let comments = self
            .data
            .children
            .into_iter()
            .map(|child| child.data.into())
            .collect();
        CommentBatch::new(comments, max_comments)
    }
}

/// Reads public comment listings from `<base>/user/<name>/comments.json`.
///
/// No OAuth: the public JSON endpoints only require an identifying
/// `User-Agent`.
#[derive(Debug, Clone)]
pub struct RedditCommentClient {
    http_client: Client,
    base_url: Url,
    user_agent: String,
}

impl RedditCommentClient {
    pub fn new(base_url: &str, user_agent: String, timeout: Duration) -> Result<Self, CoreError> {
        let base_url = Url::parse(base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "reddit_base_url".to_string(),
                value: base_url.to_string(),
            })?;

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                field: "user_agent".to_string(),
                value: format!("{user_agent} ({e})"),
            })?;

        Ok(Self {
            http_client,
            base_url,
            user_agent,
        })
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn user_comments_url(&self, username: &str, limit: usize) -> Result<Url, RedditApiError> {
        if username.trim().is_empty() {
            return Err(RedditApiError::InvalidUsername {
                username: username.to_string(),
            });
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RedditApiError::InvalidUsername {
                username: username.to_string(),
            })?
            .pop_if_empty()
            .extend(&["user", username, "comments.json"]);
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }

    pub async fn fetch_user_comments(
        &self,
        username: &str,
        limit: usize,
    ) -> Result<RedditListing<RedditCommentData>, RedditApiError> {
        let url = self.user_comments_url(username, limit)?;
        let endpoint = url.path().to_string();

        info!("Fetching up to {} comments for u/{}", limit, username);
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| {
                error!("Network error for GET {}: {}", endpoint, e);
                if e.is_timeout() {
                    RedditApiError::RequestTimeout
                } else {
                    RedditApiError::Transport {
                        endpoint: endpoint.clone(),
                        reason: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Request failed with status: {} for {}", status, endpoint);
            return Err(RedditApiError::UnexpectedStatus {
                endpoint,
                status_code: status.as_u16(),
            });
        }
        debug!("Request successful: {} {}", status, endpoint);

        let listing: RedditListing<RedditCommentData> = response.json().await.map_err(|e| {
            error!("Failed to parse comment listing: {}", e);
            RedditApiError::InvalidResponse {
                details: format!("Failed to parse comments for u/{}", username),
            }
        })?;

        info!(
            "Retrieved {} comments for u/{}",
            listing.data.children.len(),
            username
        );
        Ok(listing)
    }
}

impl CommentSource for RedditCommentClient {
    async fn user_comments(
        &self,
        username: &str,
        limit: usize,
    ) -> Result<CommentBatch, RedditApiError> {
        let listing = self.fetch_user_comments(username, limit).await?;
        Ok(listing.into_batch(limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RedditCommentClient {
        RedditCommentClient::new(
            "https://www.reddit.com",
            "test-user-agent/1.0".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = client();
        assert_eq!(client.user_agent(), "test-user-agent/1.0");
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        let result = RedditCommentClient::new(
            "mailto:nobody@example.com",
            "ua".to_string(),
            Duration::from_secs(5),
        );
        assert!(matches!(
            result,
            Err(CoreError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn test_user_comments_url() {
        let url = client().user_comments_url("spez", 200).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.reddit.com/user/spez/comments.json?limit=200"
        );
    }

    #[test]
    fn test_user_comments_url_encodes_username() {
        let url = client().user_comments_url("../admin", 10).unwrap();
        assert_eq!(url.path(), "/user/..%2Fadmin/comments.json");
    }

    #[test]
    fn test_empty_username_is_rejected() {
        let result = client().user_comments_url("  ", 10);
        assert!(matches!(
            result,
            Err(RedditApiError::InvalidUsername { .. })
        ));
    }

    #[test]
    fn test_listing_conversion() {
        let raw = r#"{
            "kind": "Listing",
            "data": {
                "after": null,
                "children": [
                    {"kind": "t1", "data": {"subreddit": "rust", "body": "borrowck is fine", "permalink": "/r/rust/1", "score": 12}},
                    {"kind": "t1", "data": {"subreddit": "cooking", "body": "low and slow"}}
                ]
            }
        }"#;

        let listing: RedditListing<RedditCommentData> = serde_json::from_str(raw).unwrap();
        assert_eq!(listing.data.children[0].data.score, 12);

        let batch = listing.into_batch(200);
        assert_eq!(
            batch.comments(),
            &[
                Comment::new("rust", "borrowck is fine"),
                Comment::new("cooking", "low and slow"),
            ]
        );
    }
}
