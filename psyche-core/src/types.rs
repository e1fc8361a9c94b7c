use serde::{Deserialize, Serialize};

/// Upper bound on comments fetched per analysis unless configured otherwise.
pub const DEFAULT_MAX_COMMENTS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub subreddit: String,
    pub body: String,
}

impl Comment {
    pub fn new(subreddit: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subreddit: subreddit.into(),
            body: body.into(),
        }
    }
}

/// Comments of one user in retrieval order.
///
/// The batch never holds more than the limit it was built with; anything
/// past the limit is dropped from the tail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentBatch {
    comments: Vec<Comment>,
}

impl CommentBatch {
    pub fn new(mut comments: Vec<Comment>, max_comments: usize) -> Self {
        comments.truncate(max_comments);
        Self { comments }
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Comment> {
        self.comments.iter()
    }
}

impl<'a> IntoIterator for &'a CommentBatch {
    type Item = &'a Comment;
    type IntoIter = std::slice::Iter<'a, Comment>;

    fn into_iter(self) -> Self::IntoIter {
        self.comments.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub interests: Vec<String>,
    pub summary: String,
}
