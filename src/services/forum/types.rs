use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Privilege that gates reading (and bookmarking) posts of a category.
pub const TOPICS_READ: &str = "topics:read";

/// Post edit request handed to the domain layer.
///
/// Optional fields are only present when the client sent a non-empty value;
/// the serialized form omits the rest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditPostPayload {
    pub uid: i64,
    pub pid: String,
    pub content: String,
    pub options: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_thumb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl EditPostPayload {
    pub fn builder(
        uid: i64,
        pid: impl Into<String>,
        content: impl Into<String>,
    ) -> EditPostPayloadBuilder {
        EditPostPayloadBuilder {
            payload: EditPostPayload {
                uid,
                pid: pid.into(),
                content: content.into(),
                options: Map::new(),
                handle: None,
                title: None,
                topic_thumb: None,
                tags: None,
            },
        }
    }
}

pub struct EditPostPayloadBuilder {
    payload: EditPostPayload,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl EditPostPayloadBuilder {
    pub fn handle(mut self, handle: Option<String>) -> Self {
        self.payload.handle = non_empty(handle);
        self
    }

    pub fn title(mut self, title: Option<String>) -> Self {
        self.payload.title = non_empty(title);
        self
    }

    pub fn topic_thumb(mut self, topic_thumb: Option<String>) -> Self {
        self.payload.topic_thumb = non_empty(topic_thumb);
        self
    }

    // An empty list is still a value: it clears the topic's tags.
    pub fn tags(mut self, tags: Option<Vec<String>>) -> Self {
        self.payload.tags = tags;
        self
    }

    pub fn build(self) -> EditPostPayload {
        self.payload
    }
}

/// Which vote operation a `delta` asks for. Only the sign matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
    Clear,
}

impl VoteDirection {
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Self::Up
        } else if delta < 0.0 {
            Self::Down
        } else {
            Self::Clear
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotedPost {
    pub pid: String,
    pub uid: i64,
    pub upvotes: i64,
    pub downvotes: i64,
    pub votes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterReputation {
    pub reputation: i64,
}

/// What the domain layer reports after a vote change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteResult {
    pub post: VotedPost,
    /// Reputation of the post's author after the change.
    pub user: VoterReputation,
    pub fromuid: i64,
    pub upvote: bool,
    pub downvote: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    pub pid: Option<String>,
    pub tid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicFields {
    pub cid: Option<String>,
}
