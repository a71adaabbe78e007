//! In-memory forum fake and router helpers for handler/middleware tests.
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    extract::Request,
    http::{Method, StatusCode, header},
    middleware::{self, Next},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use crate::api;
use crate::api::v2::extractors::AuthCtx;
use crate::services::forum::{
    EditPostPayload, ForumError, ForumResult, PostFields, PostService, PrivilegeService,
    TopicFields, TopicService, VoteResult, VotedPost, VoterReputation,
};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Exists(String),
    GetPostFields(String),
    GetTopicFields(String),
    Can {
        privilege: String,
        cid: String,
        uid: i64,
    },
    Edit(EditPostPayload),
    Purge {
        pid: String,
        uid: i64,
    },
    Restore {
        pid: String,
        uid: i64,
    },
    Delete {
        pid: String,
        uid: i64,
    },
    Upvote {
        pid: String,
        uid: i64,
    },
    Downvote {
        pid: String,
        uid: i64,
    },
    Unvote {
        pid: String,
        uid: i64,
    },
    Bookmark {
        pid: String,
        uid: i64,
    },
    Unbookmark {
        pid: String,
        uid: i64,
    },
}

impl Call {
    pub fn vote_kind(&self) -> Option<&'static str> {
        match self {
            Call::Upvote { .. } => Some("upvote"),
            Call::Downvote { .. } => Some("downvote"),
            Call::Unvote { .. } => Some("unvote"),
            _ => None,
        }
    }

    pub fn pid_uid(&self) -> Option<(&str, i64)> {
        match self {
            Call::Purge { pid, uid }
            | Call::Restore { pid, uid }
            | Call::Delete { pid, uid }
            | Call::Upvote { pid, uid }
            | Call::Downvote { pid, uid }
            | Call::Unvote { pid, uid }
            | Call::Bookmark { pid, uid }
            | Call::Unbookmark { pid, uid } => Some((pid.as_str(), *uid)),
            _ => None,
        }
    }
}

/// Records every forum call; answers lookups from the maps it was built with.
#[derive(Default)]
pub struct RecordingForum {
    posts: HashMap<String, PostFields>,
    topics: HashMap<String, TopicFields>,
    readable: HashSet<(String, i64)>,
    denied_editors: HashSet<i64>,
    fail_bookmarks: bool,
    calls: Mutex<Vec<Call>>,
}

impl RecordingForum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_post(mut self, pid: &str, tid: &str) -> Self {
        self.posts.insert(
            pid.to_string(),
            PostFields {
                pid: Some(pid.to_string()),
                tid: Some(tid.to_string()),
            },
        );
        self
    }

    pub fn with_fields_without_pid(mut self, pid: &str) -> Self {
        self.posts.insert(
            pid.to_string(),
            PostFields {
                pid: None,
                tid: None,
            },
        );
        self
    }

    pub fn with_topic(mut self, tid: &str, cid: &str) -> Self {
        self.topics.insert(
            tid.to_string(),
            TopicFields {
                cid: Some(cid.to_string()),
            },
        );
        self
    }

    pub fn readable(mut self, cid: &str, uid: i64) -> Self {
        self.readable.insert((cid.to_string(), uid));
        self
    }

    pub fn denying_edits_for(mut self, uid: i64) -> Self {
        self.denied_editors.insert(uid);
        self
    }

    pub fn failing_bookmarks(mut self) -> Self {
        self.fail_bookmarks = true;
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn vote_result(pid: &str, uid: i64, upvote: bool, downvote: bool) -> VoteResult {
        VoteResult {
            post: VotedPost {
                pid: pid.to_string(),
                uid: 1,
                upvotes: i64::from(upvote),
                downvotes: i64::from(downvote),
                votes: i64::from(upvote) - i64::from(downvote),
            },
            user: VoterReputation {
                reputation: i64::from(upvote) - i64::from(downvote),
            },
            fromuid: uid,
            upvote,
            downvote,
        }
    }
}

#[async_trait]
impl PostService for RecordingForum {
    async fn exists(&self, pid: &str) -> ForumResult<bool> {
        self.record(Call::Exists(pid.to_string()));
        Ok(self.posts.contains_key(pid))
    }

    async fn get_post_fields(&self, pid: &str) -> ForumResult<Option<PostFields>> {
        self.record(Call::GetPostFields(pid.to_string()));
        Ok(self.posts.get(pid).cloned())
    }

    async fn edit(&self, payload: EditPostPayload) -> ForumResult<()> {
        let denied = self.denied_editors.contains(&payload.uid);
        self.record(Call::Edit(payload));
        if denied {
            return Err(ForumError::NoPrivileges);
        }
        Ok(())
    }

    async fn purge(&self, pid: &str, uid: i64) -> ForumResult<()> {
        self.record(Call::Purge {
            pid: pid.to_string(),
            uid,
        });
        Ok(())
    }

    async fn restore(&self, pid: &str, uid: i64) -> ForumResult<()> {
        self.record(Call::Restore {
            pid: pid.to_string(),
            uid,
        });
        Ok(())
    }

    async fn delete(&self, pid: &str, uid: i64) -> ForumResult<()> {
        self.record(Call::Delete {
            pid: pid.to_string(),
            uid,
        });
        Ok(())
    }

    async fn upvote(&self, pid: &str, uid: i64) -> ForumResult<VoteResult> {
        self.record(Call::Upvote {
            pid: pid.to_string(),
            uid,
        });
        Ok(Self::vote_result(pid, uid, true, false))
    }

    async fn downvote(&self, pid: &str, uid: i64) -> ForumResult<VoteResult> {
        self.record(Call::Downvote {
            pid: pid.to_string(),
            uid,
        });
        Ok(Self::vote_result(pid, uid, false, true))
    }

    async fn unvote(&self, pid: &str, uid: i64) -> ForumResult<VoteResult> {
        self.record(Call::Unvote {
            pid: pid.to_string(),
            uid,
        });
        Ok(Self::vote_result(pid, uid, false, false))
    }

    async fn bookmark(&self, pid: &str, uid: i64) -> ForumResult<()> {
        self.record(Call::Bookmark {
            pid: pid.to_string(),
            uid,
        });
        if self.fail_bookmarks {
            return Err(ForumError::Backend(anyhow::anyhow!("bookmark store offline")));
        }
        Ok(())
    }

    async fn unbookmark(&self, pid: &str, uid: i64) -> ForumResult<()> {
        self.record(Call::Unbookmark {
            pid: pid.to_string(),
            uid,
        });
        Ok(())
    }
}

#[async_trait]
impl TopicService for RecordingForum {
    async fn get_topic_fields(&self, tid: &str) -> ForumResult<Option<TopicFields>> {
        self.record(Call::GetTopicFields(tid.to_string()));
        Ok(self.topics.get(tid).cloned())
    }
}

#[async_trait]
impl PrivilegeService for RecordingForum {
    async fn can(&self, privilege: &str, cid: &str, uid: i64) -> ForumResult<bool> {
        self.record(Call::Can {
            privilege: privilege.to_string(),
            cid: cid.to_string(),
            uid,
        });
        Ok(self.readable.contains(&(cid.to_string(), uid)))
    }
}

pub fn test_state(forum: Arc<RecordingForum>) -> AppState {
    let auth = crate::services::auth::access_jwt::tests::service();
    AppState::new(forum.clone(), forum.clone(), forum, Arc::new(auth))
}

/// Router without the token middleware: `ctx` is attached as-is (or not at all).
pub fn test_app(forum: Arc<RecordingForum>, ctx: Option<AuthCtx>) -> Router {
    let state = test_state(forum);

    api::v2::routes(state.clone())
        .layer(middleware::from_fn(move |mut req: Request, next: Next| {
            let ctx = ctx.clone();
            async move {
                if let Some(ctx) = ctx {
                    req.extensions_mut().insert(ctx);
                }
                next.run(req).await
            }
        }))
        .with_state(state)
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = axum::http::Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    send_request(app, req).await
}

pub async fn send_request(app: Router, req: axum::http::Request<Body>) -> (StatusCode, Value) {
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}
