//! Postgres implementation of the forum contracts.
//!
//! Only the rules the storage itself needs live here: a post's author is the
//! one who may edit, delete, restore or purge it, and nobody votes on their own
//! post. Category read access comes from `category_privileges`.
use async_trait::async_trait;
use sqlx::PgPool;

use crate::repos::{
    bookmark_repo,
    error::{RepoError, parse_id},
    post_repo::{self, PostRow},
    privilege_repo,
    topic_repo::{self, TopicRow},
    vote_repo,
};
use crate::services::forum::{
    EditPostPayload, ForumError, ForumResult, PostFields, PostService, PrivilegeService,
    TopicFields, TopicService, VoteDirection, VoteResult, VotedPost, VoterReputation,
};

fn ensure_owner(post: &PostRow, uid: i64) -> ForumResult<()> {
    if post.uid != uid {
        return Err(ForumError::NoPrivileges);
    }
    Ok(())
}

fn ensure_can_vote(author: i64, uid: i64, direction: VoteDirection) -> ForumResult<()> {
    // Taking back a vote is always allowed.
    if author == uid && direction != VoteDirection::Clear {
        return Err(ForumError::Invalid("you cannot vote for your own post".into()));
    }
    Ok(())
}

// Title, thumbnail and tags belong to the topic; only its main post carries them.
fn carries_topic_meta(topic: Option<&TopicRow>, post: &PostRow) -> bool {
    topic.and_then(|t| t.main_pid) == Some(post.pid)
}

#[derive(Clone, Debug)]
pub struct PgForum {
    pool: PgPool,
}

impl PgForum {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn owned_post(&self, pid: &str, uid: i64) -> ForumResult<PostRow> {
        let pid = parse_id(pid, "post")?;
        let post = post_repo::get(&self.pool, pid)
            .await?
            .ok_or(ForumError::NotFound("post"))?;

        ensure_owner(&post, uid)?;
        Ok(post)
    }

    async fn vote(&self, pid: &str, uid: i64, direction: VoteDirection) -> ForumResult<VoteResult> {
        let pid_num = parse_id(pid, "post")?;
        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;

        let author = vote_repo::lock_post_author(&mut tx, pid_num)
            .await?
            .ok_or(ForumError::NotFound("post"))?;
        ensure_can_vote(author, uid, direction)?;

        match direction {
            VoteDirection::Up => vote_repo::set_vote(&mut tx, pid_num, uid, 1).await?,
            VoteDirection::Down => vote_repo::set_vote(&mut tx, pid_num, uid, -1).await?,
            VoteDirection::Clear => vote_repo::clear_vote(&mut tx, pid_num, uid).await?,
        }

        let counts = vote_repo::recount(&mut tx, pid_num).await?;
        let reputation = vote_repo::author_reputation(&mut tx, author).await?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::debug!(pid = pid_num, uid, ?direction, "vote recorded");

        Ok(VoteResult {
            post: VotedPost {
                pid: counts.pid.to_string(),
                uid: counts.uid,
                upvotes: counts.upvotes,
                downvotes: counts.downvotes,
                votes: counts.upvotes - counts.downvotes,
            },
            user: VoterReputation { reputation },
            fromuid: uid,
            upvote: direction == VoteDirection::Up,
            downvote: direction == VoteDirection::Down,
        })
    }
}

#[async_trait]
impl PostService for PgForum {
    async fn exists(&self, pid: &str) -> ForumResult<bool> {
        match parse_id(pid, "post") {
            Ok(pid) => Ok(post_repo::exists(&self.pool, pid).await?),
            Err(_) => Ok(false),
        }
    }

    async fn get_post_fields(&self, pid: &str) -> ForumResult<Option<PostFields>> {
        let Ok(pid) = parse_id(pid, "post") else {
            return Ok(None);
        };
        let post = post_repo::get(&self.pool, pid).await?;

        Ok(post.map(|p| PostFields {
            pid: Some(p.pid.to_string()),
            tid: Some(p.tid.to_string()),
        }))
    }

    async fn edit(&self, payload: EditPostPayload) -> ForumResult<()> {
        let post = self.owned_post(&payload.pid, payload.uid).await?;
        if post.deleted {
            return Err(ForumError::Invalid("post is deleted".into()));
        }
        let topic = topic_repo::get(&self.pool, post.tid).await?;
        let is_main_post = carries_topic_meta(topic.as_ref(), &post);

        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;
        post_repo::update_content(
            &mut tx,
            post.pid,
            payload.uid,
            &payload.content,
            payload.handle.as_deref(),
        )
        .await?;

        if is_main_post {
            topic_repo::update_meta(
                &mut tx,
                post.tid,
                payload.title.as_deref(),
                payload.topic_thumb.as_deref(),
            )
            .await?;
            if let Some(tags) = &payload.tags {
                topic_repo::replace_tags(&mut tx, post.tid, tags).await?;
            }
        }
        tx.commit().await.map_err(RepoError::from)?;

        Ok(())
    }

    async fn purge(&self, pid: &str, uid: i64) -> ForumResult<()> {
        let post = self.owned_post(pid, uid).await?;
        if !post_repo::purge(&self.pool, post.pid).await? {
            return Err(ForumError::NotFound("post"));
        }
        tracing::info!(pid = post.pid, uid, "post purged");
        Ok(())
    }

    async fn restore(&self, pid: &str, uid: i64) -> ForumResult<()> {
        let post = self.owned_post(pid, uid).await?;
        if !post.deleted {
            return Err(ForumError::Invalid("post is already restored".into()));
        }
        post_repo::set_deleted(&self.pool, post.pid, uid, false).await?;
        Ok(())
    }

    async fn delete(&self, pid: &str, uid: i64) -> ForumResult<()> {
        let post = self.owned_post(pid, uid).await?;
        if post.deleted {
            return Err(ForumError::Invalid("post is already deleted".into()));
        }
        post_repo::set_deleted(&self.pool, post.pid, uid, true).await?;
        Ok(())
    }

    async fn upvote(&self, pid: &str, uid: i64) -> ForumResult<VoteResult> {
        self.vote(pid, uid, VoteDirection::Up).await
    }

    async fn downvote(&self, pid: &str, uid: i64) -> ForumResult<VoteResult> {
        self.vote(pid, uid, VoteDirection::Down).await
    }

    async fn unvote(&self, pid: &str, uid: i64) -> ForumResult<VoteResult> {
        self.vote(pid, uid, VoteDirection::Clear).await
    }

    async fn bookmark(&self, pid: &str, uid: i64) -> ForumResult<()> {
        let pid = parse_id(pid, "post")?;
        bookmark_repo::add(&self.pool, pid, uid).await?;
        Ok(())
    }

    async fn unbookmark(&self, pid: &str, uid: i64) -> ForumResult<()> {
        let pid = parse_id(pid, "post")?;
        bookmark_repo::remove(&self.pool, pid, uid).await?;
        Ok(())
    }
}

#[async_trait]
impl TopicService for PgForum {
    async fn get_topic_fields(&self, tid: &str) -> ForumResult<Option<TopicFields>> {
        let Ok(tid) = parse_id(tid, "topic") else {
            return Ok(None);
        };
        let topic = topic_repo::get(&self.pool, tid).await?;

        Ok(topic.map(|t| TopicFields {
            cid: Some(t.cid.to_string()),
        }))
    }
}

#[async_trait]
impl PrivilegeService for PgForum {
    async fn can(&self, privilege: &str, cid: &str, uid: i64) -> ForumResult<bool> {
        let Ok(cid) = parse_id(cid, "category") else {
            return Ok(false);
        };
        Ok(privilege_repo::has(&self.pool, cid, privilege, uid).await?)
    }
}
