/*
 * Responsibility
 * - shared context attached to the Router (AppState)
 *   - forum collaborators (posts / topics / privileges) and the access-token verifier
 * - Clone is cheap (everything behind Arc)
 */
use std::sync::Arc;

use crate::services::{
    auth::AuthService,
    forum::{PostService, PrivilegeService, TopicService},
};

#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostService>,
    pub topics: Arc<dyn TopicService>,
    pub privileges: Arc<dyn PrivilegeService>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(
        posts: Arc<dyn PostService>,
        topics: Arc<dyn TopicService>,
        privileges: Arc<dyn PrivilegeService>,
        auth: Arc<AuthService>,
    ) -> Self {
        Self {
            posts,
            topics,
            privileges,
            auth,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}
