/*
 * Responsibility
 * - the identity type handlers see
 * - the access middleware builds it and stores it in request extensions;
 *   handlers only ever receive this type
 *
 * Notes
 * - token verification lives in middleware/services
 * - privilege checks (topics:read etc.) belong to the forum privilege service
 */

/// User attached by a verified access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub uid: i64,
}

/// Identity of the current request.
///
/// - `user` is set only when a valid access token was presented
/// - `fallback_uid` is the request-level uid (0 for guests); used when `user` carries no uid
/// - `roles` / `jti` come from the token (audit / correlation)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub user: Option<AuthUser>,
    pub fallback_uid: Option<i64>,
    pub roles: Vec<String>,
    pub jti: Option<String>,
}

impl AuthCtx {
    pub fn guest() -> Self {
        Self {
            user: None,
            fallback_uid: Some(0),
            roles: Vec::new(),
            jti: None,
        }
    }

    pub fn for_user(uid: i64) -> Self {
        Self {
            user: Some(AuthUser { uid }),
            fallback_uid: Some(uid),
            roles: Vec::new(),
            jti: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// uid of the attached user (requireUser has already run on every post route).
    pub fn user_uid(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.uid)
    }

    /// The attached user's uid, else the fallback uid; `None` unless positive.
    pub fn effective_uid(&self) -> Option<i64> {
        self.user_uid()
            .filter(|uid| *uid != 0)
            .or(self.fallback_uid)
            .filter(|uid| *uid > 0)
    }
}
