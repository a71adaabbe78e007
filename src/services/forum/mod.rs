pub mod client;
pub mod types;

pub use client::{ForumError, ForumResult, PostService, PrivilegeService, TopicService};
pub use types::{
    EditPostPayload, PostFields, TOPICS_READ, TopicFields, VoteDirection, VoteResult,
    VotedPost, VoterReputation,
};
