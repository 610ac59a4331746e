use async_trait::async_trait;
use switchboard_core::{RoomId, UserId};

/// Accept/reject decision consulted before a join reaches the relay.
/// Policy lives outside this crate; the relay only needs the verdict.
#[async_trait]
pub trait JoinAuthorizer: Send + Sync {
    async fn authorize(&self, room: &RoomId, user: &UserId) -> bool;
}

/// Admits every join. Used when no policy is injected.
pub struct AllowAll;

#[async_trait]
impl JoinAuthorizer for AllowAll {
    async fn authorize(&self, _room: &RoomId, _user: &UserId) -> bool {
        true
    }
}
