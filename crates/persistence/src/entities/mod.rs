//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod availability;
pub mod event;
pub mod friendship;
pub mod user;
pub mod user_status;

pub use availability::AvailabilityDayEntity;
pub use event::{
    CohostWithUserEntity, EventEntity, EventParticipantEntity, ParticipantRoleDb,
    ParticipantStatusDb, ParticipantWithUserEntity, ShoutWithUserEntity,
};
pub use friendship::{FriendshipEntity, FriendshipStatusDb, ReceivedRequestEntity};
pub use user::{UserEntity, UserPublicEntity, UserSummaryEntity};
pub use user_status::{StatusModeDb, UserStatusEntity};
