//! Extraction services.
//!
//! One service per snapshot section, each holding a borrowed guild handle and
//! mapping source values into snapshot records. `SnapshotService` composes them
//! into a full `GuildSnapshot`.
//!
//! None of the services retry or swallow errors; every failure propagates to the
//! caller, who owns retry and backoff policy.

pub mod ban;
pub mod channel;
pub mod emoji;
pub mod member;
pub mod role;
pub mod snapshot;

pub use ban::BanService;
pub use channel::ChannelService;
pub use emoji::EmojiService;
pub use member::MemberService;
pub use role::RoleService;
pub use snapshot::SnapshotService;
