//! Serializable snapshot records.
//!
//! Plain data handed to the persistence and restoration side. All records are
//! built fresh per extraction and never refer back to client library objects.

pub mod ban;
pub mod channel;
pub mod emoji;
pub mod member;
pub mod message;
pub mod role;
pub mod snapshot;

pub use ban::BanEntry;
pub use channel::{
    CategoryEntry, ChannelEntry, ChannelTree, OverwriteSubject, PermissionOverwriteEntry,
    TextChannelEntry, ThreadEntry, ThreadKind, VoiceChannelEntry,
};
pub use emoji::{EmojiEntry, EmojiImage};
pub use member::MemberEntry;
pub use message::{AttachmentEntry, MessageEntry};
pub use role::RoleEntry;
pub use snapshot::GuildSnapshot;
