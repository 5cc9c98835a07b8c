//! Test factories for creating Serenity API objects.
//!
//! These factories create valid Serenity objects by deserializing JSON, simulating
//! what Discord's API would return, with sensible defaults for every field that is
//! not a parameter.
//!
//! # Available Factories
//!
//! - `guild::create_test_guild` - Create Serenity Guild objects
//! - `role::create_test_role` - Create Serenity Role objects
//! - `channel::create_test_channel` - Create Serenity GuildChannel objects
//! - `channel::create_test_archived_thread` - Create archived thread channels
//! - `emoji::create_test_emoji` - Create Serenity Emoji objects
//! - `message::create_test_message` - Create Serenity Message objects
//! - `user::{create_test_user, create_test_member, create_test_ban}` - Users and what wraps them

pub mod channel;
pub mod emoji;
pub mod guild;
pub mod message;
pub mod role;
pub mod user;

// Re-export commonly used functions for convenience
pub use channel::{create_test_archived_thread, create_test_channel};
pub use emoji::create_test_emoji;
pub use guild::create_test_guild;
pub use message::create_test_message;
pub use role::create_test_role;
pub use user::{create_test_ban, create_test_member, create_test_user};
