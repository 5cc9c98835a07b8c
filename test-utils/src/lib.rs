//! Guild Snapshot Test Utils
//!
//! Shared testing utilities for the guild snapshot extractor. Provides factories
//! for Serenity API objects so the serenity-backed guild handle can be tested
//! without a gateway connection.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::{create_test_guild, create_test_role};
//!
//! let mut guild = create_test_guild(123456789, "Test Guild");
//! guild.roles.insert(RoleId::new(1), create_test_role(1, "Admin", 0xFF0000, 10));
//! ```

pub mod serenity;
