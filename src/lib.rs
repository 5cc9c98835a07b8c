//! Guild snapshot extraction.
//!
//! Captures a Discord guild's bans, members, roles, emojis and channel tree into
//! plain serializable records for later restoration. The platform client (serenity)
//! owns fetching, caching and rate limiting; this crate only maps what it provides.
//!
//! # Layout
//!
//! - **Source** (`source/`) - `GuildSource` capability trait and the serenity-backed
//!   implementation converting client objects into immutable values
//! - **Service** (`service/`) - One extractor per snapshot section plus the
//!   composing `SnapshotService`
//! - **Model** (`model/`) - Serializable snapshot records
//! - **Error** (`error/`) - Extraction error taxonomy
//! - **Configuration** (`config`) - Extraction options and environment loading
//! - **Bot** (`bot/`) - Gateway client that waits for the guild and runs a snapshot
//!
//! # Usage
//!
//! ```rust,ignore
//! use guild_snapshot::{config::SnapshotOptions, service::SnapshotService};
//!
//! let options = SnapshotOptions::default();
//! let snapshot = SnapshotService::new(&source, &options).create().await?;
//! ```

pub mod bot;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod service;
pub mod source;
pub mod util;
