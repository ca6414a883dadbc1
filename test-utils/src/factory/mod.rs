//! Factory methods for creating registry rows.
//!
//! Each entity has a `Factory` struct for customization and a `create_*` convenience
//! function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let guild = factory::create_guild(&db).await?;
//!
//! let snapshotted = factory::discord_guild::DiscordGuildFactory::new(&db)
//!     .guild_id("987654321")
//!     .last_snapshot(Utc::now(), "2025-01-01_guild_snapshot")
//!     .build()
//!     .await?;
//! ```

pub mod discord_guild;
pub mod helpers;

pub use discord_guild::create_guild;
