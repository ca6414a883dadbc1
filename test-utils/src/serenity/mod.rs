//! Test factories for Serenity API objects.
//!
//! These build valid Serenity structs by deserializing JSON shaped like Discord's API
//! responses, so conversion code can be tested against the same payloads it sees in
//! production.
//!
//! ```rust,ignore
//! use test_utils::serenity::{create_test_guild, create_test_role, create_test_channel};
//!
//! let guild = create_test_guild(123456789, "Test Guild");
//! let admin = create_test_role(111111111, "Admin", 0xFF0000, 10);
//! let general = create_test_channel(222222222, 123456789, "general", 0, 1, None);
//! ```
//!
//! - `guild::create_test_guild` - Serenity `Guild`
//! - `role::*` - Serenity `Role`, including default, premium and bot roles
//! - `channel::*` - Serenity `GuildChannel` with permission overwrites
//! - `message::create_test_pin` - Pinned Serenity `Message` with attachments

pub mod channel;
pub mod guild;
pub mod message;
pub mod role;

pub use channel::{create_test_channel, create_test_channel_with_overwrites, TestOverwrite};
pub use guild::create_test_guild;
pub use message::{create_test_pin, TestAttachment};
pub use role::{
    create_test_bot_role, create_test_default_role, create_test_premium_role, create_test_role,
};
