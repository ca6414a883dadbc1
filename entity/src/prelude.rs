pub use super::discord_guild::Entity as DiscordGuild;
