//! SeaORM entity models for the guild registry.

pub mod prelude;

pub mod discord_guild;
