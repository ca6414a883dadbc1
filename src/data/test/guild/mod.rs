use crate::data::guild::DiscordGuildRepository;
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory, serenity::create_test_guild};

mod delete;
mod delete_absent;
mod find_by_guild_id;
mod needs_snapshot;
mod record_snapshot;
