//! Test factory for pinned Serenity Message objects.

use serde_json::json;
use serenity::all::Message;

/// An attachment on a test message.
#[derive(Debug, Clone)]
pub struct TestAttachment {
    pub id: u64,
    pub filename: String,
    pub size: u32,
}

/// Creates a pinned message posted by a user.
///
/// # Arguments
/// - `message_id` - Discord message ID (snowflake)
/// - `channel_id` - Channel the message was posted in
/// - `author` - Author username
/// - `author_is_bot` - Whether the author is a bot account
/// - `content` - Message text
/// - `attachments` - Files attached to the message
///
/// # Panics
/// - If the JSON cannot be deserialized into a Message (indicates invalid test data)
pub fn create_test_pin(
    message_id: u64,
    channel_id: u64,
    author: &str,
    author_is_bot: bool,
    content: &str,
    attachments: &[TestAttachment],
) -> Message {
    let attachments: Vec<_> = attachments
        .iter()
        .map(|a| {
            let url = format!(
                "https://cdn.discordapp.com/attachments/{}/{}/{}",
                channel_id, a.id, a.filename
            );
            json!({
                "id": a.id.to_string(),
                "filename": a.filename,
                "size": a.size,
                "url": url,
                "proxy_url": url,
            })
        })
        .collect();

    serde_json::from_value(json!({
        "id": message_id.to_string(),
        "channel_id": channel_id.to_string(),
        "author": {
            "id": "200000000000000000",
            "username": author,
            "discriminator": "0",
            "global_name": null,
            "avatar": null,
            "bot": author_is_bot,
        },
        "content": content,
        "timestamp": "2024-03-15T12:30:00.000000+00:00",
        "edited_timestamp": null,
        "tts": false,
        "mention_everyone": false,
        "mentions": [],
        "mention_roles": [],
        "attachments": attachments,
        "embeds": [],
        "pinned": true,
        "type": 0,
    }))
    .expect("Failed to create test message - invalid JSON structure")
}
