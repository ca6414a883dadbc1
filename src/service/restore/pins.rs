use crate::model::{live::EmbedMessage, restore::RestoreReport, snapshot::GuildSnapshot};

use super::{resolve::ChannelIndex, RestoreService};

/// Posted once every step has run.
pub const COMPLETION_NOTICE: &str = "Snapshot restore complete.";

impl<'a> RestoreService<'a> {
    /// Step 11: reposts every pinned message as an embed and pins the repost.
    ///
    /// Messages are reposted in snapshot order, which is oldest first, so the pin list
    /// ends up in its original order.
    pub(super) async fn restore_pins(
        &self,
        snapshot: &GuildSnapshot,
        channels: &ChannelIndex,
        report: &mut RestoreReport,
    ) {
        for pin in &snapshot.pinned_messages {
            let title = pin.repost_title();

            let Some(channel) = channels.text_channel(&pin.channel_name) else {
                report.pins_restored.failure(
                    &title,
                    format!("Channel {} was not restored", pin.channel_name),
                );
                continue;
            };

            let message = EmbedMessage {
                title: title.clone(),
                description: (!pin.content.is_empty()).then(|| pin.content.clone()),
                files: pin
                    .attachments
                    .iter()
                    .map(|attachment| (attachment.filename.clone(), attachment.data.clone()))
                    .collect(),
            };

            let sent = self.target.send_embed(channel, &message).await;
            self.pause().await;

            let message_id = match sent {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!("Failed to repost pin in {}: {}", pin.channel_name, e);
                    report.pins_restored.failure(&title, e);
                    continue;
                }
            };

            match self.target.pin_message(channel, message_id).await {
                Ok(()) => report.pins_restored.success(&title),
                Err(e) => {
                    tracing::warn!("Failed to pin repost in {}: {}", pin.channel_name, e);
                    report.pins_restored.failure(&title, e);
                }
            }
            self.pause().await;
        }
    }

    /// Step 12: posts a completion notice in the lowest recreated text channel.
    pub(super) async fn signal_completion(
        &self,
        snapshot: &GuildSnapshot,
        channels: &ChannelIndex,
        report: &mut RestoreReport,
    ) {
        let mut text_channels: Vec<_> = snapshot.text_channels.iter().collect();
        text_channels.sort_by_key(|channel| channel.position);

        let Some(channel) = text_channels
            .iter()
            .find_map(|channel| channels.text_channel(&channel.name))
        else {
            tracing::warn!(
                "No text channel was restored in guild {}, skipping completion notice",
                self.target.guild_id()
            );
            return;
        };

        match self.target.send_text(channel, COMPLETION_NOTICE).await {
            Ok(_) => report.completion_channel = Some(channel),
            Err(e) => tracing::warn!("Failed to post completion notice: {}", e),
        }
    }
}
