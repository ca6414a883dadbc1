//! Restore previews and reports.

use serenity::all::{ChannelId, RoleId};

/// What a confirmed restore will destroy, shown before the operator confirms.
#[derive(Debug, Clone, PartialEq)]
pub struct RestorePreview {
    /// Roles that will be deleted (everything except `@everyone` and managed roles).
    pub roles_to_delete: Vec<String>,
    /// Channels and categories that will be deleted.
    pub channels_to_delete: Vec<String>,
    /// Names of captured bot roles whose bot is not in the guild.
    pub missing_bots: Vec<String>,
    /// The bot's own integration role, kept above every restored role.
    pub acting_role: Option<RoleId>,
}

/// One item that could not be processed.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFailure {
    pub name: String,
    pub reason: String,
}

/// Result of a step that processes many items independently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<ItemFailure>,
}

impl BulkReport {
    pub fn success(&mut self, name: impl Into<String>) {
        self.succeeded.push(name.into());
    }

    pub fn failure(&mut self, name: impl Into<String>, reason: impl ToString) {
        self.failed.push(ItemFailure {
            name: name.into(),
            reason: reason.to_string(),
        });
    }
}

/// Result of a step that makes at most one call.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Applied,
    Skipped(String),
    Failed(String),
}

impl Default for StepOutcome {
    fn default() -> Self {
        Self::Skipped("not run".to_string())
    }
}

/// Itemized result of a restore run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestoreReport {
    pub roles_deleted: BulkReport,
    pub default_role: StepOutcome,
    pub premium_role: StepOutcome,
    pub bot_roles: BulkReport,
    /// Captured bot roles left untouched because their bot is absent.
    pub missing_bots: Vec<String>,
    pub roles_created: BulkReport,
    pub role_positions: StepOutcome,
    pub channels_deleted: BulkReport,
    pub categories_created: BulkReport,
    pub text_channels_created: BulkReport,
    pub voice_channels_created: BulkReport,
    pub threads_created: BulkReport,
    pub pins_restored: BulkReport,
    /// Overwrites whose role name did not resolve and were left out.
    pub dropped_overwrites: usize,
    /// Channels created without their captured category because it did not resolve.
    pub unresolved_parents: Vec<String>,
    /// Where the completion notice was posted.
    pub completion_channel: Option<ChannelId>,
}

impl RestoreReport {
    /// Total number of failed remote calls across all steps.
    pub fn failure_count(&self) -> usize {
        let singular = [&self.default_role, &self.premium_role, &self.role_positions]
            .iter()
            .filter(|outcome| matches!(outcome, StepOutcome::Failed(_)))
            .count();

        singular
            + [
                &self.roles_deleted,
                &self.bot_roles,
                &self.roles_created,
                &self.channels_deleted,
                &self.categories_created,
                &self.text_channels_created,
                &self.voice_channels_created,
                &self.threads_created,
                &self.pins_restored,
            ]
            .iter()
            .map(|report| report.failed.len())
            .sum::<usize>()
    }
}
