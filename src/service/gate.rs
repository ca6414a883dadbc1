//! Confirmation gate for destructive restores.
//!
//! A restore request first runs the precondition check against the live guild. If it
//! passes, the gate computes a `RestorePreview` and parks the request under a random token
//! until the operator who made it confirms or denies it. Requests that are not confirmed
//! within the window are discarded. Pending requests live in memory only; a restart drops
//! them.
//!
//! Per guild the gate moves through `Idle → PendingConfirmation → Executing → Idle`, or
//! straight back to `Idle` on denial, expiry or a failed precondition check.

use rand::Rng;
use serenity::all::{GuildId, Permissions, UserId};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::{
    error::{precondition::PreconditionFailure, target::TargetError},
    model::{
        live::{LiveMember, LiveRole},
        restore::RestorePreview,
        snapshot::GuildSnapshot,
    },
    service::{restore::RestoreService, target::GuildTarget},
};

/// Length of confirmation tokens.
const TOKEN_LENGTH: usize = 32;

/// A restore waiting for the operator's decision.
#[derive(Debug, Clone)]
pub struct PendingRestore {
    pub guild_id: GuildId,
    /// The operator who requested the restore; only they may confirm it.
    pub operator: UserId,
    pub snapshot_name: String,
    pub snapshot: Arc<GuildSnapshot>,
    expires_at: Instant,
}

impl PendingRestore {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Where a guild currently is in the confirmation flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Idle,
    PendingConfirmation,
    Executing,
}

/// Result of a restore request.
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    /// Preconditions hold; the operator must confirm with `token`.
    Pending {
        token: String,
        preview: RestorePreview,
    },
    /// Preconditions failed; nothing was changed and nothing is pending.
    Aborted(PreconditionFailure),
}

/// Result of confirming or denying a pending request.
#[derive(Debug)]
pub enum ConfirmOutcome {
    /// The request was taken out of the gate.
    Accepted(PendingRestore),
    /// No live request with this token (never issued, already used, or expired).
    Unknown,
    /// The token belongs to a request made by someone else.
    WrongOperator,
}

/// Holds pending restore requests for every guild.
#[derive(Clone)]
pub struct ConfirmationGate {
    pending: Arc<RwLock<HashMap<String, PendingRestore>>>,
    executing: Arc<RwLock<HashSet<GuildId>>>,
    window: Duration,
}

impl ConfirmationGate {
    /// Creates a gate whose requests expire after `window`.
    pub fn new(window: Duration) -> Self {
        Self {
            pending: Arc::new(RwLock::new(HashMap::new())),
            executing: Arc::new(RwLock::new(HashSet::new())),
            window,
        }
    }

    /// How long a pending request stays confirmable.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Checks preconditions and, if they hold, parks the restore for confirmation.
    ///
    /// # Arguments
    /// - `target` - Guild the snapshot would be restored into
    /// - `operator` - User requesting the restore
    /// - `snapshot_name` - Artifact name, for display and logging
    /// - `snapshot` - The loaded snapshot
    ///
    /// # Returns
    /// - `Ok(GateDecision::Pending)` - Token and preview to show the operator
    /// - `Ok(GateDecision::Aborted)` - A precondition failed
    /// - `Err(TargetError)` - The guild could not be read
    pub async fn request(
        &self,
        target: &dyn GuildTarget,
        operator: UserId,
        snapshot_name: String,
        snapshot: GuildSnapshot,
    ) -> Result<GateDecision, TargetError> {
        let guild_id = target.guild_id();

        if let Some(failure) = check_preconditions(target).await? {
            tracing::info!("Restore into guild {} aborted: {}", guild_id, failure);
            return Ok(GateDecision::Aborted(failure));
        }

        let preview = RestoreService::new(target, Duration::ZERO)
            .preview(&snapshot)
            .await?;

        if self.state(guild_id).await != GateState::Idle {
            // Concurrent restores of one guild are not serialized
            tracing::warn!(
                "Guild {} already has a restore pending or running, accepting another request",
                guild_id
            );
        }

        let token = generate_token();
        let pending = PendingRestore {
            guild_id,
            operator,
            snapshot_name,
            snapshot: Arc::new(snapshot),
            expires_at: Instant::now() + self.window,
        };
        let mut requests = self.pending.write().await;
        requests.retain(|_, request| !request.is_expired());
        requests.insert(token.clone(), pending);
        drop(requests);

        Ok(GateDecision::Pending { token, preview })
    }

    /// Takes a pending request out of the gate and marks its guild as executing.
    ///
    /// The caller must re-run `check_preconditions` before restoring and call `finish`
    /// once the restore is over.
    pub async fn confirm(&self, token: &str, operator: UserId) -> ConfirmOutcome {
        let outcome = self.take(token, operator).await;
        if let ConfirmOutcome::Accepted(pending) = &outcome {
            self.executing.write().await.insert(pending.guild_id);
        }
        outcome
    }

    /// Discards a pending request.
    pub async fn deny(&self, token: &str, operator: UserId) -> ConfirmOutcome {
        self.take(token, operator).await
    }

    /// Returns a guild to `Idle` after its restore has run.
    pub async fn finish(&self, guild_id: GuildId) {
        self.executing.write().await.remove(&guild_id);
    }

    pub async fn state(&self, guild_id: GuildId) -> GateState {
        if self.executing.read().await.contains(&guild_id) {
            return GateState::Executing;
        }

        let pending = self.pending.read().await;
        let waiting = pending
            .values()
            .any(|request| request.guild_id == guild_id && !request.is_expired());
        if waiting {
            GateState::PendingConfirmation
        } else {
            GateState::Idle
        }
    }

    async fn take(&self, token: &str, operator: UserId) -> ConfirmOutcome {
        let mut pending = self.pending.write().await;
        pending.retain(|_, request| !request.is_expired());

        let requested_by = match pending.get(token) {
            Some(request) => request.operator,
            None => return ConfirmOutcome::Unknown,
        };
        if requested_by != operator {
            return ConfirmOutcome::WrongOperator;
        }

        pending
            .remove(token)
            .map(ConfirmOutcome::Accepted)
            .unwrap_or(ConfirmOutcome::Unknown)
    }
}

/// Reads the guild and checks that the bot may run a restore.
///
/// # Returns
/// - `Ok(None)` - Preconditions hold
/// - `Ok(Some(PreconditionFailure))` - The first precondition that failed
/// - `Err(TargetError)` - The bot's member or the guild's roles could not be read
pub async fn check_preconditions(
    target: &dyn GuildTarget,
) -> Result<Option<PreconditionFailure>, TargetError> {
    let acting = target.acting_member().await?;
    let roles = target.roles().await?;

    Ok(evaluate_preconditions(&acting, &roles).err())
}

/// The bot must have its own integration role, hold the guild's highest role, and that
/// integration role must grant administrator.
pub fn evaluate_preconditions(
    acting: &LiveMember,
    roles: &[LiveRole],
) -> Result<(), PreconditionFailure> {
    let managed = roles
        .iter()
        .find(|role| role.managed && role.bot_id == Some(acting.user_id))
        .ok_or(PreconditionFailure::MissingManagedRole)?;

    let top = roles
        .iter()
        .max_by_key(|role| (role.position, role.id))
        .ok_or(PreconditionFailure::NotTopRole)?;
    if !acting.role_ids.contains(&top.id) {
        return Err(PreconditionFailure::NotTopRole);
    }

    if !Permissions::from_bits_truncate(managed.permissions).administrator() {
        return Err(PreconditionFailure::NotAdministrator);
    }

    Ok(())
}

fn generate_token() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                             abcdefghijklmnopqrstuvwxyz\
                             0123456789";

    let mut rng = rand::rng();

    (0..TOKEN_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
