//! File-backed snapshot store.
//!
//! Each capture is written as one artifact file named `<YYYY-MM-DD>_<guild-slug>_snapshot`
//! inside the configured snapshot directory. Artifacts are bincode-encoded and start with a
//! format version so that incompatible files fail loudly instead of decoding into garbage.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{error::snapshot::SnapshotError, model::snapshot::GuildSnapshot};

/// Version written into every artifact.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

const ARTIFACT_SUFFIX: &str = "_snapshot";
const TEMP_SUFFIX: &str = ".tmp";

#[derive(Serialize)]
struct ArtifactRef<'a> {
    format_version: u32,
    snapshot: &'a GuildSnapshot,
}

#[derive(Deserialize)]
struct Artifact {
    #[allow(dead_code)]
    format_version: u32,
    snapshot: GuildSnapshot,
}

#[derive(Clone, Debug)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the snapshot directory if it does not exist yet.
    pub async fn init(&self) -> Result<(), SnapshotError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Lower-cased guild name with spaces and path separators replaced by underscores.
    pub fn guild_slug(guild_name: &str) -> String {
        guild_name
            .to_lowercase()
            .chars()
            .map(|c| match c {
                ' ' | '/' | '\\' => '_',
                c => c,
            })
            .collect()
    }

    /// Artifact name for a guild captured on the given date.
    pub fn artifact_name(date: NaiveDate, guild_name: &str) -> String {
        format!(
            "{}_{}{}",
            date.format("%Y-%m-%d"),
            Self::guild_slug(guild_name),
            ARTIFACT_SUFFIX
        )
    }

    /// Persists a snapshot and returns its artifact name.
    ///
    /// The artifact name is derived from the capture date and guild name, so a second save
    /// on the same day replaces the first. The file is written to a temporary path and
    /// renamed into place so readers never observe a half-written artifact.
    ///
    /// # Returns
    /// - `Ok(String)` - Name of the written artifact
    /// - `Err(SnapshotError::MissingDefaultRole | DuplicateRoleVariant)` - Snapshot is malformed
    /// - `Err(SnapshotError::Encode | Io)` - Serialization or filesystem failure
    pub async fn save(&self, snapshot: &GuildSnapshot) -> Result<String, SnapshotError> {
        snapshot.validate()?;

        let name = Self::artifact_name(snapshot.captured_at.date_naive(), &snapshot.guild_name);
        let bytes = bincode::serde::encode_to_vec(
            ArtifactRef {
                format_version: SNAPSHOT_FORMAT_VERSION,
                snapshot,
            },
            bincode::config::standard(),
        )?;

        let path = self.root.join(&name);
        let temp_path = self.root.join(format!("{}{}", name, TEMP_SUFFIX));
        tokio::fs::write(&temp_path, &bytes).await?;
        tokio::fs::rename(&temp_path, &path).await?;

        tracing::info!(
            "Saved snapshot {} for guild {} ({} bytes)",
            name,
            snapshot.guild_id,
            bytes.len()
        );

        Ok(name)
    }

    /// Lists artifact names containing `filter`, newest first.
    ///
    /// An empty filter lists everything. Names start with the capture date, so sorting them
    /// in reverse puts the most recent captures first.
    pub async fn list(&self, filter: &str) -> Result<Vec<String>, SnapshotError> {
        let mut names = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(names),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if name.ends_with(ARTIFACT_SUFFIX) && name.contains(filter) {
                names.push(name);
            }
        }

        names.sort_unstable_by(|a, b| b.cmp(a));
        Ok(names)
    }

    /// Reads an artifact back into a snapshot.
    ///
    /// # Returns
    /// - `Ok(GuildSnapshot)` - The stored snapshot
    /// - `Err(SnapshotError::InvalidName)` - Name contains path components
    /// - `Err(SnapshotError::NotFound)` - No such artifact
    /// - `Err(SnapshotError::UnsupportedVersion | Decode)` - Unreadable artifact
    /// - `Err(SnapshotError::MissingDefaultRole | DuplicateRoleVariant)` - Malformed snapshot
    pub async fn load(&self, name: &str) -> Result<GuildSnapshot, SnapshotError> {
        Self::check_name(name)?;

        let bytes = match tokio::fs::read(self.root.join(name)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SnapshotError::NotFound(name.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        // The version is the first field, so it can be read before the full decode
        let (version, _): (u32, usize) =
            bincode::serde::decode_from_slice(&bytes, bincode::config::standard())?;
        if version != SNAPSHOT_FORMAT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: version,
                expected: SNAPSHOT_FORMAT_VERSION,
            });
        }

        let (artifact, _): (Artifact, usize) =
            bincode::serde::decode_from_slice(&bytes, bincode::config::standard())?;
        artifact.snapshot.validate()?;

        tracing::debug!("Loaded snapshot {} ({} bytes)", name, bytes.len());

        Ok(artifact.snapshot)
    }

    /// Deletes a guild's artifacts captured before `cutoff`.
    ///
    /// # Returns
    /// - `Ok(Vec<String>)` - Names of the deleted artifacts
    pub async fn prune_before(
        &self,
        guild_name: &str,
        cutoff: NaiveDate,
    ) -> Result<Vec<String>, SnapshotError> {
        let guild_suffix = format!("_{}{}", Self::guild_slug(guild_name), ARTIFACT_SUFFIX);
        let mut removed = Vec::new();

        for name in self.list("").await? {
            let Some(date_part) = name.strip_suffix(&guild_suffix) else {
                continue;
            };
            let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") else {
                continue;
            };
            if date < cutoff {
                tokio::fs::remove_file(self.root.join(&name)).await?;
                tracing::info!("Pruned snapshot {}", name);
                removed.push(name);
            }
        }

        Ok(removed)
    }

    fn check_name(name: &str) -> Result<(), SnapshotError> {
        if name.is_empty()
            || name.starts_with('.')
            || name.contains('/')
            || name.contains('\\')
            || name.contains("..")
        {
            return Err(SnapshotError::InvalidName(name.to_string()));
        }
        Ok(())
    }
}
