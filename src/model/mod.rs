//! Domain models.
//!
//! - `snapshot` - The portable guild snapshot written to and read from the snapshot store
//! - `live` - Views of a live guild and the parameter types used to mutate it
//! - `restore` - Restore previews and itemized restore reports
//! - `guild` - Registered guilds and their snapshot bookkeeping

pub mod guild;
pub mod live;
pub mod restore;
pub mod snapshot;
