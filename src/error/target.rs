use thiserror::Error;

/// Failure of a single call against the live guild.
#[derive(Error, Debug)]
pub enum TargetError {
    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    Discord(#[from] Box<serenity::Error>),

    /// Downloading an attachment or role icon from the CDN failed.
    #[error(transparent)]
    Download(#[from] reqwest::Error),

    /// The platform refused the operation.
    #[error("{0}")]
    Rejected(String),
}

impl From<serenity::Error> for TargetError {
    fn from(err: serenity::Error) -> Self {
        TargetError::Discord(Box::new(err))
    }
}
