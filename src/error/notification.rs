use thiserror::Error;

/// Failures delivering an outbound notification or touching a posted message.
#[derive(Error, Debug)]
pub enum NotificationError {
    /// The target message, channel, or user does not exist (or no longer exists).
    #[error("Notification target not found")]
    NotFound,

    /// The platform refused delivery, e.g. the recipient blocks direct messages.
    #[error("Notification delivery forbidden")]
    Forbidden,

    /// Any other Discord API failure.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    Discord(#[from] Box<serenity::Error>),
}

impl From<serenity::Error> for NotificationError {
    fn from(err: serenity::Error) -> Self {
        use serenity::all::HttpError;

        if let serenity::Error::Http(HttpError::UnsuccessfulRequest(ref response)) = err {
            match response.status_code.as_u16() {
                404 => return NotificationError::NotFound,
                403 => return NotificationError::Forbidden,
                _ => {}
            }
        }

        NotificationError::Discord(Box::new(err))
    }
}
