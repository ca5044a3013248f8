use thiserror::Error;

/// Errors produced while building requests or normalizing BoardGameGeek responses
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BggError {
    #[error("{0} is required")]
    MissingParameter(&'static str),

    #[error("Invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: String },

    #[error("Malformed XML: {0}")]
    Xml(String),

    #[error("BoardGameGeek API error: {0}")]
    Api(String),

    #[error("Game not found")]
    GameNotFound,

    #[error("{forum_type} forum not found for game {game_id}")]
    ForumNotFound { forum_type: String, game_id: String },

    #[error("Thread not found")]
    ThreadNotFound,
}

impl From<roxmltree::Error> for BggError {
    fn from(err: roxmltree::Error) -> Self {
        BggError::Xml(err.to_string())
    }
}
