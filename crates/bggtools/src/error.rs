/// Transport failures talking to the XML API
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Rate limited by BoardGameGeek, retry later")]
    RateLimited,

    #[error("Invalid API token: {0}")]
    InvalidToken(String),
}
