/// error kinds surfaced by the planner core. decoding and parsing errors
/// are fatal to their call; per-vessel anomalies (pin conflicts, empty
/// candidate sets) degrade that vessel instead of surfacing here.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("invalid save container: {0}")]
    InvalidContainer(String),
    #[error("decryption failure: {0}")]
    DecryptionFailure(String),
    #[error("malformed user-data blob: {0}")]
    MalformedBlob(String),
    #[error("no parseable characters in save")]
    NoCharacters,
    #[error("unknown character class: {0}")]
    UnknownCharacterClass(String),
    #[error("missing resource file: {0}")]
    MissingResource(String),
    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("xml: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = PlannerError> = std::result::Result<T, E>;
