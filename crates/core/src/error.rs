#[derive(Debug, thiserror::Error)]
pub enum CitaError {
    #[error("Cita no encontrada")]
    NotFound,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("spreadsheet request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("spreadsheet API returned status {status}: {body}")]
    SheetsApi { status: u16, body: String },
}

pub type CitaResult<T> = std::result::Result<T, CitaError>;
