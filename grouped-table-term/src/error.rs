use grouped_table::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TermError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid table configuration: {0}")]
    Config(#[from] ConfigError),
}
