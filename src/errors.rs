use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("No arms to draw from")]
    NoArmsAvailable,
    #[error("Arm {0} not found")]
    ArmNotFound(usize),
    #[error("Reward {0} is not binary")]
    InvalidReward(f64),
    #[error("Horizon {horizon} is not a multiple of batch size {batch_size}")]
    InvalidBatchSize { horizon: u64, batch_size: u64 },
    #[error("Invalid value {value} for parameter {name}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("Error while sampling: {0}")]
    SamplingError(String),
}

#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Policy(#[from] PolicyError),
}
