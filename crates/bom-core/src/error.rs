use thiserror::Error;

pub type BomResult<T> = Result<T, BomError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BomError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Non-positive numeric value for {what}: {value}")]
    NonPositive { what: &'static str, value: f64 },

    #[error("Empty component identifier")]
    EmptyId,
}
