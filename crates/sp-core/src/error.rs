use crate::data::DataError;
use crate::prep::PrepError;

#[derive(thiserror::Error, Debug)]
pub enum StatPrepError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Preparation error: {0}")]
    Prep(#[from] PrepError),
}
