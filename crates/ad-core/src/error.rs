use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Missing field: {field}")]
    MissingField { field: String },

    #[error("Unknown compartment: {value}")]
    UnknownCompartment { value: String },

    #[error("Compartment cannot be selected: {value}")]
    NotSelectable { value: String },

    #[error("Unknown polymer type: {value}")]
    UnknownPolymer { value: String },
}
