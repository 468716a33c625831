#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("projection names unknown signature: {type_name}")]
    UnknownProjectionType { type_name: String },

    #[error("projection atom {atom} is not an atom of {type_name}")]
    UnknownProjectionAtom { type_name: String, atom: String },

    #[error("Invalid graph config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
