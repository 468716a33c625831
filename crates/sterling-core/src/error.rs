pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{construct}: missing required attribute `{attribute}`")]
    MissingAttribute {
        construct: &'static str,
        attribute: &'static str,
    },

    #[error("{construct}: missing required element <{element}>")]
    MissingElement {
        construct: &'static str,
        element: &'static str,
    },

    #[error("{construct}: {message}")]
    Resolution {
        construct: &'static str,
        message: String,
    },

    #[error("{construct}: {message}")]
    Domain {
        construct: &'static str,
        message: String,
    },

    #[error("Invalid instance document: {message}")]
    InvalidDocument { message: String },

    #[error(transparent)]
    Xml(#[from] roxmltree::Error),
}

impl Error {
    pub(crate) fn missing_attribute(construct: &'static str, attribute: &'static str) -> Self {
        Self::MissingAttribute {
            construct,
            attribute,
        }
    }

    pub(crate) fn missing_element(construct: &'static str, element: &'static str) -> Self {
        Self::MissingElement { construct, element }
    }

    pub(crate) fn resolution(construct: &'static str, message: impl Into<String>) -> Self {
        Self::Resolution {
            construct,
            message: message.into(),
        }
    }

    pub(crate) fn domain(construct: &'static str, message: impl Into<String>) -> Self {
        Self::Domain {
            construct,
            message: message.into(),
        }
    }
}
