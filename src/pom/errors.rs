use thiserror::Error;

use crate::edit::EditError;

#[derive(Error, Debug)]
pub enum PomError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("POM model error: {0}")]
    Model(#[from] quick_xml::DeError),

    #[error("element path underflow: end tag without a matching start tag")]
    PathUnderflow,

    #[error("truncated document: {path} still open at end of input")]
    UnclosedElement { path: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("edit error: {0}")]
    Edit(#[from] EditError),
}
