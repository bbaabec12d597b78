//! Error types for the inspector

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // Query Errors
    #[error("Sorry, list not found: {0}")]
    ListNotFound(String),

    #[error("Sorry, no permissions were found in list: {0}!")]
    NoPermissions(String),

    // Directory Errors
    #[error("Can't contact LDAP server: {0}")]
    ServerDown(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Server is unwilling to perform: {0}")]
    UnwillingToPerform(String),

    #[error("Bind failed with code: {0}")]
    Bind(u32),

    #[error("Directory search failed: {0}")]
    Search(String),

    // Local Errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Credential prompt aborted: {0}")]
    Prompt(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Error::ListNotFound(_) => "ListNotFound",
            Error::NoPermissions(_) => "NoPermissions",
            Error::ServerDown(_) => "ServerDown",
            Error::InvalidCredentials => "InvalidCredentials",
            Error::UnwillingToPerform(_) => "UnwillingToPerform",
            Error::Bind(_) => "BindFailed",
            Error::Search(_) => "SearchFailed",
            Error::Config(_) => "InvalidConfiguration",
            Error::Prompt(_) => "PromptAborted",
            Error::Other(_) => "InternalError",
        }
    }

    /// Query outcomes end the current query but not the process
    pub fn is_query_error(&self) -> bool {
        matches!(self, Error::ListNotFound(_) | Error::NoPermissions(_))
    }
}
