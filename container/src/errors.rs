use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("Container source unavailable: {0}")]
    SourceUnavailable(#[from] std::io::Error),
    #[error("Malformed PKCS#12 container: {0}")]
    MalformedContainer(openssl::error::ErrorStack),
    #[error("Container authentication failure: {0}")]
    AuthenticationFailure(openssl::error::ErrorStack),
}
