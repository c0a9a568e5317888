use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error
{
    RuntimeError(String),
    TransportError(String),
    HTTPError(u16, String),
    DataError(String),
    ConfigError(String),
}

macro_rules! error
{
    ($err_type:ident, $($arg:tt)+) =>
    {
        $crate::error::Error::$err_type(format!($($arg)+))
    };
}

macro_rules! rterr
{
    ($($arg:tt)+) =>
    {
        $crate::error::Error::RuntimeError(format!($($arg)+))
    };
}

impl fmt::Display for Error
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        match self
        {
            Error::RuntimeError(msg) => write!(f, "Runtime error: {}", msg),
            Error::TransportError(msg) => write!(f, "Transport error: {}", msg),
            Error::HTTPError(code, msg) =>
                write!(f, "HTTP error {}: {}", code, msg),
            Error::DataError(msg) => write!(f, "Data error: {}", msg),
            Error::ConfigError(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
