use std::fmt::Display;

use log::warn;

pub trait LogErr {
    /// Logs the error with `msg` and passes the result through untouched.
    fn log_err(self, msg: &str) -> Self;
}

impl<T, E: Display> LogErr for Result<T, E> {
    fn log_err(self, msg: &str) -> Self {
        if let Err(e) = &self {
            warn!("{msg}: {e}");
        }
        self
    }
}
