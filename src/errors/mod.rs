pub mod sign_error;

pub use sign_error::{SignError, SignResult, error_codes};
