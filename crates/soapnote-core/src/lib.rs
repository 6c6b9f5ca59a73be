//! Shared building blocks for the soapnote crates

mod error;
mod stage;

pub use error::HttpError;
pub use stage::Stage;
