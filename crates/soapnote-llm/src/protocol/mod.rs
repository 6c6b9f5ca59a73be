//! Provider wire formats

pub mod openai;
