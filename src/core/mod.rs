// Core modules implementing the message model, parsers, and error modeling.
pub mod compact;
pub mod component;
pub mod emptyable;
pub mod error;
pub mod format;
pub mod message;
pub mod parse;
pub mod section;
pub mod tag;
pub mod wire;
