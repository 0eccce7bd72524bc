//! Purpose: Chat text modelling library behind the `chatmark` CLI.
//! Exports: `core` plus a flat re-export of the stable model and parser types.
//! Role: Immutable chat component model, legacy-markup parsers, wire conversion.
//! Invariants: Model types are immutable and freely shareable across threads.
//! Invariants: Text parsing never fails; only validation and wire decoding error.

pub mod core;

pub use crate::core::component::{ChatComponent, ChatComponentBuilder};
pub use crate::core::emptyable::Emptyable;
pub use crate::core::error::{Error, ErrorKind, to_exit_code};
pub use crate::core::format::{Colour, Format, Rgb, Style, Styles};
pub use crate::core::message::{Message, SendableMessage};
pub use crate::core::parse::{
    DEFAULT_FORMAT_CHAR, FormattingCodePattern, parse, parse_json, parse_json_with, parse_with,
};
pub use crate::core::section::{
    ClickKind, JsonClick, JsonHover, JsonInsertion, JsonSection, JsonSectionBuilder,
};
pub use crate::core::tag::JsonTag;
pub use crate::core::wire::{from_json, strip, to_json, to_legacy};
