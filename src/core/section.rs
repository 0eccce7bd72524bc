//! Purpose: Group components under one shared hover/click/insertion action.
//! Exports: `JsonSection`, `JsonSectionBuilder`, `JsonHover`, `JsonClick`, `ClickKind`, `JsonInsertion`.
//! Role: Action-bearing layer of the message model.
//! Invariants: A hover tooltip holds plain components only; nested actions are unrepresentable.
//! Invariants: Sections with no contents canonicalize to `JsonSection::EMPTY`.
//! Invariants: Each action slot is single-valued; setting it again overwrites.

use crate::core::compact::Merge;
use crate::core::component::ChatComponent;
use crate::core::emptyable::Emptyable;
use crate::core::message::Message;

/// Tooltip shown on mouse-over. Wrapping a plain [`Message`] is what keeps
/// hover contents free of further actions.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct JsonHover {
    tooltip: Message,
}

impl JsonHover {
    pub fn new(tooltip: Message) -> Self {
        Self { tooltip }
    }

    pub fn tooltip(&self) -> &Message {
        &self.tooltip
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ClickKind {
    RunCommand,
    SuggestCommand,
    OpenUrl,
}

impl ClickKind {
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::RunCommand => "run_command",
            Self::SuggestCommand => "suggest_command",
            Self::OpenUrl => "open_url",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        match name {
            "run_command" => Some(Self::RunCommand),
            "suggest_command" => Some(Self::SuggestCommand),
            "open_url" => Some(Self::OpenUrl),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct JsonClick {
    kind: ClickKind,
    value: String,
}

impl JsonClick {
    pub fn new(kind: ClickKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn kind(&self) -> ClickKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Text inserted into the chat prompt on shift-click.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct JsonInsertion(String);

impl JsonInsertion {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct JsonSection {
    contents: Vec<ChatComponent>,
    hover: Option<JsonHover>,
    click: Option<JsonClick>,
    insertion: Option<JsonInsertion>,
}

impl JsonSection {
    /// Canonical contentless, actionless section.
    pub const EMPTY: Self = Self {
        contents: Vec::new(),
        hover: None,
        click: None,
        insertion: None,
    };

    pub fn builder() -> JsonSectionBuilder {
        JsonSectionBuilder::new()
    }

    /// Actionless section around existing components.
    pub fn plain(contents: Vec<ChatComponent>) -> Self {
        JsonSectionBuilder::new().contents(contents).build()
    }

    pub fn contents(&self) -> &[ChatComponent] {
        &self.contents
    }

    pub fn hover(&self) -> Option<&JsonHover> {
        self.hover.as_ref()
    }

    pub fn click(&self) -> Option<&JsonClick> {
        self.click.as_ref()
    }

    pub fn insertion(&self) -> Option<&JsonInsertion> {
        self.insertion.as_ref()
    }

    pub(crate) fn compact_contents(&mut self) {
        crate::core::compact::compact(&mut self.contents);
    }
}

impl Emptyable for JsonSection {
    fn is_empty(&self) -> bool {
        self.contents.iter().all(Emptyable::is_empty)
    }
}

impl Merge for JsonSection {
    fn same_format(&self, other: &Self) -> bool {
        self.hover == other.hover
            && self.click == other.click
            && self.insertion == other.insertion
    }

    fn merge(mut self, other: Self) -> Self {
        self.contents.extend(other.contents);
        self
    }
}

/// Mutable single-use accumulator; not thread-safe, discarded after `build()`.
#[derive(Debug, Default)]
pub struct JsonSectionBuilder {
    contents: Vec<ChatComponent>,
    hover: Option<JsonHover>,
    click: Option<JsonClick>,
    insertion: Option<JsonInsertion>,
}

impl JsonSectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(mut self, contents: Vec<ChatComponent>) -> Self {
        self.contents = contents;
        self
    }

    pub fn component(mut self, component: ChatComponent) -> Self {
        self.contents.push(component);
        self
    }

    pub fn hover(mut self, hover: JsonHover) -> Self {
        self.hover = Some(hover);
        self
    }

    pub fn click(mut self, click: JsonClick) -> Self {
        self.click = Some(click);
        self
    }

    pub fn insertion(mut self, insertion: JsonInsertion) -> Self {
        self.insertion = Some(insertion);
        self
    }

    pub fn build(self) -> JsonSection {
        if self.contents.is_empty() {
            return JsonSection::EMPTY;
        }
        JsonSection {
            contents: self.contents,
            hover: self.hover,
            click: self.click,
            insertion: self.insertion,
        }
    }
}
