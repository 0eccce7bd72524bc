//! Purpose: Immutable ordered message types built from components and sections.
//! Exports: `Message`, `SendableMessage`.
//! Role: Top of the model; what parsers produce and wire conversion consumes.
//! Invariants: Construction runs the compaction pass, so stored sequences are canonical.
//! Invariants: Equality and hashing skip empty elements on both sides.

use std::hash::{Hash, Hasher};

use crate::core::compact::compact;
use crate::core::component::ChatComponent;
use crate::core::emptyable::{Emptyable, eq_ignoring_empty, hash_ignoring_empty};
use crate::core::section::JsonSection;

/// Ordered run of plain textual components, no JSON actions.
#[derive(Clone, Debug)]
pub struct Message {
    components: Vec<ChatComponent>,
}

impl Message {
    pub fn new(mut components: Vec<ChatComponent>) -> Self {
        compact(&mut components);
        Self { components }
    }

    pub fn components(&self) -> &[ChatComponent] {
        &self.components
    }

    pub fn is_empty(&self) -> bool {
        self.components.iter().all(Emptyable::is_empty)
    }

    /// Concatenation of all component texts, formatting discarded.
    pub fn plain_text(&self) -> String {
        self.components
            .iter()
            .map(ChatComponent::text)
            .collect()
    }

    /// Wrap the components in a single actionless section.
    pub fn into_sendable(self) -> SendableMessage {
        SendableMessage::new(vec![JsonSection::plain(self.components)])
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        eq_ignoring_empty(&self.components, &other.components)
    }
}

impl Eq for Message {}

impl Hash for Message {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_ignoring_empty(&self.components, state);
    }
}

/// Ordered run of action-bearing sections.
#[derive(Clone, Debug)]
pub struct SendableMessage {
    sections: Vec<JsonSection>,
}

impl SendableMessage {
    pub fn new(mut sections: Vec<JsonSection>) -> Self {
        compact(&mut sections);
        for section in &mut sections {
            section.compact_contents();
        }
        Self { sections }
    }

    pub fn sections(&self) -> &[JsonSection] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(Emptyable::is_empty)
    }

    pub fn plain_text(&self) -> String {
        self.sections
            .iter()
            .flat_map(|section| section.contents().iter())
            .map(ChatComponent::text)
            .collect()
    }
}

impl PartialEq for SendableMessage {
    fn eq(&self, other: &Self) -> bool {
        eq_ignoring_empty(&self.sections, &other.sections)
    }
}

impl Eq for SendableMessage {}

impl Hash for SendableMessage {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_ignoring_empty(&self.sections, state);
    }
}
