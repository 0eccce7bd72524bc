//! Purpose: Model one immutable run of chat text with its formatting.
//! Exports: `ChatComponent`, `ChatComponentBuilder`.
//! Role: Leaf of the message model; everything else aggregates these.
//! Invariants: Immutable after `build()`; colour and styles are pre-validated by their types.
//! Invariants: A component is empty exactly when its text is empty.

use crate::core::compact::Merge;
use crate::core::emptyable::Emptyable;
use crate::core::format::{Colour, Rgb, Style, Styles};

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ChatComponent {
    text: String,
    colour: Option<Rgb>,
    styles: Styles,
}

impl ChatComponent {
    /// Canonical empty component: no text, no colour, no styles.
    pub const EMPTY: Self = Self {
        text: String::new(),
        colour: None,
        styles: Styles::EMPTY,
    };

    pub fn builder() -> ChatComponentBuilder {
        ChatComponentBuilder::new()
    }

    /// Unformatted text run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            colour: None,
            styles: Styles::EMPTY,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn colour(&self) -> Option<Rgb> {
        self.colour
    }

    pub fn styles(&self) -> Styles {
        self.styles
    }
}

impl Emptyable for ChatComponent {
    fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl Merge for ChatComponent {
    fn same_format(&self, other: &Self) -> bool {
        self.colour == other.colour && self.styles == other.styles
    }

    fn merge(mut self, other: Self) -> Self {
        self.text.push_str(&other.text);
        self
    }
}

/// Mutable single-use accumulator; not thread-safe, discarded after `build()`.
#[derive(Debug, Default)]
pub struct ChatComponentBuilder {
    text: String,
    colour: Option<Rgb>,
    styles: Styles,
}

impl ChatComponentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn colour(mut self, colour: Rgb) -> Self {
        self.colour = Some(colour);
        self
    }

    pub fn named_colour(mut self, colour: Colour) -> Self {
        self.colour = Some(colour.rgb());
        self
    }

    pub fn clear_colour(mut self) -> Self {
        self.colour = None;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.styles.insert(style);
        self
    }

    pub fn styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    pub fn build(self) -> ChatComponent {
        ChatComponent {
            text: self.text,
            colour: self.colour,
            styles: self.styles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ChatComponent;
    use crate::core::compact::Merge;
    use crate::core::emptyable::Emptyable;
    use crate::core::format::{Colour, Style};

    #[test]
    fn empty_iff_text_is_empty() {
        assert!(ChatComponent::EMPTY.is_empty());
        let coloured_but_blank = ChatComponent::builder()
            .named_colour(Colour::Red)
            .style(Style::Bold)
            .build();
        assert!(coloured_but_blank.is_empty());
        assert!(!ChatComponent::plain(" ").is_empty());
    }

    #[test]
    fn same_format_ignores_text() {
        let a = ChatComponent::builder()
            .text("Hello")
            .named_colour(Colour::Red)
            .build();
        let b = ChatComponent::builder()
            .text("World")
            .named_colour(Colour::Red)
            .build();
        let c = ChatComponent::builder()
            .text("World")
            .named_colour(Colour::Red)
            .style(Style::Bold)
            .build();
        assert!(a.same_format(&b));
        assert!(!a.same_format(&c));
    }

    #[test]
    fn merge_keeps_earlier_text_first() {
        let a = ChatComponent::plain("Hello ");
        let b = ChatComponent::plain("World");
        assert_eq!(a.merge(b).text(), "Hello World");
    }
}
