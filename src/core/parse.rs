//! Purpose: Parse legacy `&`-coded text and the `||` JSON-tag micro-format into messages.
//! Exports: `FormattingCodePattern`, `DEFAULT_FORMAT_CHAR`, `parse`, `parse_with`, `parse_json`, `parse_json_with`.
//! Role: Entry point from raw chat strings into the component model.
//! Invariants: Parsing never fails; codes outside the pattern stay literal text.
//! Invariants: No implicit reset is inserted between segments.
//! Invariants: Formatting state carries across `||` nodes within one parse.

use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};

use regex::Regex;
use tracing::trace;

use crate::core::component::ChatComponent;
use crate::core::format::{Format, Rgb, Styles};
use crate::core::message::{Message, SendableMessage};
use crate::core::section::{ClickKind, JsonClick, JsonHover, JsonInsertion, JsonSection};
use crate::core::tag::JsonTag;

pub const DEFAULT_FORMAT_CHAR: char = '&';

// The historical class spans k-r even though p and q name no style; the
// scanner re-emits those two as literal text.
const CODE_CLASS: &str = "[0-9A-Fa-fK-Rk-r]";

static DEFAULT_PATTERN: LazyLock<FormattingCodePattern> =
    LazyLock::new(|| FormattingCodePattern::build(DEFAULT_FORMAT_CHAR));

static PATTERN_CACHE: LazyLock<Mutex<HashMap<char, Regex>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Precompiled matcher for `<format char><code>` pairs.
#[derive(Clone, Debug)]
pub struct FormattingCodePattern {
    format_char: char,
    pattern: Regex,
}

impl FormattingCodePattern {
    /// The memoized default `&` pattern.
    pub fn get() -> &'static Self {
        &DEFAULT_PATTERN
    }

    /// Pattern for an arbitrary format character; compiled once per
    /// character and cached process-wide.
    pub fn for_char(format_char: char) -> Self {
        if format_char == DEFAULT_FORMAT_CHAR {
            return Self::get().clone();
        }
        let mut cache = PATTERN_CACHE
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let pattern = cache
            .entry(format_char)
            .or_insert_with(|| compile_pattern(format_char))
            .clone();
        Self {
            format_char,
            pattern,
        }
    }

    fn build(format_char: char) -> Self {
        Self {
            format_char,
            pattern: compile_pattern(format_char),
        }
    }

    pub fn format_char(&self) -> char {
        self.format_char
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

fn compile_pattern(format_char: char) -> Regex {
    let escaped = regex::escape(format_char.encode_utf8(&mut [0u8; 4]));
    Regex::new(&format!("{escaped}{CODE_CLASS}"))
        .expect("formatting code pattern is a fixed, valid expression")
}

/// Parse legacy text under the default `&` format character.
pub fn parse(input: &str) -> Message {
    parse_with(input, DEFAULT_FORMAT_CHAR)
}

pub fn parse_with(input: &str, format_char: char) -> Message {
    let pattern = FormattingCodePattern::for_char(format_char);
    let mut scanner = Scanner::new();
    let components = scanner.scan(input, &pattern);
    trace!(len = input.len(), components = components.len(), "parsed legacy text");
    Message::new(components)
}

/// Parse the `||` JSON-tag micro-format under the default `&` format character.
pub fn parse_json(input: &str) -> SendableMessage {
    parse_json_with(input, DEFAULT_FORMAT_CHAR)
}

pub fn parse_json_with(input: &str, format_char: char) -> SendableMessage {
    let pattern = FormattingCodePattern::for_char(format_char);
    let mut scanner = Scanner::new();
    let mut sections: Vec<JsonSection> = Vec::new();
    let mut open = OpenSection::new();

    for node in input.split("||") {
        let tag = JsonTag::get_for(node);
        let value = tag.value(node);
        match tag {
            JsonTag::None => {
                // A plain node closes out the previous section and becomes
                // the target of any tags that follow it.
                if !open.contents.is_empty() {
                    sections.push(open.close());
                    open = OpenSection::new();
                }
                open.contents.extend(scanner.scan(node, &pattern));
            }
            // Tooltips are parsed with fresh formatting state; by type they
            // can never carry nested actions.
            JsonTag::Ttp => open.hover = Some(JsonHover::new(parse_with(value, format_char))),
            // One click slot per section: a later click-type tag overwrites
            // an earlier one on the same node.
            JsonTag::Url => open.click = Some(JsonClick::new(ClickKind::OpenUrl, value)),
            JsonTag::Cmd => open.click = Some(JsonClick::new(ClickKind::RunCommand, value)),
            JsonTag::Sgt => open.click = Some(JsonClick::new(ClickKind::SuggestCommand, value)),
            JsonTag::Ins => open.insertion = Some(JsonInsertion::new(value)),
        }
    }
    sections.push(open.close());
    trace!(len = input.len(), sections = sections.len(), "parsed json-tag text");
    SendableMessage::new(sections)
}

/// Formatting-state accumulator for one left-to-right scan. State survives
/// across `||` nodes, so a colour opened in one node styles the next.
struct Scanner {
    colour: Option<Rgb>,
    styles: Styles,
}

impl Scanner {
    fn new() -> Self {
        Self {
            colour: None,
            styles: Styles::EMPTY,
        }
    }

    fn scan(&mut self, input: &str, pattern: &FormattingCodePattern) -> Vec<ChatComponent> {
        let mut out = Vec::new();
        let mut last_end = 0;
        for found in pattern.pattern().find_iter(input) {
            self.flush(&input[last_end..found.start()], &mut out);
            let code = found.as_str().chars().nth(1);
            match code.and_then(Format::from_code) {
                Some(Format::Colour(colour)) => {
                    // One colour at a time; a new colour clears active styles.
                    self.colour = Some(colour.rgb());
                    self.styles = Styles::EMPTY;
                }
                Some(Format::Style(style)) => self.styles.insert(style),
                Some(Format::Reset) => {
                    self.colour = None;
                    self.styles = Styles::EMPTY;
                }
                // p and q match the class but name nothing; keep them literal.
                None => self.flush(found.as_str(), &mut out),
            }
            last_end = found.end();
        }
        self.flush(&input[last_end..], &mut out);
        out
    }

    fn flush(&self, text: &str, out: &mut Vec<ChatComponent>) {
        if text.is_empty() {
            return;
        }
        let mut builder = ChatComponent::builder().text(text).styles(self.styles);
        if let Some(colour) = self.colour {
            builder = builder.colour(colour);
        }
        out.push(builder.build());
    }
}

/// In-progress section for the `||` state machine. Unlike the public
/// builder this one is reused field-by-field, so it lives here.
struct OpenSection {
    contents: Vec<ChatComponent>,
    hover: Option<JsonHover>,
    click: Option<JsonClick>,
    insertion: Option<JsonInsertion>,
}

impl OpenSection {
    fn new() -> Self {
        Self {
            contents: Vec::new(),
            hover: None,
            click: None,
            insertion: None,
        }
    }

    fn close(self) -> JsonSection {
        let mut builder = JsonSection::builder().contents(self.contents);
        if let Some(hover) = self.hover {
            builder = builder.hover(hover);
        }
        if let Some(click) = self.click {
            builder = builder.click(click);
        }
        if let Some(insertion) = self.insertion {
            builder = builder.insertion(insertion);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::{FormattingCodePattern, parse, parse_json, parse_with};
    use crate::core::format::{Colour, Style};
    use crate::core::section::ClickKind;

    #[test]
    fn default_pattern_matches_the_historical_class() {
        let pattern = FormattingCodePattern::get().pattern();
        for hit in ["&a", "&K", "&r", "&0", "&F"] {
            assert!(pattern.is_match(hit), "{hit} should match");
        }
        for miss in ["&z", "&", "a", "& a"] {
            assert!(!pattern.is_match(miss), "{miss} should not match");
        }
    }

    #[test]
    fn single_coloured_segment() {
        let message = parse("&cHello");
        assert_eq!(message.components().len(), 1);
        let component = &message.components()[0];
        assert_eq!(component.text(), "Hello");
        assert_eq!(component.colour(), Some(Colour::Red.rgb()));
        assert!(component.styles().is_empty());
    }

    #[test]
    fn leading_plain_text_keeps_no_colour() {
        let message = parse("Hello &cWorld");
        assert_eq!(message.components().len(), 2);
        assert_eq!(message.components()[0].text(), "Hello ");
        assert_eq!(message.components()[0].colour(), None);
        assert_eq!(message.components()[1].text(), "World");
        assert_eq!(message.components()[1].colour(), Some(Colour::Red.rgb()));
    }

    #[test]
    fn adjacent_same_colour_segments_merge() {
        let message = parse("&cHello &cWorld");
        assert_eq!(message.components().len(), 1);
        assert_eq!(message.components()[0].text(), "Hello World");
    }

    #[test]
    fn styles_accumulate_until_colour_or_reset() {
        let message = parse("&l&nboth&cred&rplain");
        let components = message.components();
        assert_eq!(components.len(), 3);
        assert!(components[0].styles().contains(Style::Bold));
        assert!(components[0].styles().contains(Style::Underline));
        assert_eq!(components[1].text(), "red");
        assert!(components[1].styles().is_empty());
        assert_eq!(components[1].colour(), Some(Colour::Red.rgb()));
        assert_eq!(components[2].text(), "plain");
        assert_eq!(components[2].colour(), None);
    }

    #[test]
    fn unassigned_class_members_stay_literal() {
        let message = parse("a&pb");
        assert_eq!(message.components().len(), 1);
        assert_eq!(message.components()[0].text(), "a&pb");
    }

    #[test]
    fn malformed_codes_are_plain_text() {
        let message = parse("&zkeep &");
        assert_eq!(message.components().len(), 1);
        assert_eq!(message.components()[0].text(), "&zkeep &");
    }

    #[test]
    fn custom_format_char_scans_the_same_way() {
        let message = parse_with("§cHello", '§');
        assert_eq!(message.components()[0].text(), "Hello");
        assert_eq!(message.components()[0].colour(), Some(Colour::Red.rgb()));
        // The default character is inert under a custom pattern.
        let inert = parse_with("&cHello", '§');
        assert_eq!(inert.components()[0].text(), "&cHello");
    }

    #[test]
    fn json_tags_attach_to_the_preceding_plain_node() {
        let message = parse_json("&aClick me||cmd:/spawn||ttp:&7teleport home||ins:hi");
        assert_eq!(message.sections().len(), 1);
        let section = &message.sections()[0];
        assert_eq!(section.contents()[0].text(), "Click me");
        let click = section.click().expect("click");
        assert_eq!(click.kind(), ClickKind::RunCommand);
        assert_eq!(click.value(), "/spawn");
        let hover = section.hover().expect("hover");
        assert_eq!(hover.tooltip().plain_text(), "teleport home");
        assert_eq!(section.insertion().expect("insertion").value(), "hi");
    }

    #[test]
    fn plain_node_closes_the_previous_section() {
        let message = parse_json("one||url:https://example.invalid||two");
        assert_eq!(message.sections().len(), 2);
        assert!(message.sections()[0].click().is_some());
        assert!(message.sections()[1].click().is_none());
        assert_eq!(message.sections()[1].contents()[0].text(), "two");
    }

    #[test]
    fn later_click_tag_overwrites_earlier_on_same_node() {
        let message = parse_json("text||url:https://example.invalid||cmd:/spawn");
        let click = message.sections()[0].click().expect("click");
        assert_eq!(click.kind(), ClickKind::RunCommand);
        assert_eq!(click.value(), "/spawn");
    }

    #[test]
    fn formatting_state_carries_across_nodes() {
        let message = parse_json("&cfirst||ttp:tip||second");
        assert_eq!(message.sections().len(), 2);
        let second = &message.sections()[1].contents()[0];
        assert_eq!(second.text(), "second");
        assert_eq!(second.colour(), Some(Colour::Red.rgb()));
    }

    #[test]
    fn tag_only_input_yields_an_empty_message() {
        let message = parse_json("ttp:orphan||url:https://example.invalid");
        assert!(message.is_empty());
        assert!(message.sections().is_empty());
    }
}
