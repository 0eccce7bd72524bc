//! Purpose: Convert between the message model and the vanilla chat-JSON wire shape.
//! Exports: `to_json`, `from_json`, `to_legacy`, `strip`.
//! Role: Platform-neutral boundary; what adapters would consume sits here as plain data.
//! Invariants: Palette colours serialize as wire names, anything else as `#rrggbb`.
//! Invariants: `from_json` ignores unknown fields; structural problems surface as `Parse` errors.
//! Invariants: Hover tooltips decode to plain components; nested actions are discarded by type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::component::ChatComponent;
use crate::core::emptyable::Emptyable;
use crate::core::error::{Error, ErrorKind};
use crate::core::format::{Colour, Rgb, Style, Styles};
use crate::core::message::{Message, SendableMessage};
use crate::core::section::{ClickKind, JsonClick, JsonHover, JsonInsertion, JsonSection};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireComponent {
    #[serde(default)]
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    obfuscated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    strikethrough: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    underlined: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    insertion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hover_event: Option<WireHover>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    click_event: Option<WireClick>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    extra: Vec<WireComponent>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
struct WireHover {
    action: String,
    value: Value,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
struct WireClick {
    action: String,
    value: String,
}

/// Vanilla chat-JSON for a message. A single-section, single-component
/// message collapses to one object; anything larger gets an empty-text root
/// with `extra` children.
pub fn to_json(message: &SendableMessage) -> Value {
    let mut wires: Vec<WireComponent> = message.sections().iter().map(wire_section).collect();
    let root = match wires.len() {
        0 => WireComponent::default(),
        1 => wires.remove(0),
        _ => WireComponent {
            extra: wires,
            ..WireComponent::default()
        },
    };
    serde_json::to_value(root).unwrap_or(Value::Null)
}

fn wire_section(section: &JsonSection) -> WireComponent {
    let mut components: Vec<WireComponent> = section
        .contents()
        .iter()
        .filter(|component| !component.is_empty())
        .map(wire_component)
        .collect();

    let mut wire = if components.len() == 1 {
        components.remove(0)
    } else {
        WireComponent {
            extra: components,
            ..WireComponent::default()
        }
    };

    if let Some(hover) = section.hover() {
        let tooltip: Vec<WireComponent> = hover
            .tooltip()
            .components()
            .iter()
            .map(wire_component)
            .collect();
        wire.hover_event = Some(WireHover {
            action: "show_text".to_string(),
            value: serde_json::to_value(tooltip).unwrap_or(Value::Null),
        });
    }
    if let Some(click) = section.click() {
        wire.click_event = Some(WireClick {
            action: click.kind().wire_name().to_string(),
            value: click.value().to_string(),
        });
    }
    if let Some(insertion) = section.insertion() {
        wire.insertion = Some(insertion.value().to_string());
    }
    wire
}

fn wire_component(component: &ChatComponent) -> WireComponent {
    let color = component.colour().map(|rgb| match Colour::from_rgb(rgb) {
        Some(named) => named.wire_name().to_string(),
        None => format!("#{}", rgb.hex()),
    });
    let styles = component.styles();
    let flag = |style: Style| styles.contains(style).then_some(true);
    WireComponent {
        text: component.text().to_string(),
        color,
        obfuscated: flag(Style::Obfuscated),
        bold: flag(Style::Bold),
        strikethrough: flag(Style::Strikethrough),
        underlined: flag(Style::Underline),
        italic: flag(Style::Italic),
        ..WireComponent::default()
    }
}

/// Tolerant inverse of [`to_json`]. Accepts an object, an array of
/// components, or a bare string. Hover/click/insertion and formatting
/// inherit into `extra` children the way clients resolve them.
pub fn from_json(value: &Value) -> Result<SendableMessage, Error> {
    let root: WireComponent = match value {
        Value::String(text) => {
            return Ok(Message::new(vec![ChatComponent::plain(text.clone())]).into_sendable());
        }
        Value::Array(_) => WireComponent {
            extra: decode_wire(value)?,
            ..WireComponent::default()
        },
        Value::Object(_) => {
            serde_json::from_value(value.clone()).map_err(malformed_chat_json)?
        }
        _ => {
            return Err(Error::new(ErrorKind::Parse)
                .with_message("chat JSON root must be an object, array, or string"));
        }
    };

    let mut sections = Vec::new();
    walk(&root, &Inherited::default(), &mut sections)?;
    Ok(SendableMessage::new(sections))
}

fn decode_wire(value: &Value) -> Result<Vec<WireComponent>, Error> {
    serde_json::from_value(value.clone()).map_err(malformed_chat_json)
}

fn malformed_chat_json(err: serde_json::Error) -> Error {
    Error::new(ErrorKind::Parse)
        .with_message("malformed chat JSON")
        .with_source(err)
}

/// Formatting and actions resolved so far along the `extra` chain.
#[derive(Clone, Default)]
struct Inherited {
    colour: Option<Rgb>,
    styles: Styles,
    hover: Option<JsonHover>,
    click: Option<JsonClick>,
    insertion: Option<JsonInsertion>,
}

fn walk(wire: &WireComponent, inherited: &Inherited, out: &mut Vec<JsonSection>) -> Result<(), Error> {
    let resolved = resolve(wire, inherited)?;

    let component = {
        let mut builder = ChatComponent::builder()
            .text(wire.text.clone())
            .styles(resolved.styles);
        if let Some(colour) = resolved.colour {
            builder = builder.colour(colour);
        }
        builder.build()
    };

    let mut section = JsonSection::builder().component(component);
    if let Some(hover) = &resolved.hover {
        section = section.hover(hover.clone());
    }
    if let Some(click) = &resolved.click {
        section = section.click(click.clone());
    }
    if let Some(insertion) = &resolved.insertion {
        section = section.insertion(insertion.clone());
    }
    out.push(section.build());

    for child in &wire.extra {
        walk(child, &resolved, out)?;
    }
    Ok(())
}

fn resolve(wire: &WireComponent, inherited: &Inherited) -> Result<Inherited, Error> {
    let colour = match wire.color.as_deref() {
        None => inherited.colour,
        Some("reset") => None,
        Some(name) => Some(decode_colour(name)?),
    };

    let mut styles = Styles::EMPTY;
    let flags = [
        (wire.obfuscated, Style::Obfuscated),
        (wire.bold, Style::Bold),
        (wire.strikethrough, Style::Strikethrough),
        (wire.underlined, Style::Underline),
        (wire.italic, Style::Italic),
    ];
    for (flag, style) in flags {
        if flag.unwrap_or(inherited.styles.contains(style)) {
            styles.insert(style);
        }
    }

    let hover = match &wire.hover_event {
        Some(hover) => Some(decode_hover(hover)?),
        None => inherited.hover.clone(),
    };
    let click = match &wire.click_event {
        Some(click) => Some(decode_click(click)?),
        None => inherited.click.clone(),
    };
    let insertion = wire
        .insertion
        .clone()
        .map(JsonInsertion::new)
        .or_else(|| inherited.insertion.clone());

    Ok(Inherited {
        colour,
        styles,
        hover,
        click,
        insertion,
    })
}

fn decode_colour(name: &str) -> Result<Rgb, Error> {
    if let Some(named) = Colour::from_wire_name(name) {
        return Ok(named.rgb());
    }
    Rgb::parse_hex(name).ok_or_else(|| {
        Error::new(ErrorKind::Parse)
            .with_message(format!("unknown colour `{name}`"))
            .with_hint("Expected a vanilla colour name or #rrggbb.")
    })
}

fn decode_hover(hover: &WireHover) -> Result<JsonHover, Error> {
    if hover.action != "show_text" {
        // Item and entity hovers belong to the game, not chat markup.
        return Err(Error::new(ErrorKind::Parse)
            .with_message(format!("unsupported hover action `{}`", hover.action)));
    }
    let components = match &hover.value {
        Value::String(text) => vec![ChatComponent::plain(text.clone())],
        Value::Array(_) => decode_wire(&hover.value)?
            .iter()
            .map(plain_component)
            .collect(),
        Value::Object(_) => vec![plain_component(&serde_json::from_value(
            hover.value.clone(),
        )
        .map_err(malformed_chat_json)?)],
        _ => {
            return Err(Error::new(ErrorKind::Parse)
                .with_message("hover value must be text or components"));
        }
    };
    Ok(JsonHover::new(Message::new(components)))
}

/// Tooltip contents keep their formatting; any nested actions fall away
/// because [`JsonHover`] holds a plain [`Message`].
fn plain_component(wire: &WireComponent) -> ChatComponent {
    let mut styles = Styles::EMPTY;
    let flags = [
        (wire.obfuscated, Style::Obfuscated),
        (wire.bold, Style::Bold),
        (wire.strikethrough, Style::Strikethrough),
        (wire.underlined, Style::Underline),
        (wire.italic, Style::Italic),
    ];
    for (flag, style) in flags {
        if flag.unwrap_or(false) {
            styles.insert(style);
        }
    }
    let mut builder = ChatComponent::builder().text(wire.text.clone()).styles(styles);
    if let Some(rgb) = wire.color.as_deref().and_then(|name| decode_colour(name).ok()) {
        builder = builder.colour(rgb);
    }
    builder.build()
}

fn decode_click(click: &WireClick) -> Result<JsonClick, Error> {
    let kind = ClickKind::from_wire_name(&click.action).ok_or_else(|| {
        Error::new(ErrorKind::Parse)
            .with_message(format!("unsupported click action `{}`", click.action))
    })?;
    Ok(JsonClick::new(kind, click.value.clone()))
}

/// Re-emit a plain message as legacy-coded text. Codes appear only at
/// formatting boundaries; no trailing reset is appended.
pub fn to_legacy(message: &Message, format_char: char) -> String {
    let mut out = String::new();
    let mut colour: Option<Rgb> = None;
    let mut styles = Styles::EMPTY;

    for component in message.components() {
        if component.is_empty() {
            continue;
        }
        let want_colour = component.colour();
        let want_styles = component.styles();
        let losing_styles = styles.iter().any(|style| !want_styles.contains(style));

        if want_colour.is_none() && (colour.is_some() || losing_styles) {
            out.push(format_char);
            out.push('r');
            colour = None;
            styles = Styles::EMPTY;
        } else if let Some(rgb) = want_colour {
            if colour != Some(rgb) || losing_styles {
                // A colour code also clears active styles.
                out.push(format_char);
                out.push(nearest_colour(rgb).code());
                colour = Some(rgb);
                styles = Styles::EMPTY;
            }
        }

        for style in want_styles.iter() {
            if !styles.contains(style) {
                out.push(format_char);
                out.push(style.code());
            }
        }
        styles = want_styles;
        out.push_str(component.text());
    }
    out
}

/// Exact palette match when possible, otherwise nearest by squared RGB
/// distance: legacy codes have no hex form.
fn nearest_colour(rgb: Rgb) -> Colour {
    if let Some(named) = Colour::from_rgb(rgb) {
        return named;
    }
    let (r, g, b) = rgb.bytes();
    let distance = |colour: &Colour| {
        let (cr, cg, cb) = colour.rgb().bytes();
        let dr = i32::from(r) - i32::from(cr);
        let dg = i32::from(g) - i32::from(cg);
        let db = i32::from(b) - i32::from(cb);
        dr * dr + dg * dg + db * db
    };
    Colour::ALL
        .into_iter()
        .min_by_key(distance)
        .unwrap_or(Colour::White)
}

/// Delete all formatting codes, keeping literal text (including class
/// members like `&p` that name no format).
pub fn strip(input: &str, format_char: char) -> String {
    crate::core::parse::parse_with(input, format_char).plain_text()
}
