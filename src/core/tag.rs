//! Purpose: Classify `||`-delimited nodes by their four-character action prefix.
//! Exports: `JsonTag`.
//! Role: Routing table for the JSON-tag micro-format parser.
//! Invariants: Prefixes are exactly four bytes including the colon, case-insensitive.
//! Invariants: Unrecognized or too-short nodes classify as `None`, never an error.

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum JsonTag {
    /// Plain text node; opens a new section.
    None,
    /// `ttp:` tooltip (hover).
    Ttp,
    /// `url:` open-URL click.
    Url,
    /// `cmd:` run-command click.
    Cmd,
    /// `sgt:` suggest-command click.
    Sgt,
    /// `ins:` shift-click insertion.
    Ins,
}

impl JsonTag {
    pub fn get_for(node: &str) -> Self {
        let Some(prefix) = node.as_bytes().get(..4) else {
            return Self::None;
        };
        if prefix.eq_ignore_ascii_case(b"ttp:") {
            Self::Ttp
        } else if prefix.eq_ignore_ascii_case(b"url:") {
            Self::Url
        } else if prefix.eq_ignore_ascii_case(b"cmd:") {
            Self::Cmd
        } else if prefix.eq_ignore_ascii_case(b"sgt:") {
            Self::Sgt
        } else if prefix.eq_ignore_ascii_case(b"ins:") {
            Self::Ins
        } else {
            Self::None
        }
    }

    /// The node text with the tag prefix removed. Identity for `None`.
    pub fn value<'a>(self, node: &'a str) -> &'a str {
        match self {
            Self::None => node,
            _ => &node[4..],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::JsonTag;

    #[test]
    fn recognized_prefixes_route() {
        assert_eq!(JsonTag::get_for("ttp:hello"), JsonTag::Ttp);
        assert_eq!(JsonTag::get_for("url:https://example.invalid"), JsonTag::Url);
        assert_eq!(JsonTag::get_for("cmd:/spawn"), JsonTag::Cmd);
        assert_eq!(JsonTag::get_for("sgt:/msg "), JsonTag::Sgt);
        assert_eq!(JsonTag::get_for("ins:name"), JsonTag::Ins);
    }

    #[test]
    fn prefix_match_is_case_insensitive() {
        assert_eq!(JsonTag::get_for("TTP:hello"), JsonTag::Ttp);
        assert_eq!(JsonTag::get_for("Url:x"), JsonTag::Url);
    }

    #[test]
    fn unrecognized_and_short_nodes_are_none() {
        assert_eq!(JsonTag::get_for("xyz:hello"), JsonTag::None);
        assert_eq!(JsonTag::get_for("ttp"), JsonTag::None);
        assert_eq!(JsonTag::get_for(""), JsonTag::None);
        // Colon position matters: the prefix is exactly four characters.
        assert_eq!(JsonTag::get_for("ttp :x"), JsonTag::None);
    }

    #[test]
    fn value_strips_only_recognized_prefixes() {
        assert_eq!(JsonTag::Ttp.value("ttp:hello"), "hello");
        assert_eq!(JsonTag::None.value("plain"), "plain");
        assert_eq!(JsonTag::Ins.value("ins:"), "");
    }

    #[test]
    fn multibyte_text_never_panics_classification() {
        assert_eq!(JsonTag::get_for("héllo"), JsonTag::None);
        assert_eq!(JsonTag::get_for("é"), JsonTag::None);
    }
}
