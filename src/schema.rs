//! Declarative node specifications shared by every conversion path.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrDefault {
    Int(i64),
    Str(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrSpec {
    pub name: &'static str,
    pub default: AttrDefault,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeSpec {
    pub name: &'static str,
    /// Content expression, e.g. `inline*`.
    pub content: &'static str,
    /// Group the node belongs to, e.g. `block`.
    pub group: &'static str,
    /// A selection that starts inside this node stays anchored to it for
    /// block-type operations.
    pub defining: bool,
    pub attrs: &'static [AttrSpec],
}

impl NodeSpec {
    pub fn is_textblock(&self) -> bool {
        self.group == "block" && self.content.starts_with("inline")
    }

    pub fn attr(&self, name: &str) -> Option<&AttrSpec> {
        self.attrs.iter().find(|attr| attr.name == name)
    }
}

pub const HEADING: NodeSpec = NodeSpec {
    name: "heading",
    content: "inline*",
    group: "block",
    defining: true,
    attrs: &[
        AttrSpec {
            name: "id",
            default: AttrDefault::Str(""),
        },
        AttrSpec {
            name: "level",
            default: AttrDefault::Int(1),
        },
    ],
};

pub const PARAGRAPH: NodeSpec = NodeSpec {
    name: "paragraph",
    content: "inline*",
    group: "block",
    defining: false,
    attrs: &[],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heading::HeadingAttrs;

    #[test]
    fn test_heading_spec_shape() {
        assert!(HEADING.is_textblock());
        assert!(HEADING.defining);
        assert_eq!(HEADING.group, "block");
        assert_eq!(HEADING.content, "inline*");
    }

    #[test]
    fn test_heading_defaults_match_attrs_default() {
        let defaults = HeadingAttrs::default();
        assert_eq!(
            HEADING.attr("level").map(|attr| attr.default),
            Some(AttrDefault::Int(i64::from(defaults.level.get())))
        );
        assert_eq!(
            HEADING.attr("id").map(|attr| attr.default),
            Some(AttrDefault::Str(""))
        );
        assert!(defaults.id.is_empty());
    }
}
