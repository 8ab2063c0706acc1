//! HTML text ⇄ [`DomNode`] via html5ever and its reference-counted DOM.

use super::{DomAttrs, DomNode, Namespace};
use html5ever::tendril::TendrilSink;
use html5ever::{
    Attribute, LocalName, QualName, ns, parse_document, serialize, serialize::SerializeOpts,
    serialize::TraversalScope,
};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("HTML serialization failed: {0}")]
    Serialize(#[from] std::io::Error),
    #[error("HTML output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("cannot render a {0} as HTML")]
    Unsupported(String),
}

/// Parses an HTML document or fragment and returns the children of `<body>`.
pub fn parse_html(input: &str) -> Vec<DomNode> {
    let dom = parse_document(RcDom::default(), Default::default()).one(input);
    match find_element(&dom.document, "body") {
        Some(body) => convert_children(&body),
        None => Vec::new(),
    }
}

/// Serializes nodes as HTML, each including its own tag.
pub fn to_html(nodes: &[DomNode]) -> Result<String, RenderError> {
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    let mut output = Vec::new();
    for node in nodes {
        let handle = to_handle(node)?;
        let serializable = SerializableHandle::from(handle);
        serialize(&mut output, &serializable, opts.clone())?;
    }
    Ok(String::from_utf8(output)?)
}

fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    if let NodeData::Element { name, .. } = &handle.data {
        if &*name.local == tag {
            return Some(handle.clone());
        }
    }
    handle
        .children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, tag))
}

fn convert_children(handle: &Handle) -> Vec<DomNode> {
    handle
        .children
        .borrow()
        .iter()
        .filter_map(convert)
        .collect()
}

fn convert(handle: &Handle) -> Option<DomNode> {
    match &handle.data {
        NodeData::Element { name, attrs, .. } => {
            let attrs: DomAttrs = attrs
                .borrow()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect();
            Some(DomNode::Element {
                namespace: namespace_of(&name.ns),
                tag: name.local.to_string(),
                attrs,
                children: convert_children(handle),
            })
        }
        NodeData::Text { contents } => Some(DomNode::Text(contents.borrow().to_string())),
        NodeData::Comment { contents } => Some(DomNode::Comment(contents.to_string())),
        NodeData::ProcessingInstruction { target, contents } => {
            Some(DomNode::ProcessingInstruction {
                target: target.to_string(),
                data: contents.to_string(),
            })
        }
        NodeData::Doctype { name, .. } => Some(DomNode::Doctype {
            name: name.to_string(),
        }),
        NodeData::Document => None,
    }
}

fn namespace_of(ns: &html5ever::Namespace) -> Namespace {
    if *ns == ns!(html) {
        Namespace::Html
    } else if *ns == ns!(svg) {
        Namespace::Svg
    } else if *ns == ns!(mathml) {
        Namespace::MathMl
    } else {
        Namespace::Other(ns.to_string())
    }
}

fn namespace_atom(namespace: &Namespace) -> html5ever::Namespace {
    match namespace {
        Namespace::Html => ns!(html),
        Namespace::Svg => ns!(svg),
        Namespace::MathMl => ns!(mathml),
        Namespace::Other(uri) => html5ever::Namespace::from(uri.as_str()),
    }
}

fn to_handle(node: &DomNode) -> Result<Handle, RenderError> {
    match node {
        DomNode::Element {
            namespace,
            tag,
            attrs,
            children,
        } => {
            let element = create_element(namespace, tag, attrs);
            for child in children {
                let child = to_handle(child)?;
                element.children.borrow_mut().push(child);
            }
            Ok(element)
        }
        DomNode::Text(text) => Ok(create_node(NodeData::Text {
            contents: RefCell::new(text.clone().into()),
        })),
        DomNode::Comment(text) => Ok(create_node(NodeData::Comment {
            contents: text.clone().into(),
        })),
        other => Err(RenderError::Unsupported(other.kind_name())),
    }
}

fn create_element(namespace: &Namespace, tag: &str, attrs: &DomAttrs) -> Handle {
    let attributes = attrs
        .iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name.as_str())),
            value: value.clone().into(),
        })
        .collect();

    create_node(NodeData::Element {
        name: QualName::new(None, namespace_atom(namespace), LocalName::from(tag)),
        attrs: RefCell::new(attributes),
        template_contents: Default::default(),
        mathml_annotation_xml_integration_point: false,
    })
}

fn create_node(data: NodeData) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_html_keeps_body_children() {
        let nodes = parse_html("<h2 id=\"intro\">Intro</h2><p>Body</p>");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].node_name(), Some("h2"));
        assert_eq!(nodes[0].attr("id"), Some("intro"));
        assert_eq!(nodes[1].text_content(), "Body");
    }

    #[test]
    fn test_to_html_escapes_attributes() {
        let mut attrs = DomAttrs::new();
        attrs.insert("id".to_string(), "a\"b".to_string());
        let html = to_html(&[DomNode::element("h1", attrs, vec![DomNode::text("x < y")])]).unwrap();
        assert_eq!(html, "<h1 id=\"a&quot;b\">x &lt; y</h1>");
    }

    #[test]
    fn test_doctype_is_not_renderable() {
        let result = to_html(&[DomNode::Doctype {
            name: "html".to_string(),
        }]);
        assert!(matches!(result, Err(RenderError::Unsupported(_))));
    }
}
