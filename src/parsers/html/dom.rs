use std::cell::Cell;
use std::rc::Rc;

use html5ever::interface::{Attribute, QualName};
use html5ever::parse_document;
use html5ever::tendril::{format_tendril, StrTendril, TendrilSink};
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, StartTag, Tag, TagToken, Token, TokenSink, TokenSinkResult, Tokenizer,
};
use html5ever::tree_builder::create_element;
use html5ever::{namespace_url, ns, LocalName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parses an HTML string into a DOM
pub fn html_to_dom(html: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(html)
}

/// Records whether a start tag with the wanted name was tokenized
///
/// Text-only elements switch the tokenizer into the matching raw state, the
/// way the tree builder does, so markup inside `<script>`, `<title>` and the
/// like is never mistaken for a tag.
struct StartTagSink {
    wanted: LocalName,
    found: Cell<bool>,
}

impl TokenSink for StartTagSink {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            TagToken(Tag {
                kind: StartTag,
                name,
                ..
            }) => {
                if name == self.wanted {
                    self.found.set(true);
                }

                match &*name {
                    "script" => TokenSinkResult::RawData(RawKind::ScriptData),
                    "title" | "textarea" => TokenSinkResult::RawData(RawKind::Rcdata),
                    "style" | "xmp" | "iframe" | "noembed" | "noframes" | "noscript" => {
                        TokenSinkResult::RawData(RawKind::Rawtext)
                    }
                    "plaintext" => TokenSinkResult::Plaintext,
                    _ => TokenSinkResult::Continue,
                }
            }
            _ => TokenSinkResult::Continue,
        }
    }
}

/// Checks that the markup itself opens a `tag_name` element
///
/// The HTML5 tree builder synthesizes `<head>` and `<body>` when they are
/// missing, so the tree alone cannot tell whether the author wrote them.
/// Comments, attribute values and the text of script-like elements don't count.
pub fn has_explicit_tag(html: &str, tag_name: &str) -> bool {
    let sink = StartTagSink {
        wanted: LocalName::from(tag_name.to_ascii_lowercase()),
        found: Cell::new(false),
    };
    let tokenizer = Tokenizer::new(sink, Default::default());

    let input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(html));
    let _ = tokenizer.feed(&input);
    tokenizer.end();

    tokenizer.sink.found.get()
}

/// Finds the first node, depth-first and in document order, matching `predicate`
pub fn find_first_node<P>(node: &Handle, predicate: &P) -> Option<Handle>
where
    P: Fn(&Handle) -> bool,
{
    if predicate(node) {
        return Some(node.clone());
    }

    node.children
        .borrow()
        .iter()
        .find_map(|child| find_first_node(child, predicate))
}

/// Finds the first element with the given tag name, ignoring case
pub fn find_element_by_name(node: &Handle, node_name: &str) -> Option<Handle> {
    find_first_node(node, &|handle: &Handle| {
        get_node_name(handle).map_or(false, |name| name.eq_ignore_ascii_case(node_name))
    })
}

/// Tag name of an element, `None` for other nodes
pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// Value of the named attribute, if the node is an element carrying it
pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == attr_name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// Creates a detached element with attributes in the given order
pub fn create_tag(dom: &RcDom, tag_name: &str, attrs: &[(&str, &str)]) -> Handle {
    create_element(
        dom,
        QualName::new(None, ns!(html), LocalName::from(tag_name)),
        attrs
            .iter()
            .map(|(name, value)| Attribute {
                name: QualName::new(None, ns!(), LocalName::from(*name)),
                value: format_tendril!("{}", value),
            })
            .collect(),
    )
}

/// Appends `child` as the last child of `parent`
pub fn append_child(parent: &Handle, child: Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}
