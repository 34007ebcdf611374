//! Parsed lifecycle document and scoped traversal
//!
//! The tree is held as an [`xmltree::Element`]. Traversal is scoped: `state`
//! elements are found by walking the tree, their `data` section is the first
//! `data` element in the state's subtree, and the executions of a section are
//! its direct `execution` children.

use xmltree::{Element, EmitterConfig, XMLNode};

use crate::entry::{ExecutionEntry, LocatedExecution};
use crate::error::DocumentError;
use crate::hash::ContentHash;
use crate::tags::{CLASS_ATTR, DATA_TAG, EXECUTION_TAG, FOR_EVENT_ATTR, ID_ATTR, STATE_TAG};

/// Default upper bound on accepted input (1 MiB)
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 1024 * 1024;

/// Namespace artifact some serializers leave on re-parented elements
const EMPTY_NAMESPACE_DECL: &str = "xmlns=\"\"";

/// Declaration written ahead of every serialized document
const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Parsed lifecycle configuration (SCXML state machine)
///
/// Comments and processing instructions around the root element are kept and
/// written back in place.
#[derive(Debug, Clone, PartialEq)]
pub struct LifecycleDocument {
    prolog: Vec<XMLNode>,
    root: Element,
    epilog: Vec<XMLNode>,
}

impl LifecycleDocument {
    /// Parse with the default size bound
    ///
    /// # Errors
    /// - `DocumentError::Malformed` if the input is not well-formed XML
    /// - `DocumentError::TooLarge` if the input exceeds [`DEFAULT_MAX_DOCUMENT_BYTES`]
    pub fn parse(xml: &str) -> Result<Self, DocumentError> {
        Self::parse_with_limit(xml, DEFAULT_MAX_DOCUMENT_BYTES)
    }

    /// Parse, rejecting input larger than `max_bytes`
    ///
    /// # Errors
    /// Same as [`LifecycleDocument::parse`]
    pub fn parse_with_limit(xml: &str, max_bytes: usize) -> Result<Self, DocumentError> {
        if xml.len() > max_bytes {
            return Err(DocumentError::TooLarge {
                size: xml.len(),
                max: max_bytes,
            });
        }
        let mut nodes = Element::parse_all(without_declaration(xml).as_bytes())
            .map_err(|e| DocumentError::Malformed(e.to_string()))?;

        let Some(root_idx) = nodes.iter().position(|n| matches!(n, XMLNode::Element(_))) else {
            return Err(DocumentError::Malformed("no root element".to_string()));
        };
        let epilog = nodes
            .split_off(root_idx + 1)
            .into_iter()
            .filter(is_outer_node)
            .collect();
        let Some(XMLNode::Element(root)) = nodes.pop() else {
            return Err(DocumentError::Malformed("no root element".to_string()));
        };
        let prolog = nodes.into_iter().filter(is_outer_node).collect();

        Ok(Self {
            prolog,
            root,
            epilog,
        })
    }

    /// Root element
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Serialize back to UTF-8 text
    ///
    /// Always starts with a UTF-8 declaration, whatever the input declared.
    /// Any `xmlns=""` left behind by the writer is stripped.
    ///
    /// # Errors
    /// `DocumentError::Transform` if the writer fails or emits invalid UTF-8
    pub fn to_xml_string(&self) -> Result<String, DocumentError> {
        let mut buf = Vec::new();
        let config = EmitterConfig::new()
            .perform_indent(true)
            .write_document_declaration(false);
        self.root
            .write_with_config(&mut buf, config)
            .map_err(|e| DocumentError::Transform(e.to_string()))?;
        let root = String::from_utf8(buf).map_err(|e| DocumentError::Transform(e.to_string()))?;

        let mut xml = String::from(XML_DECLARATION);
        for node in &self.prolog {
            xml.push('\n');
            push_outer_node(&mut xml, node);
        }
        xml.push('\n');
        xml.push_str(root.trim_start());
        for node in &self.epilog {
            xml.push('\n');
            push_outer_node(&mut xml, node);
        }
        Ok(strip_empty_namespace(&xml))
    }

    /// Hash of the serialized form
    ///
    /// # Errors
    /// Propagates serialization failures
    pub fn content_hash(&self) -> Result<ContentHash, DocumentError> {
        Ok(ContentHash::compute(self.to_xml_string()?.as_bytes()))
    }

    /// Ids of all `state` elements, in document order
    #[must_use]
    pub fn state_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        walk(&self.root, &mut |el: &Element| {
            if el.name == STATE_TAG {
                if let Some(id) = el.attributes.get(ID_ATTR) {
                    ids.push(id.clone());
                }
            }
        });
        ids
    }

    /// Every `execution` element in the document with its enclosing state
    #[must_use]
    pub fn executions(&self) -> Vec<LocatedExecution> {
        let mut out = Vec::new();
        collect_executions(&self.root, None, &mut out);
        out
    }

    /// Direct executions of the `data` section of every state with `state_id`
    #[must_use]
    pub fn data_executions(&self, state_id: &str) -> Vec<ExecutionEntry> {
        let mut out = Vec::new();
        walk(&self.root, &mut |el: &Element| {
            if is_state(el, state_id) {
                if let Some(data) = descendant_path(el, DATA_TAG).and_then(|p| element_at(el, &p)) {
                    out.extend(execution_children(data).map(ExecutionEntry::from_element));
                }
            }
        });
        out
    }

    /// Visit every `execution` element, wherever it sits in the tree
    pub fn for_each_execution_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(ExecutionElement<'_>),
    {
        walk_mut(&mut self.root, &mut |el: &mut Element| {
            if el.name == EXECUTION_TAG {
                f(ExecutionElement { element: el });
            }
        });
    }

    /// Visit the `data` section of every state whose id is `state_id`
    ///
    /// The callback receives `None` for a matching state that has no `data`
    /// element. Returns the number of matching states.
    pub fn for_each_state_data_mut<F>(&mut self, state_id: &str, mut f: F) -> usize
    where
        F: FnMut(Option<DataSection<'_>>),
    {
        let mut matched = 0;
        walk_mut(&mut self.root, &mut |el: &mut Element| {
            if is_state(el, state_id) {
                matched += 1;
                let data = match descendant_path(el, DATA_TAG) {
                    Some(path) => element_at_mut(el, &path),
                    None => None,
                };
                f(data.map(|element| DataSection { element }));
            }
        });
        matched
    }
}

/// Mutable view of one `execution` element
#[derive(Debug)]
pub struct ExecutionElement<'a> {
    element: &'a mut Element,
}

impl ExecutionElement<'_> {
    /// `forEvent` attribute
    #[must_use]
    pub fn for_event(&self) -> Option<&str> {
        self.element.attributes.get(FOR_EVENT_ATTR).map(String::as_str)
    }

    /// `class` attribute
    #[must_use]
    pub fn class(&self) -> Option<&str> {
        self.element.attributes.get(CLASS_ATTR).map(String::as_str)
    }

    /// Overwrite the `class` attribute
    pub fn set_class(&mut self, class: &str) {
        self.element
            .attributes
            .insert(CLASS_ATTR.to_string(), class.to_string());
    }
}

/// Mutable view of a state's `data` section
#[derive(Debug)]
pub struct DataSection<'a> {
    element: &'a mut Element,
}

impl DataSection<'_> {
    /// Direct `execution` children
    #[must_use]
    pub fn executions(&self) -> Vec<ExecutionEntry> {
        execution_children(&*self.element)
            .map(ExecutionEntry::from_element)
            .collect()
    }

    /// Append a new `execution` child
    ///
    /// The new element takes the namespace of the section so the writer does
    /// not need to undeclare the default namespace on it.
    pub fn append_execution(&mut self, entry: &ExecutionEntry) {
        let mut execution = Element::new(EXECUTION_TAG);
        execution.prefix.clone_from(&self.element.prefix);
        execution.namespace.clone_from(&self.element.namespace);
        execution.namespaces.clone_from(&self.element.namespaces);
        execution
            .attributes
            .insert(FOR_EVENT_ATTR.to_string(), entry.for_event.clone());
        execution
            .attributes
            .insert(CLASS_ATTR.to_string(), entry.class.clone());
        self.element.children.push(XMLNode::Element(execution));
    }

    /// Remove every direct `execution` child matching `pred`
    ///
    /// Matches are collected in one pass and removed afterwards. Returns the
    /// number removed.
    pub fn remove_executions<P>(&mut self, mut pred: P) -> usize
    where
        P: FnMut(&ExecutionEntry) -> bool,
    {
        let doomed: Vec<usize> = self
            .element
            .children
            .iter()
            .enumerate()
            .filter_map(|(idx, node)| match node {
                XMLNode::Element(el)
                    if el.name == EXECUTION_TAG && pred(&ExecutionEntry::from_element(el)) =>
                {
                    Some(idx)
                }
                _ => None,
            })
            .collect();
        for &idx in doomed.iter().rev() {
            self.element.children.remove(idx);
        }
        doomed.len()
    }
}

/// Remove `xmlns=""` declarations from serialized output
#[must_use]
pub fn strip_empty_namespace(xml: &str) -> String {
    xml.replace(&format!(" {EMPTY_NAMESPACE_DECL}"), "")
        .replace(EMPTY_NAMESPACE_DECL, "")
}

/// Skip the XML declaration
///
/// The input is already decoded text; a declared `encoding` must not be
/// applied to it a second time.
fn without_declaration(xml: &str) -> &str {
    let body = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let trimmed = body.trim_start();
    match trimmed.strip_prefix("<?xml") {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_whitespace()) => {
            rest.find("?>").map_or(body, |end| &rest[end + 2..])
        }
        _ => body,
    }
}

/// Nodes allowed outside the root element
fn is_outer_node(node: &XMLNode) -> bool {
    matches!(
        node,
        XMLNode::Comment(_) | XMLNode::ProcessingInstruction(..)
    )
}

fn push_outer_node(out: &mut String, node: &XMLNode) {
    match node {
        XMLNode::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        XMLNode::ProcessingInstruction(name, data) => {
            out.push_str("<?");
            out.push_str(name);
            if let Some(data) = data {
                out.push(' ');
                out.push_str(data);
            }
            out.push_str("?>");
        }
        _ => {}
    }
}

fn is_state(el: &Element, state_id: &str) -> bool {
    el.name == STATE_TAG
        && el
            .attributes
            .get(ID_ATTR)
            .is_some_and(|id| id.as_str() == state_id)
}

fn child_elements(el: &Element) -> impl Iterator<Item = &Element> {
    el.children.iter().filter_map(|node| match node {
        XMLNode::Element(child) => Some(child),
        _ => None,
    })
}

fn execution_children(el: &Element) -> impl Iterator<Item = &Element> {
    child_elements(el).filter(|child| child.name == EXECUTION_TAG)
}

fn walk<F: FnMut(&Element)>(el: &Element, f: &mut F) {
    f(el);
    for child in child_elements(el) {
        walk(child, f);
    }
}

fn walk_mut<F: FnMut(&mut Element)>(el: &mut Element, f: &mut F) {
    f(el);
    for node in &mut el.children {
        if let XMLNode::Element(child) = node {
            walk_mut(child, f);
        }
    }
}

fn collect_executions<'a>(
    el: &'a Element,
    state: Option<&'a str>,
    out: &mut Vec<LocatedExecution>,
) {
    let state = if el.name == STATE_TAG {
        el.attributes.get(ID_ATTR).map(String::as_str).or(state)
    } else {
        state
    };
    if el.name == EXECUTION_TAG {
        out.push(LocatedExecution {
            state: state.map(str::to_owned),
            entry: ExecutionEntry::from_element(el),
        });
    }
    for child in child_elements(el) {
        collect_executions(child, state, out);
    }
}

/// Child-index path to the first descendant named `name` (depth-first, document order)
fn descendant_path(el: &Element, name: &str) -> Option<Vec<usize>> {
    for (idx, node) in el.children.iter().enumerate() {
        if let XMLNode::Element(child) = node {
            if child.name == name {
                return Some(vec![idx]);
            }
            if let Some(mut rest) = descendant_path(child, name) {
                rest.insert(0, idx);
                return Some(rest);
            }
        }
    }
    None
}

fn element_at<'a>(el: &'a Element, path: &[usize]) -> Option<&'a Element> {
    let mut current = el;
    for &idx in path {
        current = match current.children.get(idx) {
            Some(XMLNode::Element(child)) => child,
            _ => return None,
        };
    }
    Some(current)
}

fn element_at_mut<'a>(el: &'a mut Element, path: &[usize]) -> Option<&'a mut Element> {
    let mut current = el;
    for &idx in path {
        current = match current.children.get_mut(idx) {
            Some(XMLNode::Element(child)) => child,
            _ => return None,
        };
    }
    Some(current)
}
