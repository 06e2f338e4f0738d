use crate::utils::error::{Result, SandboxError};
use std::collections::{BTreeMap, HashMap};

/// Index into the document arena. Handles stay valid for the lifetime of
/// the document; nodes are never removed from the arena, only detached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle(usize);

#[derive(Debug, Clone)]
enum NodeKind {
    Document,
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
struct ElementData {
    tag: String,
    attrs: HashMap<String, String>,
    styles: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<usize>,
    children: Vec<usize>,
    kind: NodeKind,
}

/// In-memory document tree with id-indexed lookup. Built at startup,
/// mutated through the facade methods, discarded at process end.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: usize,
    id_index: HashMap<String, usize>,
}

impl Document {
    pub fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            kind: NodeKind::Document,
        };
        Self {
            nodes: vec![root],
            root: 0,
            id_index: HashMap::new(),
        }
    }

    /// The tutorial page layout: navigation list, header section, image
    /// section and a named form. This is the host document the CLI demos
    /// run against.
    pub fn sample_page() -> Self {
        let mut doc = Self::new();
        let root = doc.root;

        let html = doc.append_element(root, "html", &[]);
        let head = doc.append_element(html, "head", &[]);
        let title = doc.append_element(head, "title", &[]);
        doc.append_text(title, "DOM Tutorial");

        let body = doc.append_element(html, "body", &[]);

        let nav = doc.append_element(body, "nav", &[("id", "navigation")]);
        let ul = doc.append_element(nav, "ul", &[("class", "parent-list")]);
        for label in ["Home", "About", "Contact"] {
            let li = doc.append_element(ul, "li", &[("class", "border-e")]);
            let link = doc.append_element(li, "a", &[("href", "#")]);
            doc.append_text(link, label);
        }

        let header = doc.append_element(body, "header", &[("id", "header-section-one")]);
        doc.append_text(header, "Welcome");

        let section = doc.append_element(body, "section", &[]);
        doc.append_element(
            section,
            "img",
            &[("id", "section-image"), ("src", "images/placeholder.jpg")],
        );

        let form = doc.append_element(body, "form", &[("name", "myForm")]);
        doc.append_element(form, "input", &[("name", "fname"), ("value", "")]);

        doc
    }

    fn append_node(&mut self, parent: usize, kind: NodeKind) -> usize {
        let index = self.nodes.len();
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            kind,
        });
        self.nodes[parent].children.push(index);
        index
    }

    fn append_element(&mut self, parent: usize, tag: &str, attrs: &[(&str, &str)]) -> usize {
        let attr_map: HashMap<String, String> = attrs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let index = self.append_node(
            parent,
            NodeKind::Element(ElementData {
                tag: tag.to_string(),
                attrs: attr_map,
                styles: BTreeMap::new(),
            }),
        );
        if let Some(id) = self.element(index).and_then(|e| e.attrs.get("id").cloned()) {
            // First occurrence wins, matching browser getElementById.
            self.id_index.entry(id).or_insert(index);
        }
        index
    }

    fn append_text(&mut self, parent: usize, text: &str) -> usize {
        self.append_node(parent, NodeKind::Text(text.to_string()))
    }

    fn element(&self, index: usize) -> Option<&ElementData> {
        match &self.nodes[index].kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    fn element_mut(&mut self, index: usize) -> Option<&mut ElementData> {
        match &mut self.nodes[index].kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    fn document_order(&self) -> Vec<usize> {
        let mut order = Vec::new();
        let mut stack = vec![self.root];
        while let Some(index) = stack.pop() {
            order.push(index);
            for child in self.nodes[index].children.iter().rev() {
                stack.push(*child);
            }
        }
        order
    }

    pub fn find_by_id(&self, id: &str) -> Option<ElementHandle> {
        self.id_index.get(id).copied().map(ElementHandle)
    }

    pub fn find_by_class(&self, class_name: &str) -> Vec<ElementHandle> {
        self.document_order()
            .into_iter()
            .filter(|index| {
                self.element(*index)
                    .and_then(|e| e.attrs.get("class"))
                    .map(|classes| classes.split_whitespace().any(|c| c == class_name))
                    .unwrap_or(false)
            })
            .map(ElementHandle)
            .collect()
    }

    pub fn find_by_tag(&self, tag: &str) -> Vec<ElementHandle> {
        self.document_order()
            .into_iter()
            .filter(|index| {
                self.element(*index)
                    .map(|e| e.tag.eq_ignore_ascii_case(tag))
                    .unwrap_or(false)
            })
            .map(ElementHandle)
            .collect()
    }

    pub fn body(&self) -> Option<ElementHandle> {
        self.find_by_tag("body").into_iter().next()
    }

    pub fn title(&self) -> Option<String> {
        self.find_by_tag("title")
            .into_iter()
            .next()
            .map(|handle| self.text_of(handle))
    }

    pub fn images(&self) -> Vec<ElementHandle> {
        self.find_by_tag("img")
    }

    pub fn links(&self) -> Vec<ElementHandle> {
        self.find_by_tag("a")
    }

    pub fn forms(&self) -> Vec<ElementHandle> {
        self.find_by_tag("form")
    }

    fn require(handle: Option<ElementHandle>) -> Result<ElementHandle> {
        handle.ok_or_else(|| SandboxError::ElementNotFound {
            selector: "absent element handle".to_string(),
        })
    }

    /// Replaces the element's children with a single text node. Absent
    /// handles short-circuit; the tree is untouched.
    pub fn set_text(&mut self, handle: Option<ElementHandle>, text: &str) -> Result<()> {
        let ElementHandle(index) = Self::require(handle)?;
        if self.element(index).is_none() {
            return Err(SandboxError::ElementNotFound {
                selector: "handle does not reference an element".to_string(),
            });
        }
        self.nodes[index].children.clear();
        self.append_text(index, text);
        Ok(())
    }

    pub fn set_attribute(
        &mut self,
        handle: Option<ElementHandle>,
        key: &str,
        value: &str,
    ) -> Result<()> {
        let ElementHandle(index) = Self::require(handle)?;
        let Some(element) = self.element_mut(index) else {
            return Err(SandboxError::ElementNotFound {
                selector: "handle does not reference an element".to_string(),
            });
        };
        let previous = element.attrs.insert(key.to_string(), value.to_string());
        if key == "id" {
            if let Some(old_id) = previous {
                if self.id_index.get(&old_id) == Some(&index) {
                    self.id_index.remove(&old_id);
                }
            }
            self.id_index.entry(value.to_string()).or_insert(index);
        }
        Ok(())
    }

    pub fn set_style(
        &mut self,
        handle: Option<ElementHandle>,
        property: &str,
        value: &str,
    ) -> Result<()> {
        let ElementHandle(index) = Self::require(handle)?;
        let Some(element) = self.element_mut(index) else {
            return Err(SandboxError::ElementNotFound {
                selector: "handle does not reference an element".to_string(),
            });
        };
        element
            .styles
            .insert(property.to_string(), value.to_string());
        Ok(())
    }

    pub fn attribute(&self, handle: ElementHandle, key: &str) -> Option<&str> {
        self.element(handle.0)
            .and_then(|e| e.attrs.get(key))
            .map(String::as_str)
    }

    pub fn style(&self, handle: ElementHandle, property: &str) -> Option<&str> {
        self.element(handle.0)
            .and_then(|e| e.styles.get(property))
            .map(String::as_str)
    }

    pub fn tag_name(&self, handle: ElementHandle) -> Option<&str> {
        self.element(handle.0).map(|e| e.tag.as_str())
    }

    /// Concatenated descendant text, in document order.
    pub fn text_of(&self, handle: ElementHandle) -> String {
        let mut text = String::new();
        let mut stack = vec![handle.0];
        let mut collected = Vec::new();
        while let Some(index) = stack.pop() {
            if let NodeKind::Text(t) = &self.nodes[index].kind {
                collected.push(t.clone());
            }
            for child in self.nodes[index].children.iter().rev() {
                stack.push(*child);
            }
        }
        for (i, part) in collected.iter().enumerate() {
            if i > 0 {
                text.push(' ');
            }
            text.push_str(part);
        }
        text
    }

    /// `document.forms['name']['field'].value` as a typed lookup chain.
    pub fn form_value(&self, form_name: &str, field_name: &str) -> Result<String> {
        let form = self
            .forms()
            .into_iter()
            .find(|handle| self.attribute(*handle, "name") == Some(form_name))
            .ok_or_else(|| SandboxError::ElementNotFound {
                selector: format!("form[name={}]", form_name),
            })?;

        let field = self
            .descendants(form)
            .into_iter()
            .find(|handle| self.attribute(*handle, "name") == Some(field_name))
            .ok_or_else(|| SandboxError::ElementNotFound {
                selector: format!("form[name={}] input[name={}]", form_name, field_name),
            })?;

        Ok(self
            .attribute(field, "value")
            .unwrap_or_default()
            .to_string())
    }

    fn descendants(&self, handle: ElementHandle) -> Vec<ElementHandle> {
        let mut result = Vec::new();
        let mut stack: Vec<usize> = self.nodes[handle.0].children.clone();
        while let Some(index) = stack.pop() {
            if self.element(index).is_some() {
                result.push(ElementHandle(index));
            }
            for child in self.nodes[index].children.iter().rev() {
                stack.push(*child);
            }
        }
        result
    }

    pub fn element_count(&self) -> usize {
        self.document_order()
            .into_iter()
            .filter(|index| self.element(*index).is_some())
            .count()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
