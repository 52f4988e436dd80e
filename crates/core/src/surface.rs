//! Presentational page surface the catalog widgets operate on.
//!
//! The filter never reaches into ambient page state. It is handed a
//! [`CatalogSurface`] and resolves the elements it needs through it, so the
//! same widget drives a browser document, a terminal session, or the
//! in-memory [`MemorySurface`] used by the CLI and tests.

use serde::Serialize;

/// Opaque reference to one element on a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementHandle(usize);

/// Layout mode of a container element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Display {
    #[default]
    Grid,
    None,
}

pub trait CatalogSurface {
    fn element_by_id(&self, id: &str) -> Option<ElementHandle>;

    /// Elements carrying `class`, in document order.
    fn elements_by_class(&self, class: &str) -> Vec<ElementHandle>;

    fn attribute(&self, element: ElementHandle, name: &str) -> Option<&str>;

    /// Current value of an input element.
    fn value(&self, element: ElementHandle) -> Option<&str>;

    fn set_value(&mut self, element: ElementHandle, value: &str);

    fn is_hidden(&self, element: ElementHandle) -> bool;

    fn set_hidden(&mut self, element: ElementHandle, hidden: bool);

    fn display(&self, element: ElementHandle) -> Display;

    fn set_display(&mut self, element: ElementHandle, display: Display);
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, String)>,
    pub value: Option<String>,
    pub hidden: bool,
    pub display: Display,
}

impl Element {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()), ..Self::default() }
    }

    pub fn with_class(class: impl Into<String>) -> Self {
        Self { classes: vec![class.into()], ..Self::default() }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn input(mut self) -> Self {
        self.value = Some(String::new());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// Flat in-memory element store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemorySurface {
    elements: Vec<Element>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: Element) -> ElementHandle {
        self.elements.push(element);
        ElementHandle(self.elements.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn get(&self, element: ElementHandle) -> Option<&Element> {
        self.elements.get(element.0)
    }

    fn get_mut(&mut self, element: ElementHandle) -> Option<&mut Element> {
        self.elements.get_mut(element.0)
    }
}

impl CatalogSurface for MemorySurface {
    fn element_by_id(&self, id: &str) -> Option<ElementHandle> {
        self.elements
            .iter()
            .position(|element| element.id.as_deref() == Some(id))
            .map(ElementHandle)
    }

    fn elements_by_class(&self, class: &str) -> Vec<ElementHandle> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, element)| element.classes.iter().any(|candidate| candidate == class))
            .map(|(index, _)| ElementHandle(index))
            .collect()
    }

    fn attribute(&self, element: ElementHandle, name: &str) -> Option<&str> {
        self.get(element)?
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn value(&self, element: ElementHandle) -> Option<&str> {
        self.get(element)?.value.as_deref()
    }

    fn set_value(&mut self, element: ElementHandle, value: &str) {
        if let Some(element) = self.get_mut(element) {
            element.value = Some(value.to_owned());
        }
    }

    fn is_hidden(&self, element: ElementHandle) -> bool {
        self.get(element).map(|element| element.hidden).unwrap_or(false)
    }

    fn set_hidden(&mut self, element: ElementHandle, hidden: bool) {
        if let Some(element) = self.get_mut(element) {
            element.hidden = hidden;
        }
    }

    fn display(&self, element: ElementHandle) -> Display {
        self.get(element).map(|element| element.display).unwrap_or_default()
    }

    fn set_display(&mut self, element: ElementHandle, display: Display) {
        if let Some(element) = self.get_mut(element) {
            element.display = display;
        }
    }
}
