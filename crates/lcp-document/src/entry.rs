//! Execution entries: which lifecycle event triggers which executor class

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use xmltree::Element;

use crate::tags::{CLASS_ATTR, FOR_EVENT_ATTR};

/// `(forEvent, class)` pair carried by an `execution` element
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecutionEntry {
    /// Lifecycle event name, e.g. `Publish`
    pub for_event: String,
    /// Fully qualified executor class
    pub class: String,
}

impl ExecutionEntry {
    /// Create a new entry
    #[inline]
    #[must_use]
    pub fn new(for_event: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            for_event: for_event.into(),
            class: class.into(),
        }
    }

    /// Read an entry from an `execution` element; missing attributes read as empty
    #[must_use]
    pub(crate) fn from_element(element: &Element) -> Self {
        let attr = |name: &str| element.attributes.get(name).cloned().unwrap_or_default();
        Self {
            for_event: attr(FOR_EVENT_ATTR),
            class: attr(CLASS_ATTR),
        }
    }
}

impl Display for ExecutionEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.for_event, self.class)
    }
}

/// An execution entry together with the id of its enclosing `state`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatedExecution {
    /// Id of the nearest enclosing `state`, if any
    pub state: Option<String>,
    /// The entry itself
    #[serde(flatten)]
    pub entry: ExecutionEntry,
}
