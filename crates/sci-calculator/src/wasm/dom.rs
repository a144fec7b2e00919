//! Mock DOM for browser-shell testing
//!
//! Mirrors the calculator page closely enough to test the browser shell without
//! a browser: a `#display` element carrying the `error` class in the Error
//! state, a `#history` line, a `#tape` list and one button per keypad entry,
//! with `active` on whichever of `#btn-deg`/`#btn-rad` is selected.

use std::collections::HashMap;

use crate::core::history::TapeEntry;
use crate::core::AngleMode;
use crate::display::{DisplayFrame, DisplaySink};
use crate::keypad::{element_id, Keypad, KeypadAction};

/// Id of the primary display element
pub const DISPLAY_ID: &str = "display";
/// Id of the history line element
pub const HISTORY_ID: &str = "history";
/// Id of the tape list element
pub const TAPE_ID: &str = "tape";
/// Class applied to the display in the Error state
pub const ERROR_CLASS: &str = "error";
/// Class applied to the selected angle-mode button
pub const ACTIVE_CLASS: &str = "active";

/// Represents a DOM element for testing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Child elements
    pub children: Vec<DomElement>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Sets text content
    pub fn set_text(&mut self, text: &str) {
        self.text_content = text.to_string();
    }

    /// Adds a class
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Removes a class
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Adds or removes a class, like `classList.toggle(class, force)`
    pub fn toggle_class(&mut self, class: &str, force: bool) {
        if force {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// DOM events the calculator page reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click event on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Key press event
    KeyPress {
        /// The key that was pressed, as `KeyboardEvent.key`
        key: String,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates a key press event
    #[must_use]
    pub fn key_press(key: &str) -> Self {
        Self::KeyPress {
            key: key.to_string(),
        }
    }
}

/// Mock DOM for testing the browser shell without a browser
#[derive(Debug, Default)]
pub struct MockDom {
    elements: HashMap<String, DomElement>,
    event_history: Vec<DomEvent>,
    render_count: usize,
}

impl MockDom {
    /// Creates an empty mock DOM
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the calculator page for a keypad
    #[must_use]
    pub fn calculator(keypad: &Keypad) -> Self {
        let mut dom = Self::new();

        dom.register_element(
            DomElement::new("div")
                .with_id(DISPLAY_ID)
                .with_class("display")
                .with_text("0"),
        );
        dom.register_element(
            DomElement::new("div")
                .with_id(HISTORY_ID)
                .with_class("history"),
        );
        dom.register_element(DomElement::new("ul").with_id(TAPE_ID).with_class("tape"));

        for btn in keypad.buttons() {
            let mut elem = DomElement::new("button")
                .with_id(&btn.id)
                .with_text(&btn.action.label())
                .with_class("keypad-btn")
                .with_attr("data-row", &btn.row.to_string())
                .with_attr("data-col", &btn.col.to_string());
            if btn.action == KeypadAction::SetAngle(AngleMode::default()) {
                elem.add_class(ACTIVE_CLASS);
            }
            dom.register_element(elem);
        }

        dom
    }

    /// Registers an element for ID lookup
    pub fn register_element(&mut self, element: DomElement) {
        if !element.id.is_empty() {
            self.elements.insert(element.id.clone(), element);
        }
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Gets a mutable element by ID
    pub fn get_element_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        self.elements.get_mut(id)
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// Checks whether an element carries a class
    #[must_use]
    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.elements.get(id).is_some_and(|e| e.has_class(class))
    }

    /// Records an event
    pub fn dispatch_event(&mut self, event: DomEvent) {
        self.event_history.push(event);
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Number of frames rendered so far
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    /// Replaces the tape list with `entries`, newest first
    pub fn render_tape<'a>(&mut self, entries: impl Iterator<Item = &'a TapeEntry>) {
        if let Some(tape) = self.elements.get_mut(TAPE_ID) {
            tape.children = entries
                .map(|entry| DomElement::new("li").with_text(&entry.display()))
                .collect();
        }
    }

    /// Text of each tape list item
    #[must_use]
    pub fn tape_items(&self) -> Vec<&str> {
        self.elements
            .get(TAPE_ID)
            .map(|tape| {
                tape.children
                    .iter()
                    .map(|li| li.text_content.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn set_text(&mut self, id: &str, text: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.set_text(text);
        }
    }

    fn toggle_class(&mut self, id: &str, class: &str, force: bool) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.toggle_class(class, force);
        }
    }
}

impl DisplaySink for MockDom {
    fn render(&mut self, frame: &DisplayFrame) {
        self.set_text(DISPLAY_ID, &frame.primary);
        self.toggle_class(DISPLAY_ID, ERROR_CLASS, frame.error);
        self.set_text(HISTORY_ID, &frame.history);
        for mode in [AngleMode::Deg, AngleMode::Rad] {
            let id = element_id(KeypadAction::SetAngle(mode));
            self.toggle_class(&id, ACTIVE_CLASS, frame.angle_mode == mode);
        }
        self.render_count += 1;
    }
}
