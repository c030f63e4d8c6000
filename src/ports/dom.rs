// src/ports/dom.rs
//! In-memory model of the page: a flat set of elements addressed by id.
//!
//! Components write into elements the way the browser script wrote into the
//! DOM (`textContent`, `innerHTML`, `style.width`, `classList`); the HTML
//! presenter turns the document into markup.

use crate::domain::{Category, DomainError, Mission};
use serde::Serialize;
use std::collections::BTreeMap;

pub const HEADER: &str = "header";
pub const HAMBURGER_BUTTON: &str = "hamburger-btn";
pub const NAV_MENU: &str = "nav-menu";
pub const QUIZ_CONTAINER: &str = "quiz-container";
pub const SEARCH_FORM: &str = "exoplanet-search-form";
pub const SEARCH_RESULTS: &str = "search-results";

/// Sections reachable from the navigation menu
pub const SECTIONS: [&str; 3] = ["missions", "quiz", "catalog"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Content {
    Empty,
    /// Plain text, escaped on render
    Text(String),
    /// Trusted markup, rendered as-is
    Html(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub id: String,
    pub tag: String,
    classes: Vec<String>,
    width_percent: Option<f64>,
    content: Content,
}

impl Element {
    pub fn new(tag: &str, id: &str) -> Self {
        Self {
            id: id.to_string(),
            tag: tag.to_string(),
            classes: Vec::new(),
            width_percent: None,
            content: Content::Empty,
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub fn with_html(mut self, html: &str) -> Self {
        self.set_html(html);
        self
    }

    pub fn set_text(&mut self, text: &str) {
        self.content = Content::Text(text.to_string());
    }

    pub fn set_html(&mut self, html: &str) {
        self.content = Content::Html(html.to_string());
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Text or markup as stored, without escaping
    pub fn raw_content(&self) -> &str {
        match &self.content {
            Content::Empty => "",
            Content::Text(s) | Content::Html(s) => s,
        }
    }

    pub fn set_width_percent(&mut self, percent: f64) {
        self.width_percent = Some(percent);
    }

    pub fn width_percent(&self) -> Option<f64> {
        self.width_percent
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Returns whether the class is present afterwards.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: BTreeMap<String, Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// The exoseeker landing page with every element the components expect.
    pub fn landing_page() -> Self {
        let mut doc = Self::new();
        doc.insert(Element::new("header", HEADER));
        doc.insert(Element::new("button", HAMBURGER_BUTTON).with_class("hamburger").with_text("☰"));
        doc.insert(
            Element::new("nav", NAV_MENU).with_class("nav-menu").with_html(
                &SECTIONS
                    .iter()
                    .map(|s| format!(r##"<a href="#{s}">{}</a>"##, capitalize(s)))
                    .collect::<String>(),
            ),
        );
        for section in SECTIONS {
            doc.insert(Element::new("section", section));
        }
        for mission in Mission::ALL {
            for category in Category::ALL {
                doc.insert(
                    Element::new("span", &category.value_element_id(mission))
                        .with_class("stat-value")
                        .with_text("0 %"),
                );
                doc.insert(
                    Element::new("div", &category.bar_element_id(mission)).with_class("stat-bar"),
                );
            }
        }
        doc.insert(Element::new("div", QUIZ_CONTAINER).with_class("quiz-container"));
        doc.insert(Element::new("form", SEARCH_FORM).with_class("search-form"));
        doc.insert(Element::new("div", SEARCH_RESULTS).with_class("search-results"));
        doc
    }

    pub fn insert(&mut self, element: Element) {
        self.elements.insert(element.id.clone(), element);
    }

    pub fn remove(&mut self, id: &str) -> Option<Element> {
        self.elements.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn require(&self, id: &str) -> Result<&Element, DomainError> {
        self.elements
            .get(id)
            .ok_or_else(|| DomainError::MissingElement(id.to_string()))
    }

    pub fn require_mut(&mut self, id: &str) -> Result<&mut Element, DomainError> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| DomainError::MissingElement(id.to_string()))
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_landing_page_when_building_then_contains_every_mission_element() {
        let doc = Document::landing_page();

        for mission in Mission::ALL {
            for category in Category::ALL {
                assert!(doc.contains(&category.value_element_id(mission)));
                assert!(doc.contains(&category.bar_element_id(mission)));
            }
        }
        assert!(doc.contains(QUIZ_CONTAINER));
        assert!(doc.contains(SEARCH_RESULTS));
    }

    #[test]
    fn given_missing_id_when_requiring_then_returns_missing_element() {
        let doc = Document::new();

        let result = doc.require(QUIZ_CONTAINER);

        assert!(matches!(result, Err(DomainError::MissingElement(id)) if id == QUIZ_CONTAINER));
    }

    #[test]
    fn given_element_when_toggling_class_twice_then_restores_original_state() {
        let mut el = Element::new("nav", NAV_MENU);

        assert!(el.toggle_class("open"));
        assert!(el.has_class("open"));
        assert!(!el.toggle_class("open"));
        assert!(el.classes().is_empty());
    }

    #[test]
    fn given_text_then_html_when_setting_content_then_last_write_wins() {
        let mut el = Element::new("div", QUIZ_CONTAINER);
        el.set_text("Loading");
        el.set_html("<h2>Final Result</h2>");

        assert_eq!(el.content(), &Content::Html("<h2>Final Result</h2>".to_string()));
    }
}
