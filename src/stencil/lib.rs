//! # Stencil - Named Markup Templates
//!
//! A small host for turning a component name plus a bag of attributes into
//! markup. Each component registers a template under its own name; rendering
//! looks the template up and feeds it the attributes as context.
//!
//! ```rust
//! use stencil::{Stencil, Styles};
//! use console::Style;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Heading {
//!     text: String,
//! }
//!
//! let styles = Styles::new().add("title", Style::new().bold());
//! let mut stencil = Stencil::with_color(styles, false);
//! stencil
//!     .add_template("Heading", r#"<h1>{{ text | style("title") }}</h1>"#)
//!     .unwrap();
//!
//! let out = stencil.render("Heading", &Heading { text: "Hi".into() }).unwrap();
//! assert_eq!(out, "<h1>Hi</h1>");
//! ```
//!
//! ## Filters
//!
//! - `style(name)`: wraps the value in the named `console::Style`. Unknown
//!   names get a visible marker (`(!?)` by default) so typos show up in output.
//! - `attrs`: renders a map as ` key="value"` pairs, sorted by key, for use
//!   inside an opening tag.
//!
//! Color is detected from stdout unless forced with [`Stencil::with_color`].

use console::{Style, Term};
use minijinja::value::ValueKind;
use minijinja::{Environment, Error, Value};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Marker prepended to text styled with an unregistered style name.
pub const DEFAULT_MISSING_STYLE_MARKER: &str = "(!?)";

/// Named terminal styles available to templates through the `style` filter.
#[derive(Clone)]
pub struct Styles {
    styles: HashMap<String, Style>,
    missing_marker: String,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            styles: HashMap::new(),
            missing_marker: DEFAULT_MISSING_STYLE_MARKER.to_string(),
        }
    }
}

impl Styles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the marker used for unknown style names. Empty disables it.
    pub fn missing_marker(mut self, marker: &str) -> Self {
        self.missing_marker = marker.to_string();
        self
    }

    /// Registers (or replaces) a named style.
    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    pub fn has(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Styles `text` with ANSI codes, or marks it when the name is unknown.
    pub fn apply(&self, name: &str, text: &str) -> String {
        match self.styles.get(name) {
            Some(style) => style.apply_to(text).to_string(),
            None => self.mark_missing(text),
        }
    }

    /// Same lookup as [`Styles::apply`] but never emits ANSI codes.
    pub fn apply_plain(&self, name: &str, text: &str) -> String {
        if self.styles.contains_key(name) {
            text.to_string()
        } else {
            self.mark_missing(text)
        }
    }

    fn mark_missing(&self, text: &str) -> String {
        if self.missing_marker.is_empty() {
            text.to_string()
        } else {
            format!("{} {}", self.missing_marker, text)
        }
    }
}

/// A set of named templates sharing one style registry.
pub struct Stencil {
    env: Environment<'static>,
    names: BTreeSet<String>,
    use_color: bool,
}

impl Stencil {
    /// Creates a stencil, enabling color when stdout supports it.
    pub fn new(styles: Styles) -> Self {
        let use_color = Term::stdout().features().colors_supported();
        Self::with_color(styles, use_color)
    }

    /// Creates a stencil with explicit color control.
    pub fn with_color(styles: Styles, use_color: bool) -> Self {
        let mut env = Environment::new();
        register_filters(&mut env, styles, use_color);
        Self {
            env,
            names: BTreeSet::new(),
            use_color,
        }
    }

    pub fn uses_color(&self) -> bool {
        self.use_color
    }

    /// Compiles and registers a template. Syntax errors surface here, not at render time.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<(), Error> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())?;
        self.names.insert(name.to_string());
        Ok(())
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Names of all registered templates, sorted.
    pub fn template_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Renders a registered template with `data` as its context.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, Error> {
        self.env.get_template(name)?.render(data)
    }

    /// Renders a one-off template source without registering it.
    pub fn render_str<T: Serialize>(&self, source: &str, data: &T) -> Result<String, Error> {
        self.env.render_str(source, data)
    }
}

fn register_filters(env: &mut Environment<'static>, styles: Styles, use_color: bool) {
    env.add_filter("style", move |value: Value, name: String| -> String {
        let text = value.to_string();
        if use_color {
            styles.apply(&name, &text)
        } else {
            styles.apply_plain(&name, &text)
        }
    });
    env.add_filter("attrs", attrs_filter);
}

fn attrs_filter(value: Value) -> Result<String, Error> {
    if value.kind() != ValueKind::Map {
        return Ok(String::new());
    }
    let mut pairs = Vec::new();
    for key in value.try_iter()? {
        let item = value.get_item(&key)?;
        pairs.push((key.to_string(), item.to_string()));
    }
    pairs.sort();
    Ok(pairs
        .into_iter()
        .map(|(k, v)| format!(" {}=\"{}\"", k, v.replace('"', "&quot;")))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn styles_start_empty() {
        let styles = Styles::new();
        assert!(styles.is_empty());
        assert_eq!(styles.len(), 0);
    }

    #[test]
    fn styles_add_and_has() {
        let styles = Styles::new().add("a", Style::new().red());
        assert!(styles.has("a"));
        assert!(!styles.has("b"));
    }

    #[test]
    fn unknown_style_is_marked() {
        let styles = Styles::new();
        assert_eq!(styles.apply_plain("nope", "text"), "(!?) text");
        assert_eq!(styles.apply("nope", "text"), "(!?) text");
    }

    #[test]
    fn empty_marker_is_silent() {
        let styles = Styles::new().missing_marker("");
        assert_eq!(styles.apply_plain("nope", "text"), "text");
    }

    #[test]
    fn known_style_emits_ansi_when_forced() {
        let styles = Styles::new().add("b", Style::new().bold().force_styling(true));
        let out = styles.apply("b", "x");
        assert!(out.contains("\x1b[1m"));
    }

    #[test]
    fn renders_registered_template() {
        let mut stencil = Stencil::with_color(Styles::new(), false);
        stencil
            .add_template("Greeting", "Hello {{ name }}")
            .unwrap();
        assert!(stencil.has_template("Greeting"));

        let out = stencil.render("Greeting", &json!({"name": "ada"})).unwrap();
        assert_eq!(out, "Hello ada");
    }

    #[test]
    fn unknown_template_is_an_error() {
        let stencil = Stencil::with_color(Styles::new(), false);
        assert!(stencil.render("Missing", &json!({})).is_err());
    }

    #[test]
    fn syntax_errors_surface_on_registration() {
        let mut stencil = Stencil::with_color(Styles::new(), false);
        assert!(stencil.add_template("Bad", "{{ unclosed").is_err());
        assert!(!stencil.has_template("Bad"));
    }

    #[test]
    fn style_filter_without_color_is_plain() {
        let styles = Styles::new().add("loud", Style::new().red());
        let mut stencil = Stencil::with_color(styles, false);
        stencil
            .add_template("T", r#"{{ msg | style("loud") }}"#)
            .unwrap();
        let out = stencil.render("T", &json!({"msg": "hey"})).unwrap();
        assert_eq!(out, "hey");
    }

    #[test]
    fn attrs_filter_sorts_and_quotes() {
        let stencil = Stencil::with_color(Styles::new(), false);
        let out = stencil
            .render_str(
                "<x{{ a | attrs }}/>",
                &json!({"a": {"z": 1, "b": "say \"hi\""}}),
            )
            .unwrap();
        assert_eq!(out, "<x b=\"say &quot;hi&quot;\" z=\"1\"/>");
    }

    #[test]
    fn template_names_are_sorted() {
        let mut stencil = Stencil::with_color(Styles::new(), false);
        stencil.add_template("b", "").unwrap();
        stencil.add_template("a", "").unwrap();
        let names: Vec<_> = stencil.template_names().collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
