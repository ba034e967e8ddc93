use console::Style;
use once_cell::sync::Lazy;
use stencil::Styles;

/// Styles for listings, keyed by the field they decorate.
pub static LIST_STYLES: Lazy<Styles> = Lazy::new(|| {
    Styles::new()
        .add("name", Style::new().bold())
        .add("leaf", Style::new().green())
        .add("wrap", Style::new().cyan())
        .add("branch", Style::new().magenta())
        .add("detail", Style::new().dim())
        .add("heading", Style::new().underlined())
});
