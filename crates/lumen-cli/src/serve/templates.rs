//! HTML template rendering for the question page.
//!
//! Templates are stored as separate files for maintainability:
//! - `templates/index.html` - HTML structure
//! - `templates/styles.css` - CSS styles
//! - `templates/app.js` - JavaScript application code
//!
//! Files are embedded at compile time using `include_str!`.

use lumen_core::Mode;

// Embed template files at compile time
const HTML_TEMPLATE: &str = include_str!("templates/index.html");
const STYLES: &str = include_str!("templates/styles.css");
const SCRIPT: &str = include_str!("templates/app.js");

/// Render the question page.
///
/// Assembles the final HTML by substituting placeholders in the template:
/// - `{{MODEL_OPTIONS}}` - `<option>` list for the model picker
/// - `{{MODE_OPTIONS}}` - `<option>` list for the mode picker
/// - `{{FOLLOW_UPS_CHECKED}}` - `checked` when follow-ups are on by default
/// - `{{STYLES}}` - CSS styles
/// - `{{SCRIPT}}` - JavaScript code
pub fn render_ask_page(
    models: &[&str],
    selected_model: &str,
    selected_mode: Mode,
    follow_ups: bool,
) -> String {
    HTML_TEMPLATE
        .replace("{{MODEL_OPTIONS}}", &model_options(models, selected_model))
        .replace("{{MODE_OPTIONS}}", &mode_options(selected_mode))
        .replace("{{FOLLOW_UPS_CHECKED}}", if follow_ups { "checked" } else { "" })
        .replace("{{STYLES}}", STYLES)
        .replace("{{SCRIPT}}", SCRIPT)
}

fn model_options(models: &[&str], selected: &str) -> String {
    let mut options: Vec<String> = models
        .iter()
        .map(|m| option(m, m, *m == selected))
        .collect();

    // A configured model outside the list still shows up, selected.
    if !models.contains(&selected) {
        options.insert(0, option(selected, selected, true));
    }

    options.join("\n")
}

fn mode_options(selected: Mode) -> String {
    Mode::ALL
        .into_iter()
        .map(|mode| option(mode.as_str(), mode.display_name(), mode == selected))
        .collect::<Vec<_>>()
        .join("\n")
}

fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        r#"<option value="{}"{}>{}</option>"#,
        html_escape(value),
        if selected { " selected" } else { "" },
        html_escape(label)
    )
}

/// Escape HTML special characters to prevent XSS.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
