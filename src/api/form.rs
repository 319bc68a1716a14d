//! Server-rendered form page: nine bounded sliders and a label widget.

use std::fmt::Write;

use crate::api::types::ranking;
use crate::domain::{
    CellFeatures, Diagnosis, FEATURE_KEYS, FEATURE_LABELS, FEATURE_MAX, FEATURE_MIN,
};

pub const TITLE: &str = "Breast Cancer Classification";
pub const DESCRIPTION: &str = "Enter the details to correctly identify cell type?";
pub const OUTPUT_LABEL: &str = "class";

/// What the label widget shows.
#[derive(Debug, Clone)]
pub enum Outcome {
    Empty,
    Predicted(Diagnosis),
    Failed(String),
}

// Soft theme, rose primary / gray secondary; footer hidden.
const STYLE: &str = r#"
:root { --primary: #e11d48; --primary-soft: #ffe4e6; --secondary: #6b7280; --bg: #f9fafb; }
body { font-family: system-ui, sans-serif; background: var(--bg); color: #1f2937; margin: 0; }
main { max-width: 960px; margin: 2rem auto; padding: 0 1rem; }
h1 { text-align: center; margin-bottom: .25rem; }
p.description { text-align: center; color: var(--secondary); margin-top: 0; }
.panels { display: flex; gap: 1.5rem; flex-wrap: wrap; }
.panel { flex: 1 1 380px; background: #fff; border-radius: 12px; padding: 1rem 1.25rem; box-shadow: 0 1px 3px rgba(0,0,0,.08); }
.slider { margin-bottom: .9rem; }
.slider label { display: flex; justify-content: space-between; font-size: .9rem; }
.slider input[type=range] { width: 100%; accent-color: var(--primary); }
button { background: var(--primary); color: #fff; border: 0; border-radius: 8px; padding: .6rem 1.4rem; font-size: 1rem; cursor: pointer; }
.label-widget .caption { font-size: .8rem; color: var(--secondary); text-transform: uppercase; }
.label-widget .top { font-size: 2rem; font-weight: 700; margin: .5rem 0 1rem; }
.label-widget ol { list-style: none; padding: 0; margin: 0; }
.label-widget li { background: var(--primary-soft); border-radius: 6px; padding: .4rem .6rem; margin-bottom: .4rem; }
.label-widget li.other { background: #f3f4f6; }
.error { color: #b91c1c; font-weight: 600; }
footer { visibility: hidden; }
"#;

/// Render the full page with sliders positioned at `values`.
pub fn render_page(values: &CellFeatures, outcome: &Outcome) -> String {
    let mut html = String::with_capacity(8 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{TITLE}</title>");
    let _ = writeln!(html, "<style>{STYLE}</style>");
    html.push_str("</head>\n<body>\n<main>\n");
    let _ = writeln!(html, "<h1>{TITLE}</h1>");
    let _ = writeln!(html, "<p class=\"description\">{DESCRIPTION}</p>");
    html.push_str("<div class=\"panels\">\n");

    html.push_str("<form class=\"panel\" method=\"post\" action=\"/\">\n");
    for ((key, label), value) in FEATURE_KEYS
        .iter()
        .zip(FEATURE_LABELS.iter())
        .zip(values.to_array())
    {
        render_slider(&mut html, key, label, value);
    }
    html.push_str("<button type=\"submit\">Submit</button>\n</form>\n");

    render_label_widget(&mut html, outcome);

    html.push_str("</div>\n</main>\n<footer></footer>\n</body>\n</html>\n");
    html
}

fn render_slider(html: &mut String, key: &str, label: &str, value: f64) {
    let _ = write!(
        html,
        concat!(
            "<div class=\"slider\">\n",
            "<label for=\"{key}\"><span>{label}</span><output id=\"{key}_out\">{value}</output></label>\n",
            "<input type=\"range\" id=\"{key}\" name=\"{key}\" min=\"{min}\" max=\"{max}\" step=\"1\" value=\"{value}\" ",
            "oninput=\"document.getElementById('{key}_out').value = this.value\">\n",
            "</div>\n"
        ),
        key = key,
        label = label,
        value = value,
        min = FEATURE_MIN,
        max = FEATURE_MAX,
    );
}

fn render_label_widget(html: &mut String, outcome: &Outcome) {
    html.push_str("<section class=\"panel label-widget\">\n");
    let _ = writeln!(html, "<div class=\"caption\">{OUTPUT_LABEL}</div>");
    match outcome {
        Outcome::Empty => {}
        Outcome::Predicted(diagnosis) => {
            let _ = writeln!(html, "<div class=\"top\" id=\"prediction\">{diagnosis}</div>");
            html.push_str("<ol>\n");
            for entry in ranking(*diagnosis) {
                let class = if entry.rank == 1 { "top-class" } else { "other" };
                let _ = writeln!(html, "<li class=\"{class}\">{}</li>", entry.label);
            }
            html.push_str("</ol>\n");
        }
        Outcome::Failed(message) => {
            let _ = writeln!(html, "<div class=\"error\">{}</div>", escape_html(message));
        }
    }
    html.push_str("</section>\n");
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nine_bounded_sliders() {
        let html = render_page(&CellFeatures::default(), &Outcome::Empty);
        assert_eq!(html.matches("type=\"range\"").count(), 9);
        assert_eq!(html.matches("min=\"1\" max=\"10\" step=\"1\"").count(), 9);
        for label in FEATURE_LABELS {
            assert!(html.contains(label), "missing label {label}");
        }
        assert!(html.contains(TITLE));
        assert!(html.contains(DESCRIPTION));
        assert!(!html.contains("id=\"prediction\""));
    }

    #[test]
    fn keeps_submitted_values() {
        let values = CellFeatures::from_array([7.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0, 1.0, 1.0]);
        let html = render_page(&values, &Outcome::Empty);
        assert!(html.contains("name=\"clump_thickness\" min=\"1\" max=\"10\" step=\"1\" value=\"7\""));
    }

    #[test]
    fn ranks_predicted_class_first() {
        let html = render_page(
            &CellFeatures::default(),
            &Outcome::Predicted(Diagnosis::Malignant),
        );
        assert!(html.contains("<div class=\"top\" id=\"prediction\">malignant</div>"));
        let top = html.find("<li class=\"top-class\">malignant</li>").unwrap();
        let other = html.find("<li class=\"other\">benign</li>").unwrap();
        assert!(top < other);
    }

    #[test]
    fn escapes_error_messages() {
        let html = render_page(
            &CellFeatures::default(),
            &Outcome::Failed("<bad>".to_string()),
        );
        assert!(html.contains("&lt;bad&gt;"));
        assert!(!html.contains("<bad>"));
    }
}
