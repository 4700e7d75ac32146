//! Server-rendered HTML for the predict and history tabs

use crate::ml::features::{SOIL_TYPES, WILDERNESS_AREAS};
use crate::models::{PredictionHistory, TerrainInput, VERTICAL_DISTANCE_RANGE};
use crate::progress::PROGRESS_TEXT;
use std::fmt::Write;

pub const PAGE_TITLE: &str = "Forest Cover Type Predictor";

/// Which tab is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Predict,
    History,
}

/// One-shot status message rendered above the tab body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flash {
    Success(String),
    Error(String),
}

/// Page-level settings shared by every render
#[derive(Debug, Clone)]
pub struct PageContext {
    /// Public URL of the banner image
    pub banner_url: String,
}

enum Widget {
    Number,
    Slider,
}

struct Field {
    name: &'static str,
    label: &'static str,
    min: i32,
    max: i32,
    widget: Widget,
}

const fn number(name: &'static str, label: &'static str, min: i32, max: i32) -> Field {
    Field {
        name,
        label,
        min,
        max,
        widget: Widget::Number,
    }
}

const fn slider(name: &'static str, label: &'static str) -> Field {
    Field {
        name,
        label,
        min: 0,
        max: 255,
        widget: Widget::Slider,
    }
}

const COLUMN_ONE: [Field; 5] = [
    number("elevation", "Elevation (m)", 0, 4000),
    number("aspect", "Aspect (degrees)", 0, 360),
    number("slope", "Slope (degrees)", 0, 90),
    number(
        "horizontal_distance_to_hydrology",
        "Horizontal Distance to Hydrology",
        0,
        10000,
    ),
    number(
        "vertical_distance_to_hydrology",
        "Vertical Distance to Hydrology",
        VERTICAL_DISTANCE_RANGE.0,
        VERTICAL_DISTANCE_RANGE.1,
    ),
];

const COLUMN_TWO: [Field; 5] = [
    number(
        "horizontal_distance_to_roadways",
        "Horizontal Distance to Roadways",
        0,
        10000,
    ),
    slider("hillshade_9am", "Hillshade 9am"),
    slider("hillshade_noon", "Hillshade Noon"),
    slider("hillshade_3pm", "Hillshade 3pm"),
    number(
        "horizontal_distance_to_fire_points",
        "Horizontal Distance to Fire Points",
        0,
        10000,
    ),
];

fn field_value(input: &TerrainInput, name: &str) -> i32 {
    match name {
        "elevation" => input.elevation,
        "aspect" => input.aspect,
        "slope" => input.slope,
        "horizontal_distance_to_hydrology" => input.horizontal_distance_to_hydrology,
        "vertical_distance_to_hydrology" => input.vertical_distance_to_hydrology,
        "horizontal_distance_to_roadways" => input.horizontal_distance_to_roadways,
        "hillshade_9am" => input.hillshade_9am,
        "hillshade_noon" => input.hillshade_noon,
        "hillshade_3pm" => input.hillshade_3pm,
        "horizontal_distance_to_fire_points" => input.horizontal_distance_to_fire_points,
        _ => 0,
    }
}

/// Escape text for inclusion in HTML content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_field(out: &mut String, field: &Field, input: &TerrainInput) {
    let value = field_value(input, field.name);
    let kind = match field.widget {
        Widget::Number => "number",
        Widget::Slider => "range",
    };
    let _ = write!(
        out,
        r#"<label for="{name}">{label}</label>
<input type="{kind}" id="{name}" name="{name}" min="{min}" max="{max}" step="1" value="{value}" required>
"#,
        name = field.name,
        label = escape_html(field.label),
        kind = kind,
        min = field.min,
        max = field.max,
        value = value,
    );
}

fn render_select(out: &mut String, name: &str, label: &str, options: usize, selected: u8) {
    let _ = writeln!(out, r#"<label for="{name}">{label}</label>"#);
    let _ = writeln!(out, r#"<select id="{name}" name="{name}">"#);
    for i in 0..options {
        let marker = if i == selected as usize { " selected" } else { "" };
        let _ = writeln!(out, r#"<option value="{i}"{marker}>{i}</option>"#);
    }
    out.push_str("</select>\n");
}

fn render_flash(out: &mut String, flash: Option<&Flash>) {
    match flash {
        Some(Flash::Success(message)) => {
            let _ = writeln!(out, r#"<div class="flash success">{}</div>"#, message);
        }
        Some(Flash::Error(message)) => {
            let _ = writeln!(
                out,
                r#"<div class="flash error">{}</div>"#,
                escape_html(message)
            );
        }
        None => {}
    }
}

fn layout(ctx: &PageContext, active: Tab, body: &str) -> String {
    let tab_class = |tab: Tab| if tab == active { "tab active" } else { "tab" };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; margin: 0; display: flex; }}
aside {{ width: 16rem; padding: 1rem; background: #f0f4f0; min-height: 100vh; }}
main {{ flex: 1; padding: 1rem 2rem; }}
nav a {{ margin-right: 1rem; text-decoration: none; }}
.tab.active {{ font-weight: bold; border-bottom: 2px solid #2e7d32; }}
.columns {{ display: grid; grid-template-columns: repeat(3, 1fr); gap: 1.5rem; }}
.columns label, .columns input, .columns select {{ display: block; width: 100%; margin-bottom: 0.5rem; }}
.flash.success {{ background: #e8f5e9; padding: 0.75rem; }}
.flash.error {{ background: #ffebee; padding: 0.75rem; }}
table {{ border-collapse: collapse; width: 100%; }}
th, td {{ border: 1px solid #ccc; padding: 0.25rem 0.5rem; text-align: left; }}
img.banner {{ width: 100%; margin-top: 2rem; }}
</style>
</head>
<body>
<aside>
<h3>About This App</h3>
<p>This app uses a trained <strong>Random Forest model</strong> to predict the forest cover type for a land patch based on environmental and terrain features.</p>
</aside>
<main>
<h1>{title}</h1>
<p>Enter environmental and terrain features below to predict the <strong>cover type</strong> of forest land.</p>
<nav>
<a class="{predict_class}" href="/">Predict</a>
<a class="{history_class}" href="/history">History</a>
</nav>
{body}
<img class="banner" src="{banner}" alt="Forest cover">
</main>
</body>
</html>
"#,
        title = PAGE_TITLE,
        predict_class = tab_class(Tab::Predict),
        history_class = tab_class(Tab::History),
        body = body,
        banner = escape_html(&ctx.banner_url),
    )
}

/// The predict tab: input form plus the outcome of the last action, if any
pub fn render_predict_page(ctx: &PageContext, input: &TerrainInput, flash: Option<&Flash>) -> String {
    let mut body = String::new();
    body.push_str("<h2>Terrain and Environmental Features</h2>\n");
    body.push_str(r#"<form method="post" action="/predict">"#);
    body.push_str("\n<div class=\"columns\">\n<div>\n");
    for field in &COLUMN_ONE {
        render_field(&mut body, field, input);
    }
    body.push_str("</div>\n<div>\n");
    for field in &COLUMN_TWO {
        render_field(&mut body, field, input);
    }
    body.push_str("</div>\n<div>\n");
    render_select(
        &mut body,
        "wilderness_area",
        "Wilderness Area (0-3)",
        WILDERNESS_AREAS,
        input.wilderness_area,
    );
    render_select(
        &mut body,
        "soil_type",
        "Soil Type (0-39)",
        SOIL_TYPES,
        input.soil_type,
    );
    body.push_str("</div>\n</div>\n");
    body.push_str("<button type=\"submit\">Predict Cover Type</button>\n</form>\n");

    if flash.is_some() {
        let _ = writeln!(
            body,
            r#"<progress value="100" max="100"></progress> <span>{}</span>"#,
            PROGRESS_TEXT
        );
    }
    render_flash(&mut body, flash);

    layout(ctx, Tab::Predict, &body)
}

/// The history tab: most recent prediction first, with export and clear actions
pub fn render_history_page(
    ctx: &PageContext,
    history: &PredictionHistory,
    flash: Option<&Flash>,
) -> String {
    let mut body = String::new();
    body.push_str("<h2>Prediction History</h2>\n");
    render_flash(&mut body, flash);

    if history.is_empty() {
        body.push_str("<p>No predictions yet.</p>\n");
        return layout(ctx, Tab::History, &body);
    }

    body.push_str("<table>\n<thead><tr>");
    for column in crate::export::CSV_COLUMNS {
        let _ = write!(body, "<th>{}</th>", column);
    }
    body.push_str("</tr></thead>\n<tbody>\n");
    for record in history.recent_first() {
        let _ = writeln!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            record.elevation,
            record.slope,
            record.aspect,
            record.wilderness,
            record.soil_type,
            escape_html(record.prediction.label()),
        );
    }
    body.push_str("</tbody>\n</table>\n");

    let _ = writeln!(
        body,
        r#"<p><a href="/v1/history/export" download="{}">Download as CSV</a></p>"#,
        crate::export::EXPORT_FILE_NAME
    );
    body.push_str(
        r#"<form method="post" action="/history/clear"><button type="submit">Clear History</button></form>"#,
    );
    body.push('\n');

    layout(ctx, Tab::History, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CoverType, HistoryRecord};

    fn ctx() -> PageContext {
        PageContext {
            banner_url: "/static/forestcover.jpg".to_string(),
        }
    }

    #[test]
    fn test_predict_page_has_defaults_and_bounds() {
        let html = render_predict_page(&ctx(), &TerrainInput::default(), None);

        assert!(html.contains(PAGE_TITLE));
        assert!(html.contains(r#"name="elevation" min="0" max="4000" step="1" value="2500""#));
        assert!(html.contains(r#"name="vertical_distance_to_hydrology" min="-500" max="500""#));
        assert!(html.contains(r#"type="range" id="hillshade_noon""#));
        assert!(html.contains(r#"<option value="39">39</option>"#));
        assert!(html.contains(r#"src="/static/forestcover.jpg""#));
        assert!(!html.contains("<progress"));
    }

    #[test]
    fn test_predict_page_flash() {
        let flash = Flash::Error("Prediction error: <bad>".to_string());
        let html = render_predict_page(&ctx(), &TerrainInput::default(), Some(&flash));

        assert!(html.contains("Prediction error: &lt;bad&gt;"));
        assert!(html.contains(PROGRESS_TEXT));
    }

    #[test]
    fn test_history_page_rows_recent_first() {
        let mut history = PredictionHistory::new();
        for (elevation, cover) in [(1000, CoverType::SpruceFir), (2000, CoverType::Aspen)] {
            let input = TerrainInput {
                elevation,
                ..Default::default()
            };
            history.append(HistoryRecord::new(&input, cover));
        }

        let html = render_history_page(&ctx(), &history, None);
        let aspen = html.find("<td>2000</td>").unwrap();
        let spruce = html.find("<td>1000</td>").unwrap();

        assert!(aspen < spruce);
        assert!(html.contains("Download as CSV"));
        assert!(html.contains("Clear History"));
    }

    #[test]
    fn test_empty_history_page() {
        let html = render_history_page(&ctx(), &PredictionHistory::new(), None);
        assert!(html.contains("No predictions yet."));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
