//! HTML rendering for the triage form.

use crate::assess::{Level, PageContext};
use medi_risk::RiskLabel;
use medi_vitals::{Field, FieldKind};
use std::fmt::Write;

const LAYOUT: &str = include_str!("../templates/layout.html");

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn label_class(label: RiskLabel) -> &'static str {
    match label {
        RiskLabel::Low => "risk-low",
        RiskLabel::Medium => "risk-medium",
        RiskLabel::High => "risk-high",
        RiskLabel::Unknown => "risk-unknown",
    }
}

fn input(out: &mut String, field: Field, value: &str) {
    let key = field.key();
    let _ = writeln!(out, r#"<div class="field"><label for="{key}">{}</label>"#, field.label());
    match field.kind() {
        FieldKind::Binary => {
            let _ = writeln!(out, r#"<select id="{key}" name="{key}">"#);
            let _ = writeln!(out, r#"<option value="">Select</option>"#);
            let submitted = value.trim();
            for (v, caption) in binary_options(field) {
                let selected = if submitted == v { " selected" } else { "" };
                let _ = writeln!(out, r#"<option value="{v}"{selected}>{caption}</option>"#);
            }
            // keep a rejected value visible so it can be corrected
            if !submitted.is_empty() && submitted != "0" && submitted != "1" {
                let v = escape(submitted);
                let _ = writeln!(out, r#"<option value="{v}" selected>{v}</option>"#);
            }
            out.push_str("</select>\n");
        }
        kind => {
            let (min, max) = field.range();
            let step = if kind == FieldKind::Float { "0.1" } else { "1" };
            let _ = writeln!(
                out,
                r#"<input type="number" id="{key}" name="{key}" min="{min}" max="{max}" step="{step}" value="{}">"#,
                escape(value)
            );
        }
    }
    out.push_str("</div>\n");
}

fn binary_options(field: Field) -> [(&'static str, &'static str); 2] {
    match field {
        Field::Gender => [("0", "0"), ("1", "1")],
        _ => [("0", "No"), ("1", "Yes")],
    }
}

/// Render the full page for `page`.
pub fn page(page: &PageContext) -> String {
    let mut body = String::new();

    for message in &page.messages {
        let class = match message.level {
            Level::Success => "message success",
            Level::Error => "message error",
        };
        let _ = writeln!(body, r#"<p class="{class}">{}</p>"#, escape(&message.text));
    }

    if let Some(label) = page.prediction {
        let _ = writeln!(
            body,
            r#"<section class="prediction {}"><h2>{}</h2>"#,
            label_class(label),
            escape(label.as_str())
        );
        if let Some(assessment) = &page.assessment {
            if let Some(score) = assessment.score {
                let _ = writeln!(body, "<p>Score: {score}</p>");
            }
            if !assessment.factors.is_empty() {
                body.push_str("<ul>\n");
                for factor in &assessment.factors {
                    let _ = writeln!(body, "<li>{} (+{})</li>", escape(factor.name), factor.points);
                }
                body.push_str("</ul>\n");
            }
        }
        body.push_str("</section>\n");
    }

    if page.show_predictor {
        body.push_str("<section id=\"predictor\" class=\"predictor active\">\n");
    } else {
        body.push_str(
            "<section class=\"home\">\n<p>Enter ten vital signs to estimate a patient's risk level.</p>\n\
             <a href=\"#predictor\">Start assessment</a>\n</section>\n",
        );
        body.push_str("<section id=\"predictor\" class=\"predictor\">\n");
    }
    body.push_str("<form method=\"post\" action=\"/\">\n");
    for field in Field::ALL {
        let value = page.values.get(field.key()).map(String::as_str).unwrap_or("");
        input(&mut body, field, value);
    }
    body.push_str("<button type=\"submit\">Assess risk</button>\n</form>\n</section>\n");

    LAYOUT.replace("{{content}}", &body)
}
