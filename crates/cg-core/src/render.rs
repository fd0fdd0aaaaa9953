//! Result-area rendering for a diagnosis.

use std::fmt::Write as _;

use crate::predict::Diagnosis;

/// Plain-text result card.
#[must_use]
pub fn result_card(diagnosis: &Diagnosis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Disease:    {}", diagnosis.disease());
    let _ = writeln!(out, "Confidence: {}%", diagnosis.confidence());
    match diagnosis {
        Diagnosis::Standard(d) => {
            let _ = writeln!(out, "Severity:   {}", d.severity);
            let _ = writeln!(out, "\nRecommendation\n  {}", d.recommendation);
            let _ = write!(out, "\nExplanation\n  {}", d.explanation);
        }
        Diagnosis::Advisory(d) => {
            let _ = writeln!(out, "Advisory:   {}", d.advisory);
            let _ = write!(out, "Alert:      {}", d.alert);
        }
    }
    out
}

/// HTML result card. Every server-supplied value is escaped.
#[must_use]
fn result_card_html(diagnosis: &Diagnosis) -> String {
    let mut out = String::from("<div class=\"section-card\">\n");
    let _ = writeln!(
        out,
        "  <div class=\"section-title\">{}</div>",
        escape_html(diagnosis.disease())
    );
    let _ = writeln!(
        out,
        "  <div><strong>Confidence:</strong> {}%</div>",
        diagnosis.confidence()
    );
    match diagnosis {
        Diagnosis::Standard(d) => {
            let _ = writeln!(
                out,
                "  <div><strong>Severity:</strong> <span class=\"severity-{}\">{}</span></div>",
                escape_html(&d.severity.as_str().to_ascii_lowercase()),
                escape_html(d.severity.as_str())
            );
            push_section(&mut out, "Recommendation", &d.recommendation);
            push_section(&mut out, "Explanation", &d.explanation);
        }
        Diagnosis::Advisory(d) => {
            push_section(&mut out, "Advisory", &d.advisory);
            push_section(&mut out, "Alert", &d.alert);
        }
    }
    out.push_str("</div>");
    out
}

/// Standalone HTML page holding one card per diagnosed image.
#[must_use]
pub fn html_report<'a, I>(results: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a Diagnosis)>,
{
    let mut out = String::from(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>CropGuard results</title></head>\n<body>\n",
    );
    for (image, diagnosis) in results {
        let _ = writeln!(out, "<h2>{}</h2>", escape_html(image));
        out.push_str(&result_card_html(diagnosis));
        out.push('\n');
    }
    out.push_str("</body>\n</html>\n");
    out
}

fn push_section(out: &mut String, title: &str, body: &str) {
    let _ = writeln!(
        out,
        "  <div class=\"section\"><div class=\"section-title\">{title}</div><div class=\"muted\">{}</div></div>",
        escape_html(body)
    );
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
