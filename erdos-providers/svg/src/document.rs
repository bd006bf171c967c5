//! Minimal SVG markup builder.

use std::fmt::Display;

pub(crate) struct SvgDocument {
    body: String,
    width: u32,
    height: u32,
}

impl SvgDocument {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        let mut document = Self {
            body: String::new(),
            width,
            height,
        };
        document.raw(&format!(
            r#"<rect x="0" y="0" width="{width}" height="{height}" fill="white"/>"#
        ));
        document
    }

    pub(crate) fn raw(&mut self, element: &str) {
        self.body.push_str(element);
        self.body.push('\n');
    }

    pub(crate) fn open_group(&mut self, class: &str, source: Option<&dyn Display>) {
        match source {
            Some(source) => self.raw(&format!(
                r#"<g class="{class}" data-source="{}">"#,
                escape(&source.to_string())
            )),
            None => self.raw(&format!(r#"<g class="{class}">"#)),
        }
    }

    pub(crate) fn close_group(&mut self) {
        self.raw("</g>");
    }

    pub(crate) fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &str, width: f64, opacity: f64) {
        self.raw(&format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{stroke}" stroke-width="{width}" stroke-opacity="{opacity}"/>"#,
            from.0, from.1, to.0, to.1
        ));
    }

    pub(crate) fn text(&mut self, at: (f64, f64), size: u32, bold: bool, anchor: &str, content: &str) {
        let weight = if bold { "bold" } else { "normal" };
        self.raw(&format!(
            r#"<text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="{size}" font-weight="{weight}" text-anchor="{anchor}" dominant-baseline="middle">{}</text>"#,
            at.0,
            at.1,
            escape(content)
        ));
    }

    pub(crate) fn finish(self) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}

/// Escapes text for use in element content and attribute values.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
