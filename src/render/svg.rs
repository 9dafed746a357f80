//! Minimal SVG element tree.
//!
//! Illustrations are built as a tree of [`Element`]s and serialized once.
//! Attribute values are escaped; element names and attribute names are
//! static strings chosen by the renderers.

use std::fmt::{Display, Write};

/// Stroke color of the active-section outline.
pub const HIGHLIGHT_STROKE: &str = "#AF9D5E";

/// XML declaration at the start of every standalone document.
pub const XML_PROLOG: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// An SVG element with attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Element>,
}

impl Element {
    /// Creates an element with no attributes.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// `<rect>` at the given position and size.
    pub fn rect(x: impl Display, y: impl Display, width: impl Display, height: impl Display) -> Self {
        Self::new("rect")
            .attr("x", x)
            .attr("y", y)
            .attr("width", width)
            .attr("height", height)
    }

    /// `<ellipse>` centered at `(cx, cy)`.
    pub fn ellipse(cx: impl Display, cy: impl Display, rx: impl Display, ry: impl Display) -> Self {
        Self::new("ellipse")
            .attr("cx", cx)
            .attr("cy", cy)
            .attr("rx", rx)
            .attr("ry", ry)
    }

    /// `<circle>` centered at `(cx, cy)`.
    pub fn circle(cx: impl Display, cy: impl Display, r: impl Display) -> Self {
        Self::new("circle").attr("cx", cx).attr("cy", cy).attr("r", r)
    }

    /// `<line>` between two points.
    pub fn line(x1: impl Display, y1: impl Display, x2: impl Display, y2: impl Display) -> Self {
        Self::new("line")
            .attr("x1", x1)
            .attr("y1", y1)
            .attr("x2", x2)
            .attr("y2", y2)
    }

    /// `<polygon>` through the given points ("x,y x,y ...").
    pub fn polygon(points: &str) -> Self {
        Self::new("polygon").attr("points", points)
    }

    /// `<path>` with the given path data.
    pub fn path(d: &str) -> Self {
        Self::new("path").attr("d", d)
    }

    /// `<g>` group of children.
    pub fn group(children: impl IntoIterator<Item = Element>) -> Self {
        Self::new("g").children(children)
    }

    /// `<linearGradient>` with evenly described stops.
    pub fn linear_gradient(
        id: &str,
        (x1, y1, x2, y2): (&str, &str, &str, &str),
        stops: &[(&str, String)],
    ) -> Self {
        Self::new("linearGradient")
            .attr("id", id)
            .attr("x1", x1)
            .attr("y1", y1)
            .attr("x2", x2)
            .attr("y2", y2)
            .children(stops.iter().map(|(offset, color)| {
                Self::new("stop")
                    .attr("offset", offset)
                    .attr("stop-color", color)
            }))
    }

    /// Adds an attribute.
    pub fn attr(mut self, name: &'static str, value: impl Display) -> Self {
        self.attrs.push((name, value.to_string()));
        self
    }

    /// Sets `fill`.
    pub fn fill(self, fill: impl Display) -> Self {
        self.attr("fill", fill)
    }

    /// Sets `opacity`.
    pub fn opacity(self, opacity: impl Display) -> Self {
        self.attr("opacity", opacity)
    }

    /// Sets `stroke` and `stroke-width`.
    pub fn stroke(self, stroke: impl Display, width: impl Display) -> Self {
        self.attr("stroke", stroke).attr("stroke-width", width)
    }

    /// Dashed, unfilled outline marking the active section.
    pub fn highlight(self, width: u8, dash: &str) -> Self {
        self.fill("none")
            .stroke(HIGHLIGHT_STROKE, width)
            .attr("stroke-dasharray", dash)
            .opacity("0.9")
            .attr("class", "section-highlight")
    }

    /// Appends one child.
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Appends children.
    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    /// Serializes the element and its children.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.name);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            child.write_to(out);
        }
        let _ = write!(out, "</{}>", self.name);
    }
}

/// Wraps `defs` and `body` in a standalone SVG document.
pub fn document(
    width: u32,
    height: u32,
    label: &str,
    defs: Vec<Element>,
    body: Vec<Element>,
) -> String {
    let root = Element::new("svg")
        .attr("xmlns", "http://www.w3.org/2000/svg")
        .attr("viewBox", format!("0 0 {width} {height}"))
        .attr("role", "img")
        .attr("aria-label", label)
        .child(Element::new("defs").children(defs))
        .children(body);

    let mut out = String::from(XML_PROLOG);
    root.write_to(&mut out);
    out.push('\n');
    out
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
