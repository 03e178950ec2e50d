use once_cell::sync::Lazy;
use regex::Regex;

/// Version of the section schemas written into the document header.
pub const SCHEMA_VERSION: u32 = 1;

/// Line inside a section body after which appended fragments are inserted.
pub const INSERT_MARKER: &str = "<!-- insert -->";

const FOOTER_MARKER: &str = "<!-- footer -->";

static DOC_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<!-- guidebook:doc id=(\S+) schema=(\d+) -->$").unwrap());
static SECTION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<!-- section: (\S+) -->$").unwrap());

/// One addressable section. `body` is the raw text between the heading line and
/// the next marker, framing newlines included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub anchor: String,
    pub heading: String,
    pub body: String,
    pub order: usize,
}

impl Section {
    pub fn new(anchor: impl Into<String>, heading: impl Into<String>, content: &str) -> Self {
        Self {
            anchor: anchor.into(),
            heading: heading.into(),
            body: frame_body(&escape_markers(content)),
            order: 0,
        }
    }

    /// Body text without its framing blank lines.
    pub fn content(&self) -> &str {
        self.body.trim_matches(|c| c == '\n' || c == '\r')
    }

    fn render_into(&self, out: &mut String) {
        out.push_str(&format!("<!-- section: {} -->\n", self.anchor));
        if !self.heading.is_empty() {
            out.push_str(&format!("## {}\n", self.heading));
        }
        out.push_str(&self.body);
    }
}

/// `true` for a line [`Document::parse`] would read as structure: a doc, section
/// or footer marker.
pub(crate) fn is_marker_line(line: &str) -> bool {
    let line = line.trim();
    line == FOOTER_MARKER || SECTION_MARKER.is_match(line) || DOC_MARKER.is_match(line)
}

/// First marker line in `content`, if any.
pub(crate) fn find_marker_line(content: &str) -> Option<&str> {
    content.lines().find(|line| is_marker_line(line))
}

/// Rewrite marker lines so they render as text but never delimit sections.
pub(crate) fn escape_markers(content: &str) -> String {
    content
        .split_inclusive('\n')
        .map(|line| {
            if is_marker_line(line) {
                line.replacen("<!--", "&lt;!--", 1)
            } else {
                line.to_string()
            }
        })
        .collect()
}

/// Wrap section content in the blank lines the renderer expects around it.
pub(crate) fn frame_body(content: &str) -> String {
    format!("\n{}\n\n", content.trim_matches(|c| c == '\n' || c == '\r'))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub generated_at: Option<String>,
    preamble: String,
    pub(super) sections: Vec<Section>,
    footer: Option<String>,
}

impl Document {
    pub fn new(id: &str, title: &str, generated_at: Option<&str>) -> Self {
        // The title is one line; a line break in it could start a marker line.
        let title = title.replace(['\n', '\r'], " ");
        let mut preamble = format!("<!-- guidebook:doc id={id} schema={SCHEMA_VERSION} -->\n# {title}\n\n");
        if let Some(at) = generated_at {
            preamble.push_str(&format!("*Generated at: {at}*\n\n"));
        }
        Self {
            id: id.to_string(),
            title,
            generated_at: generated_at.map(str::to_string),
            preamble,
            sections: Vec::new(),
            footer: None,
        }
    }

    /// Set the trailer written after the footer marker.
    pub fn with_footer(mut self, footer: &str) -> Self {
        self.footer = Some(footer.to_string());
        self
    }

    /// Add a section at the end, or overwrite the section that already has this anchor.
    pub fn push_section(&mut self, mut section: Section) {
        if let Some(existing) = self.sections.iter_mut().find(|s| s.anchor == section.anchor) {
            existing.heading = section.heading;
            existing.body = section.body;
            return;
        }
        section.order = self.sections.len();
        self.sections.push(section);
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, anchor: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.anchor == anchor)
    }

    /// `true` when the text carried section markers (hand-written files may not).
    pub fn has_sections(&self) -> bool {
        !self.sections.is_empty()
    }

    /// Equality that ignores the generated-at timestamp.
    pub fn same_content(&self, other: &Self) -> bool {
        self.id == other.id
            && self.title == other.title
            && self.sections == other.sections
            && self.footer == other.footer
    }

    /// Parse persisted Markdown. Never fails: unmarked text ends up in the preamble.
    pub fn parse(text: &str) -> Self {
        let mut preamble = String::new();
        let mut sections: Vec<Section> = Vec::new();
        let mut footer: Option<String> = None;

        let mut lines = text.split_inclusive('\n').peekable();
        while let Some(line) = lines.next() {
            let bare = line.trim_end_matches(['\n', '\r']);

            if footer.is_none() {
                if let Some(caps) = SECTION_MARKER.captures(bare) {
                    let heading = match lines.peek().and_then(|next| heading_of(next)) {
                        Some(heading) => {
                            lines.next();
                            heading
                        }
                        None => String::new(),
                    };
                    sections.push(Section {
                        anchor: caps[1].to_string(),
                        heading,
                        body: String::new(),
                        order: sections.len(),
                    });
                    continue;
                }
                if bare == FOOTER_MARKER {
                    footer = Some(String::new());
                    continue;
                }
            }

            match (footer.as_mut(), sections.last_mut()) {
                (Some(trailer), _) => trailer.push_str(line),
                (None, Some(section)) => section.body.push_str(line),
                (None, None) => preamble.push_str(line),
            }
        }

        let mut id = String::new();
        let mut title = String::new();
        let mut generated_at = None;
        for line in preamble.lines() {
            if let Some(caps) = DOC_MARKER.captures(line) {
                id = caps[1].to_string();
            } else if let Some(t) = line.strip_prefix("# ") {
                if title.is_empty() {
                    title = t.trim().to_string();
                }
            } else if let Some(at) = line
                .strip_prefix("*Generated at: ")
                .and_then(|rest| rest.strip_suffix('*'))
            {
                generated_at = Some(at.to_string());
            }
        }

        Self {
            id,
            title,
            generated_at,
            preamble,
            sections,
            footer,
        }
    }

    pub fn to_markdown(&self) -> String {
        let mut out = self.preamble.clone();
        for section in &self.sections {
            section.render_into(&mut out);
        }
        if let Some(footer) = &self.footer {
            out.push_str(FOOTER_MARKER);
            out.push('\n');
            out.push_str(footer);
        }
        out
    }
}

fn heading_of(line: &str) -> Option<String> {
    let rest = line.strip_prefix("## ")?;
    let rest = rest.strip_suffix('\n').unwrap_or(rest);
    if rest.trim().is_empty() {
        None
    } else {
        Some(rest.to_string())
    }
}
