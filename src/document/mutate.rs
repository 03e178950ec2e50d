//! Section lookup and content-isolating mutation.
//!
//! Both mutations return a new [`Document`] whose serialized form differs from the
//! input only inside the body of the targeted section.

use super::alias::{normalize, resolve_in, AliasTarget};
use super::model::{find_marker_line, frame_body, Document, Section, INSERT_MARKER};
use crate::error::{GuideError, Result};

/// Find the section `ident` names: alias table first, then exact anchor, then heading.
/// A document-level alias names the document's first section.
pub fn locate<'d>(doc: &'d Document, ident: &str) -> Option<&'d Section> {
    position(doc, ident).map(|idx| &doc.sections[idx])
}

fn position(doc: &Document, ident: &str) -> Option<usize> {
    match resolve_in(&doc.id, ident) {
        Some(AliasTarget::Document) if !doc.sections.is_empty() => return Some(0),
        Some(AliasTarget::Section(anchor)) => {
            if let Some(idx) = doc.sections.iter().position(|s| s.anchor == anchor) {
                return Some(idx);
            }
        }
        _ => {}
    }

    let wanted = normalize(ident);
    if wanted.is_empty() {
        return None;
    }
    doc.sections
        .iter()
        .position(|s| normalize(&s.anchor) == wanted)
        .or_else(|| doc.sections.iter().position(|s| normalize(&s.heading) == wanted))
}

fn not_found(doc: &Document, ident: &str) -> GuideError {
    GuideError::SectionNotFound {
        identifier: ident.to_string(),
        document: doc.id.clone(),
    }
}

/// New content must not carry lines the parser reads as structure.
fn check_content(content: &str) -> Result<()> {
    match find_marker_line(content) {
        Some(line) => Err(GuideError::InvalidInput(format!(
            "content must not contain the document marker line '{}'",
            line.trim()
        ))),
        None => Ok(()),
    }
}

/// Replace the body of the section `ident` names.
pub fn replace(doc: &Document, ident: &str, body: &str) -> Result<Document> {
    check_content(body)?;
    let idx = position(doc, ident).ok_or_else(|| not_found(doc, ident))?;
    let mut next = doc.clone();
    next.sections[idx].body = frame_body(body);
    Ok(next)
}

/// Insert `fragment` directly below the section's insertion marker, or at the end
/// of its body when it has none.
pub fn append(doc: &Document, ident: &str, fragment: &str) -> Result<Document> {
    check_content(fragment)?;
    let idx = position(doc, ident).ok_or_else(|| not_found(doc, ident))?;
    let mut next = doc.clone();
    let section = &mut next.sections[idx];
    let fragment = fragment.trim_matches(|c| c == '\n' || c == '\r');

    section.body = match marker_end(&section.body) {
        Some(end) => {
            let (head, tail) = section.body.split_at(end);
            format!("{head}\n{fragment}\n{tail}")
        }
        None => {
            let kept = section.body.trim_end_matches(['\n', '\r']);
            format!("{kept}\n\n{fragment}\n\n")
        }
    };
    Ok(next)
}

/// Byte offset just past the insertion marker line, newline included.
fn marker_end(body: &str) -> Option<usize> {
    let mut offset = 0;
    for line in body.split_inclusive('\n') {
        offset += line.len();
        if line.trim() == INSERT_MARKER {
            return Some(offset);
        }
    }
    None
}
