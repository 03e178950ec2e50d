//! Contextual help for a single file.

use serde::Serialize;
use std::path::PathBuf;

use super::GuideSet;
use crate::facts::context::{detect_file_context, FileContext};
use crate::synth;

#[derive(Debug, Clone, Serialize)]
pub struct ContextualHelp {
    #[serde(flatten)]
    pub context: FileContext,
    pub guide_exists: bool,
    /// Topical document most relevant to this kind of file.
    pub related_guide: Option<PathBuf>,
}

fn guide_for_kind(kind: &str) -> Option<&'static str> {
    match kind {
        "api" => Some("api"),
        "utility" | "hook" => Some("guidelines"),
        "page" => Some("routing"),
        "component" => Some("components"),
        _ => None,
    }
}

impl GuideSet {
    pub fn contextual_help(&self, file: &str) -> ContextualHelp {
        let context = detect_file_context(file, self.project());
        let related_guide = guide_for_kind(&context.kind)
            .and_then(synth::schema)
            .map(|schema| self.doc_path(schema));
        ContextualHelp {
            guide_exists: self.index_path().is_file(),
            related_guide,
            context,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::LayoutConfig;
    use crate::guide::GuideSet;
    use std::path::Path;

    #[test]
    fn points_components_at_component_guide() {
        let guides = GuideSet::new(Path::new("/nonexistent/project"), &LayoutConfig::default());
        let help = guides.contextual_help("/nonexistent/project/src/components/Nav.tsx");
        assert_eq!(help.context.kind, "component");
        assert!(!help.guide_exists);
        assert_eq!(
            help.related_guide.unwrap(),
            Path::new("/nonexistent/project/.vscode/guides/components.md")
        );
    }
}
