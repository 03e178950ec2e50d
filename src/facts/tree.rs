//! Depth-bounded directory tree.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::path::Path;

/// Directory listing keyed by entry name; directory keys carry a trailing `/`.
pub type DirectoryTree = BTreeMap<String, TreeNode>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    File,
    Dir(DirectoryTree),
    /// Directory below the depth bound; its contents were not listed.
    Truncated,
}

impl Serialize for TreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::File => serializer.serialize_str("file"),
            Self::Dir(children) => children.serialize(serializer),
            Self::Truncated => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("truncated", &true)?;
                map.end()
            }
        }
    }
}

/// List `root` up to `max_depth` levels, skipping names in `ignore`.
pub fn build(root: &Path, max_depth: usize, ignore: &[String]) -> DirectoryTree {
    walk(root, 0, max_depth, ignore)
}

fn walk(dir: &Path, depth: usize, max_depth: usize, ignore: &[String]) -> DirectoryTree {
    let mut tree = DirectoryTree::new();
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "directory unreadable");
            return tree;
        }
    };

    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if ignore.iter().any(|i| *i == name) {
            continue;
        }
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if is_dir {
            let node = if depth + 1 >= max_depth {
                TreeNode::Truncated
            } else {
                TreeNode::Dir(walk(&entry.path(), depth + 1, max_depth, ignore))
            };
            tree.insert(format!("{name}/"), node);
        } else {
            tree.insert(name, TreeNode::File);
        }
    }

    tree
}

/// Render as an ASCII tree (`├──` / `└──` connectors).
pub fn render(tree: &DirectoryTree) -> String {
    let mut lines = Vec::new();
    render_into(tree, "", &mut lines);
    lines.join("\n")
}

fn render_into(tree: &DirectoryTree, prefix: &str, lines: &mut Vec<String>) {
    let total = tree.len();
    for (idx, (name, node)) in tree.iter().enumerate() {
        let is_last = idx + 1 == total;
        let connector = if is_last { "└── " } else { "├── " };
        let extension = if is_last { "    " } else { "│   " };
        lines.push(format!("{prefix}{connector}{name}"));

        match node {
            TreeNode::File => {}
            TreeNode::Dir(children) => {
                render_into(children, &format!("{prefix}{extension}"), lines);
            }
            TreeNode::Truncated => {
                lines.push(format!("{prefix}{extension}└── …"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ignore() -> Vec<String> {
        vec!["node_modules".to_string(), ".git".to_string()]
    }

    #[test]
    fn depth_bound_marks_truncation() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("a/b/c/d")).unwrap();
        std::fs::write(tmp.path().join("a/b/c/d/deep.txt"), "").unwrap();

        let tree = build(tmp.path(), 3, &ignore());

        let TreeNode::Dir(a) = &tree["a/"] else { panic!("a/ should be listed") };
        let TreeNode::Dir(b) = &a["b/"] else { panic!("b/ should be listed") };
        assert_eq!(b["c/"], TreeNode::Truncated);
    }

    #[test]
    fn ignored_names_are_skipped() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("node_modules/x")).unwrap();
        std::fs::write(tmp.path().join("README.md"), "").unwrap();

        let tree = build(tmp.path(), 3, &ignore());
        assert!(!tree.contains_key("node_modules/"));
        assert_eq!(tree["README.md"], TreeNode::File);
    }

    #[test]
    fn render_uses_connectors() {
        let mut src = DirectoryTree::new();
        src.insert("main.ts".into(), TreeNode::File);
        let mut tree = DirectoryTree::new();
        tree.insert("package.json".into(), TreeNode::File);
        tree.insert("src/".into(), TreeNode::Dir(src));

        assert_eq!(render(&tree), "├── package.json\n└── src/\n    └── main.ts");
    }

    #[test]
    fn serializes_files_as_file_marker() {
        let mut tree = DirectoryTree::new();
        tree.insert("a.ts".into(), TreeNode::File);
        tree.insert("deep/".into(), TreeNode::Truncated);
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["a.ts"], "file");
        assert_eq!(json["deep/"]["truncated"], true);
    }
}
