//! Alias table mapping user-facing section names (English and Chinese) to
//! a document or one of its sections.

/// What an alias points at inside its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasTarget {
    /// The whole document; mutations go to its first (primary) section.
    Document,
    Section(&'static str),
}

pub struct Alias {
    pub names: &'static [&'static str],
    pub doc: &'static str,
    pub target: AliasTarget,
}

pub const ALIASES: &[Alias] = &[
    Alias {
        names: &["overview", "project overview", "概览", "项目概览", "项目概述", "概述"],
        doc: "overview",
        target: AliasTarget::Document,
    },
    Alias {
        names: &["tech stack", "technology stack", "stack", "技术栈"],
        doc: "overview",
        target: AliasTarget::Section("tech-stack"),
    },
    Alias {
        names: &["description", "project description", "项目描述", "项目简介", "描述"],
        doc: "overview",
        target: AliasTarget::Section("description"),
    },
    Alias {
        names: &["directory structure", "directory tree", "project structure", "目录结构", "项目结构"],
        doc: "overview",
        target: AliasTarget::Section("directory-tree"),
    },
    Alias {
        names: &["routing", "routes", "router", "路由", "路由系统", "路由配置"],
        doc: "routing",
        target: AliasTarget::Document,
    },
    Alias {
        names: &["route examples", "example routes", "路由示例"],
        doc: "routing",
        target: AliasTarget::Section("route-examples"),
    },
    Alias {
        names: &["routing usage", "usage", "使用方式", "使用方法"],
        doc: "routing",
        target: AliasTarget::Section("usage"),
    },
    Alias {
        names: &["state", "state management", "store", "状态", "状态管理"],
        doc: "state",
        target: AliasTarget::Document,
    },
    Alias {
        names: &["styling", "styles", "style", "css", "样式", "样式方案"],
        doc: "styling",
        target: AliasTarget::Document,
    },
    Alias {
        names: &["components", "component library", "组件", "组件库"],
        doc: "components",
        target: AliasTarget::Document,
    },
    Alias {
        names: &["api", "api requests", "requests", "接口", "接口请求", "api 请求"],
        doc: "api",
        target: AliasTarget::Document,
    },
    Alias {
        names: &["guidelines", "development guidelines", "conventions", "开发规范", "规范"],
        doc: "guidelines",
        target: AliasTarget::Document,
    },
    Alias {
        names: &["code style", "coding style", "代码风格"],
        doc: "guidelines",
        target: AliasTarget::Section("code-style"),
    },
    Alias {
        names: &["commands", "scripts", "常用命令", "命令", "脚本"],
        doc: "commands",
        target: AliasTarget::Document,
    },
];

/// Lowercase, turn punctuation (ASCII or CJK) into spaces, collapse whitespace.
///
/// `"Tech-Stack"`, `" tech  stack! "` and `"tech_stack"` all normalize to `"tech stack"`;
/// `"路由系统："` normalizes to `"路由系统"`.
pub fn normalize(ident: &str) -> String {
    let spaced: String = ident
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    spaced
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Global lookup: the document an identifier names and what it targets there.
pub fn resolve(ident: &str) -> Option<(&'static str, AliasTarget)> {
    find(ident, |_| true).map(|alias| (alias.doc, alias.target))
}

/// Lookup restricted to the aliases of one document.
pub fn resolve_in(doc: &str, ident: &str) -> Option<AliasTarget> {
    find(ident, |alias| alias.doc == doc).map(|alias| alias.target)
}

fn find(ident: &str, scope: impl Fn(&Alias) -> bool) -> Option<&'static Alias> {
    let wanted = normalize(ident);
    if wanted.is_empty() {
        return None;
    }
    ALIASES
        .iter()
        .filter(|alias| scope(alias))
        .find(|alias| alias.names.iter().any(|name| normalize(name) == wanted))
}
