//! The static template catalog

use serde::Serialize;

/// GitHub owner all template repositories live under; the degit slug is
/// `<TEMPLATE_OWNER>/<template id>`.
pub const TEMPLATE_OWNER: &str = "starterhq";

/// One scaffoldable template.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Template {
    pub value: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

/// Catalog shown by `--list-templates` and the interactive select.
pub static TEMPLATES: [Template; 8] = [
    Template {
        value: "starter-ts",
        label: "TypeScript Starter",
        hint: Some("library / CLI tooling"),
    },
    Template {
        value: "vitesse",
        label: "Vitesse",
        hint: Some("opinionated Vite + Vue"),
    },
    Template {
        value: "vitesse-lite",
        label: "Vitesse Lite",
        hint: Some("lightweight Vite + Vue"),
    },
    Template {
        value: "starter-vue",
        label: "Vue Starter",
        hint: Some("Vue 3 + Vite"),
    },
    Template {
        value: "starter-react",
        label: "React Starter",
        hint: Some("React + Vite"),
    },
    Template {
        value: "starter-node",
        label: "Node Starter",
        hint: Some("plain Node service"),
    },
    Template {
        value: "starter-vscode",
        label: "VS Code Extension",
        hint: Some("extension scaffold"),
    },
    Template {
        value: "starter-monorepo",
        label: "Monorepo Starter",
        hint: Some("pnpm workspaces"),
    },
];

pub fn find(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.value == id)
}

/// `value<TAB>label` lines for the plain listing.
pub fn render_list() -> String {
    TEMPLATES
        .iter()
        .map(|t| format!("{}\t{}", t.value, t.label))
        .collect::<Vec<_>>()
        .join("\n")
}

/// JSON array of `{value, label, hint?}` entries.
pub fn render_list_json() -> String {
    serde_json::to_string(&TEMPLATES).unwrap_or_else(|_| "[]".to_string())
}
