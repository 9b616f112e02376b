//! Short-name and third-party classification for module paths.
//!
//! ```
//! use measure_core::module_name::{extract_module_name, is_node_module};
//!
//! assert_eq!(extract_module_name("node_modules/lodash/lodash.js"), "lodash");
//! assert_eq!(
//!     extract_module_name("node_modules/@vue/reactivity/dist/reactivity.esm.js"),
//!     "@vue/reactivity"
//! );
//! assert_eq!(extract_module_name("src/components/App.tsx"), "App.tsx");
//! assert!(is_node_module("/repo/node_modules/react/index.js"));
//! ```

/// Path segment that marks third-party dependency code.
pub const NODE_MODULES: &str = "node_modules";

/// Derive the short module name from a full module path.
///
/// The segment after the last `node_modules` is the package name (two
/// segments for `@scope/name` packages). Paths without the marker yield
/// their final segment.
pub fn extract_module_name(module_path: &str) -> String {
    let parts: Vec<&str> = module_path.split(['/', '\\']).collect();

    let Some(marker) = parts.iter().rposition(|p| *p == NODE_MODULES) else {
        return match parts.last() {
            Some(last) if !last.is_empty() => (*last).to_string(),
            _ => module_path.to_string(),
        };
    };

    let package = &parts[marker + 1..];
    match package.first() {
        Some(scope) if scope.starts_with('@') => match package.get(1) {
            Some(name) => format!("{}/{}", scope, name),
            None => (*scope).to_string(),
        },
        Some(name) if !name.is_empty() => (*name).to_string(),
        _ => module_path.to_string(),
    }
}

/// Whether the module originates from an installed dependency.
pub fn is_node_module(module_path: &str) -> bool {
    module_path.contains(NODE_MODULES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_package() {
        assert_eq!(extract_module_name("node_modules/lodash/dist/lodash.js"), "lodash");
    }

    #[test]
    fn scoped_package() {
        assert_eq!(
            extract_module_name("/repo/node_modules/@tanstack/query-core/build/index.js"),
            "@tanstack/query-core"
        );
    }

    #[test]
    fn nested_node_modules_uses_last_marker() {
        assert_eq!(
            extract_module_name("node_modules/a/node_modules/b/index.js"),
            "b"
        );
    }

    #[test]
    fn windows_separators() {
        assert_eq!(
            extract_module_name(r"C:\repo\node_modules\react-dom\index.js"),
            "react-dom"
        );
        assert_eq!(extract_module_name(r"src\main.ts"), "main.ts");
    }

    #[test]
    fn project_file_uses_filename() {
        assert_eq!(extract_module_name("./src/routes/+page.svelte"), "+page.svelte");
        assert_eq!(extract_module_name("index.js"), "index.js");
    }

    #[test]
    fn degenerate_paths_fall_back_to_full_path() {
        assert_eq!(extract_module_name("src/"), "src/");
        assert_eq!(extract_module_name("node_modules/"), "node_modules/");
        assert_eq!(extract_module_name(""), "");
    }

    #[test]
    fn scope_without_name() {
        assert_eq!(extract_module_name("node_modules/@scope"), "@scope");
    }

    #[test]
    fn third_party_detection() {
        assert!(is_node_module("node_modules/react/index.js"));
        assert!(is_node_module("./node_modules/.pnpm/react@18/node_modules/react/index.js"));
        assert!(!is_node_module("src/App.tsx"));
    }
}
