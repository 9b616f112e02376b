//! Project / package group / module hierarchy.
//!
//! Node names are fully qualified by their ancestors (`web`,
//! `web/react`, `web/react/node_modules/react/index.js`) so they stay
//! unique across projects. A group's value is the summed raw size of the
//! modules sharing its short name; a project's value is its bundle total.

use super::{ReportError, csv_writer};
use crate::model::BundleData;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;

pub const TREE_HEADER: [&str; 3] = ["name", "parent", "value"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    /// Empty for project roots.
    pub parent: String,
    pub value: u64,
}

/// Flatten bundles into nodes sorted by parent, then value descending.
pub fn build_tree(bundles: &[BundleData]) -> Vec<TreeNode> {
    let mut nodes = Vec::new();

    for bundle in bundles {
        let project = &bundle.project_name;
        nodes.push(TreeNode {
            name: project.clone(),
            parent: String::new(),
            value: bundle.total_size,
        });

        let mut groups: BTreeMap<&str, u64> = BTreeMap::new();
        for module in &bundle.modules {
            *groups.entry(module.module_name.as_str()).or_default() += module.size_raw;
        }

        for (group, value) in groups {
            nodes.push(TreeNode {
                name: format!("{project}/{group}"),
                parent: project.clone(),
                value,
            });
        }

        for module in &bundle.modules {
            let group = format!("{project}/{}", module.module_name);
            nodes.push(TreeNode {
                name: format!("{group}/{}", module.module),
                parent: group,
                value: module.size_raw,
            });
        }
    }

    nodes.sort_by(|a, b| a.parent.cmp(&b.parent).then_with(|| b.value.cmp(&a.value)));
    nodes
}

pub fn write_tree<W: Write>(bundles: &[BundleData], writer: W) -> Result<(), ReportError> {
    let mut csv = csv_writer(writer);
    csv.write_record(TREE_HEADER)?;
    for node in build_tree(bundles) {
        csv.serialize(node)?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BundlerFamily, ModuleData};

    fn module(path: &str, name: &str, chunk: &str, size: u64) -> ModuleData {
        ModuleData {
            project: "web".to_string(),
            project_type: BundlerFamily::Vite,
            chunk: chunk.to_string(),
            module: path.to_string(),
            module_name: name.to_string(),
            is_node_module: path.contains("node_modules"),
            size_raw: size,
            size_gzip: 0,
            size_brotli: 0,
            percent_of_chunk: 0.0,
            percent_of_project: 0.0,
        }
    }

    fn web() -> BundleData {
        BundleData {
            project_name: "web".to_string(),
            project_type: BundlerFamily::Vite,
            total_size: 1000,
            modules: vec![
                module("node_modules/vue/a.js", "vue", "index", 300),
                module("src/main.ts", "main.ts", "index", 100),
                module("node_modules/vue/b.js", "vue", "about", 200),
            ],
        }
    }

    #[test]
    fn three_levels_with_qualified_names() {
        let nodes = build_tree(&[web()]);
        let find = |name: &str| nodes.iter().find(|n| n.name == name).unwrap();

        assert_eq!(find("web").parent, "");
        assert_eq!(find("web").value, 1000);
        assert_eq!(find("web/vue").value, 500);
        assert_eq!(find("web/vue").parent, "web");
        assert_eq!(find("web/vue/node_modules/vue/a.js").parent, "web/vue");
        assert_eq!(find("web/main.ts/src/main.ts").value, 100);
        assert_eq!(nodes.len(), 1 + 2 + 3);
    }

    #[test]
    fn sorted_by_parent_then_value() {
        let nodes = build_tree(&[web()]);
        let order: Vec<_> = nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(
            order,
            vec![
                "web",
                "web/vue",
                "web/main.ts",
                "web/main.ts/src/main.ts",
                "web/vue/node_modules/vue/a.js",
                "web/vue/node_modules/vue/b.js",
            ]
        );
    }

    #[test]
    fn csv_output() {
        let mut out = Vec::new();
        write_tree(&[BundleData::empty("solo", BundlerFamily::Nextjs)], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "name,parent,value\nsolo,,0\n");
    }
}
