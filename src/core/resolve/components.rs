//! Component resolution graph.
//!
//! Starting from a page, every custom component used in JSX is resolved to its
//! source file and scanned. Its declared `usingComponents` are re-expressed
//! relative to the page and merged into one flattened map, then its own custom
//! components are resolved the same way, all the way down.
//!
//! Resolution is best-effort: components that do not resolve or do not parse
//! drop their branch and are recorded as issues. A per-page visited set keeps
//! every component file from being scanned twice; reaching a file that is
//! still being resolved higher up the chain is a cycle and truncates that
//! branch.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use serde_json::Map;

use crate::core::extract::{
    ConfigValue, CustomComponent, FileScan, ModuleScan, NonLiteralValue, scan_file,
};
use crate::core::fs::SourceFs;
use crate::core::resolve::script_path::resolve_script_path;
use crate::issues::{
    ComponentCycleIssue, Issue, MissingComponentIssue, NonLiteralConfigIssue, ParseErrorIssue,
};
use crate::utils::{display_path, is_relative_specifier, module_reference};

pub const USING_COMPONENTS: &str = "usingComponents";

/// Page-scoped `usingComponents` accumulator.
///
/// Entries are only ever added or updated; a later write for a key replaces
/// the value but keeps the key's original position.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UsingComponents(Map<String, ConfigValue>);

impl UsingComponents {
    /// Seed from the statically declared map of the page, if any.
    pub fn from_declared(declared: Option<&Map<String, ConfigValue>>) -> Self {
        Self(declared.cloned().unwrap_or_default())
    }

    pub fn insert(&mut self, key: &str, reference: String) {
        self.0.insert(key.to_string(), ConfigValue::String(reference));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_value(self) -> ConfigValue {
        ConfigValue::Object(self.0)
    }
}

/// Files visited while resolving one page.
struct Trail {
    /// Files whose resolution is in progress, page first.
    stack: Vec<PathBuf>,
    /// Component files already resolved (or in progress) for this page.
    visited: HashSet<PathBuf>,
}

impl Trail {
    fn new(page_path: &Path) -> Self {
        Self {
            stack: vec![page_path.to_path_buf()],
            visited: HashSet::new(),
        }
    }
}

/// Resolves pages against the component graph, collecting issues on the way.
pub struct ComponentResolver<'a, F: SourceFs + ?Sized> {
    fs: &'a F,
    platform: Option<&'a str>,
    /// Base for paths shown in issues.
    display_root: &'a Path,
    issues: Vec<Issue>,
}

impl<'a, F: SourceFs + ?Sized> ComponentResolver<'a, F> {
    pub fn new(fs: &'a F, platform: Option<&'a str>, display_root: &'a Path) -> Self {
        Self {
            fs,
            platform,
            display_root,
            issues: Vec::new(),
        }
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    /// Resolve a page file to its config, with a fully resolved `usingComponents`.
    ///
    /// Returns `None` when the page itself cannot be read or parsed (recorded
    /// as an issue).
    pub fn resolve_page(&mut self, page_path: &Path) -> Option<ConfigValue> {
        let scan = self.scan(page_path)?;

        let page_dir = parent_dir(page_path);
        let mut using = UsingComponents::from_declared(scan.declared_using_components());
        let mut trail = Trail::new(page_path);

        for usage in &scan.custom_components {
            if let Some(component_path) = self.resolve_usage(page_path, usage) {
                self.resolve_component(&component_path, &page_dir, &mut using, &mut trail);
            }
        }

        let mut config = scan.config;
        if !using.is_empty()
            && let Some(obj) = config.as_object_mut()
        {
            obj.insert(USING_COMPONENTS.to_string(), using.into_value());
        }
        Some(config)
    }

    /// Scan a component and merge what it contributes into `using`, then
    /// recurse into the components it renders.
    ///
    /// Declared entries are written relative to `page_dir`, not to the component.
    fn resolve_component(
        &mut self,
        component_path: &Path,
        page_dir: &Path,
        using: &mut UsingComponents,
        trail: &mut Trail,
    ) {
        if let Some(start) = trail.stack.iter().position(|p| p == component_path) {
            let mut chain: Vec<String> = trail.stack[start..]
                .iter()
                .map(|p| display_path(self.display_root, p))
                .collect();
            chain.push(display_path(self.display_root, component_path));
            self.issues.push(Issue::ComponentCycle(ComponentCycleIssue {
                page_path: display_path(self.display_root, &trail.stack[0]),
                chain,
            }));
            return;
        }
        if !trail.visited.insert(component_path.to_path_buf()) {
            return;
        }

        let Some(scan) = self.scan(component_path) else {
            return;
        };

        if let Some(declared) = scan.declared_using_components() {
            let component_dir = parent_dir(component_path);
            for (key, value) in declared {
                let Some(specifier) = value.as_str() else {
                    continue;
                };
                if !is_relative_specifier(specifier) {
                    using.insert(key, specifier.to_string());
                    continue;
                }
                match resolve_script_path(self.fs, &component_dir.join(specifier), self.platform) {
                    Some(target) => using.insert(key, module_reference(page_dir, &target)),
                    None => self.missing_component(component_path, key, specifier),
                }
            }
        }

        trail.stack.push(component_path.to_path_buf());
        for usage in &scan.custom_components {
            if let Some(nested) = self.resolve_usage(component_path, usage) {
                self.resolve_component(&nested, page_dir, using, trail);
            }
        }
        trail.stack.pop();
    }

    /// Resolve a JSX usage to the component's source file.
    ///
    /// Package imports are not project components and resolve to nothing,
    /// silently; relative imports that do not exist are recorded.
    fn resolve_usage(&mut self, from_file: &Path, usage: &CustomComponent) -> Option<PathBuf> {
        if !is_relative_specifier(&usage.specifier) {
            return None;
        }
        let logical = parent_dir(from_file).join(&usage.specifier);
        let resolved = resolve_script_path(self.fs, &logical, self.platform);
        if resolved.is_none() {
            self.missing_component(from_file, &usage.name, &usage.specifier);
        }
        resolved
    }

    fn scan(&mut self, path: &Path) -> Option<ModuleScan> {
        match scan_file(self.fs, path) {
            FileScan::Scanned(scan) => {
                self.record_omitted(path, &scan.omitted);
                Some(scan)
            }
            FileScan::ParseFailed(error) => {
                self.issues.push(Issue::ParseError(ParseErrorIssue {
                    file_path: display_path(self.display_root, path),
                    error,
                }));
                None
            }
        }
    }

    fn record_omitted(&mut self, path: &Path, omitted: &[NonLiteralValue]) {
        for value in omitted {
            self.issues.push(Issue::NonLiteralConfig(NonLiteralConfigIssue {
                file_path: display_path(self.display_root, path),
                key_path: value.key_path.clone(),
                kind: value.kind.to_string(),
            }));
        }
    }

    fn missing_component(&mut self, from_file: &Path, name: &str, specifier: &str) {
        self.issues.push(Issue::MissingComponent(MissingComponentIssue {
            file_path: display_path(self.display_root, from_file),
            name: name.to_string(),
            specifier: specifier.to_string(),
        }));
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}
