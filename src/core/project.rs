//! Project-level migration steps: build config inspection and the babel
//! config scaffold.

use std::path::{Path, PathBuf};

use swc_ecma_ast::{
    AssignOp, AssignTarget, Decl, ExportDecl, Expr, MemberProp, Module, ModuleDecl, ModuleItem,
    Pat, SimpleAssignTarget, Stmt,
};

use crate::core::extract::reducer::unwrap_transparent;
use crate::core::extract::{ConfigValue, Reduced, reduce_config};
use crate::core::fs::SourceFs;
use crate::core::parsers::jsx::parse_jsx_source;

pub const BABEL_CONFIG_FILE: &str = "babel.config.js";
pub const TSCONFIG_FILE: &str = "tsconfig.json";

const PROJECT_CONFIG_BINDING: &str = "config";

/// A build config option that needs attention after migrating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    /// `weapp` was renamed to `mini`.
    WeappRenamed,
    /// `weapp.module` is gone; its options move up into `mini`.
    WeappModuleFlattened,
    /// `h5.module` is gone; its options move up into `h5`.
    H5ModuleFlattened,
    /// Taro 3 needs an explicit `framework`.
    FrameworkMissing,
    /// The `babel` option is replaced by `babel.config.js`.
    BabelDeprecated,
}

impl Advisory {
    pub fn message(&self, framework: &str) -> String {
        match self {
            Advisory::WeappRenamed => {
                "config has \"weapp\", which was renamed to \"mini\" in Taro 2".to_string()
            }
            Advisory::WeappModuleFlattened => {
                "\"weapp.module\" is deprecated, options such as postcss move directly under \"mini\""
                    .to_string()
            }
            Advisory::H5ModuleFlattened => {
                "\"h5.module\" is deprecated, options such as postcss move directly under \"h5\""
                    .to_string()
            }
            Advisory::FrameworkMissing => {
                format!("add framework: '{}' to the project config for Taro 3", framework)
            }
            Advisory::BabelDeprecated => {
                "the \"babel\" option is deprecated and can be removed".to_string()
            }
        }
    }
}

/// Result of looking at the project build config.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectConfigInspection {
    pub path: PathBuf,
    /// Set when the file exists but cannot be read or parsed; no advisories then.
    pub parse_error: Option<String>,
    pub advisories: Vec<Advisory>,
}

/// Inspect an existing project build config file.
///
/// The config object is reduced leniently: non-literal values are left out
/// without findings, but their keys still count as present.
pub fn inspect_project_config<F: SourceFs + ?Sized>(
    fs: &F,
    path: &Path,
    target_version: u32,
) -> ProjectConfigInspection {
    let failed = |error: String| ProjectConfigInspection {
        path: path.to_path_buf(),
        parse_error: Some(error),
        advisories: Vec::new(),
    };
    let code = match fs.read_text(path) {
        Ok(code) => code,
        Err(err) => return failed(format!("{:#}", err)),
    };
    let module = match parse_jsx_source(code, &path.to_string_lossy()) {
        Ok(module) => module,
        Err(err) => return failed(err.to_string()),
    };

    let reduced = find_project_config(&module).map(reduce_config);
    let advisories = reduced
        .map(|reduced| advisories_for(&reduced, target_version))
        .unwrap_or_default();

    ProjectConfigInspection {
        path: path.to_path_buf(),
        parse_error: None,
        advisories,
    }
}

fn advisories_for(config: &Reduced, target_version: u32) -> Vec<Advisory> {
    let mut advisories = Vec::new();
    if has_key_path(config, &["weapp"]) {
        advisories.push(Advisory::WeappRenamed);
        if has_key_path(config, &["weapp", "module"]) {
            advisories.push(Advisory::WeappModuleFlattened);
        }
    }
    if has_key_path(config, &["h5", "module"]) {
        advisories.push(Advisory::H5ModuleFlattened);
    }
    if target_version == 3 {
        if !has_key_path(config, &["framework"]) {
            advisories.push(Advisory::FrameworkMissing);
        }
        if has_key_path(config, &["babel"]) {
            advisories.push(Advisory::BabelDeprecated);
        }
    }
    advisories
}

/// Whether the key path is set, either to a literal or to an omitted value.
fn has_key_path(config: &Reduced, keys: &[&str]) -> bool {
    let mut current: Option<&ConfigValue> = Some(&config.value);
    for key in keys {
        current = current.and_then(|value| value.get(key));
    }
    if current.is_some_and(|value| !value.is_null()) {
        return true;
    }

    let dotted = keys.join(".");
    config.omitted.iter().any(|omitted| {
        omitted.key_path == dotted
            || omitted
                .key_path
                .strip_prefix(&dotted)
                .is_some_and(|rest| rest.starts_with('.') || rest.starts_with('['))
    })
}

/// The object literal holding the project config.
///
/// Looks for a top-level `const config = {...}` first (the generated layout,
/// where `module.exports` is a merge function), then `module.exports = {...}`
/// and `export default {...}`.
fn find_project_config(module: &Module) -> Option<&Expr> {
    let mut exported = None;

    for item in &module.body {
        match item {
            ModuleItem::Stmt(Stmt::Decl(Decl::Var(var)))
            | ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(ExportDecl {
                decl: Decl::Var(var),
                ..
            })) => {
                for decl in &var.decls {
                    if let Pat::Ident(binding) = &decl.name
                        && binding.id.sym.as_str() == PROJECT_CONFIG_BINDING
                        && let Some(init) = &decl.init
                        && is_object(init)
                    {
                        return Some(&**init);
                    }
                }
            }
            ModuleItem::Stmt(Stmt::Expr(stmt)) => {
                if let Expr::Assign(assign) = &*stmt.expr
                    && assign.op == AssignOp::Assign
                    && is_module_exports(&assign.left)
                    && is_object(&assign.right)
                {
                    exported = Some(&*assign.right);
                }
            }
            ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(export)) => {
                if is_object(&export.expr) {
                    exported = Some(&*export.expr);
                }
            }
            _ => {}
        }
    }

    exported
}

fn is_object(expr: &Expr) -> bool {
    matches!(unwrap_transparent(expr), Expr::Object(_))
}

fn is_module_exports(target: &AssignTarget) -> bool {
    let AssignTarget::Simple(SimpleAssignTarget::Member(member)) = target else {
        return false;
    };
    matches!(&*member.obj, Expr::Ident(obj) if obj.sym.as_str() == "module")
        && matches!(&member.prop, MemberProp::Ident(prop) if prop.sym.as_str() == "exports")
}

/// Content of the generated `babel.config.js`.
pub fn render_babel_config(framework: &str, ts: bool) -> String {
    format!(
        r#"// babel-preset-taro options and defaults:
// https://github.com/NervJS/taro/blob/next/packages/babel-preset-taro/README.md
module.exports = {{
  presets: [
    ['taro', {{
      framework: '{}',
      ts: {}
    }}]
  ]
}}
"#,
        framework, ts
    )
}
