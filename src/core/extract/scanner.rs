//! Module scanner: config declaration, import bindings and custom component
//! usages, collected in a single AST traversal.
//!
//! The visitor rules are independent of source order. Config assignments
//! (`Index.config = {...}`) and JSX tags are recorded during the walk and
//! correlated with the default-export name and the import bindings once the
//! walk is complete, so `Index.config = ...` written above `export default Index`
//! and JSX written above a (hoisted) import are both handled.

use std::collections::HashMap;

use swc_ecma_ast::{
    AssignExpr, AssignOp, AssignTarget, ClassProp, DefaultDecl, ExportDefaultDecl,
    ExportDefaultExpr, ExportSpecifier, Expr, ImportDecl, ImportSpecifier, JSXElementName,
    JSXOpeningElement, Lit, MemberProp, Module, ModuleExportName, NamedExport, SimpleAssignTarget,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::builtin::is_builtin_component;
use super::reducer::{ConfigValue, NonLiteralValue, Reduced, prop_name_key, reduce_config, unwrap_transparent};

const CONFIG_FIELD: &str = "config";

/// A JSX tag bound to an imported module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomComponent {
    /// Local tag name (`Foo` in `<Foo />`).
    pub name: String,
    /// Import specifier as written (`../comp/foo`).
    pub specifier: String,
}

/// Result of scanning a single module.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleScan {
    /// The file's config; an empty mapping when no declaration was found.
    pub config: ConfigValue,
    /// Values dropped from the config because they are not literals.
    pub omitted: Vec<NonLiteralValue>,
    /// Custom components in order of first JSX usage.
    pub custom_components: Vec<CustomComponent>,
}

impl ModuleScan {
    /// `usingComponents` declared by the config, if it is a mapping.
    pub fn declared_using_components(&self) -> Option<&serde_json::Map<String, ConfigValue>> {
        self.config.get("usingComponents").and_then(|v| v.as_object())
    }
}

/// Scan a parsed module.
pub fn scan_module(module: &Module) -> ModuleScan {
    let mut scanner = ModuleScanner::default();
    module.visit_with(&mut scanner);
    scanner.finish()
}

#[derive(Default)]
struct ModuleScanner {
    /// First `config` class field.
    class_config: Option<Reduced>,
    /// Every `<ident>.config = <expr>` assignment, in source order.
    config_assignments: Vec<(String, Reduced)>,
    default_export_name: Option<String>,
    /// Local name -> module specifier, for `import Foo from '...'`.
    default_imports: HashMap<String, String>,
    /// Local name -> module specifier, for `import { Foo } from '...'` and `import * as Foo`.
    named_imports: HashMap<String, String>,
    /// Plain-identifier JSX tag names, first usage first.
    jsx_tags: Vec<String>,
}

impl ModuleScanner {
    fn finish(self) -> ModuleScan {
        let assigned = self.default_export_name.as_ref().and_then(|export_name| {
            self.config_assignments
                .into_iter()
                .rev()
                .find(|(object, _)| object == export_name)
                .map(|(_, reduced)| reduced)
        });

        let Reduced { value, omitted } = assigned.or(self.class_config).unwrap_or_else(|| Reduced {
            value: ConfigValue::Object(serde_json::Map::new()),
            omitted: Vec::new(),
        });

        let custom_components = self
            .jsx_tags
            .into_iter()
            .filter(|tag| !is_builtin_component(tag))
            .filter_map(|tag| {
                let specifier = self
                    .default_imports
                    .get(&tag)
                    .or_else(|| self.named_imports.get(&tag))?
                    .clone();
                Some(CustomComponent {
                    name: tag,
                    specifier,
                })
            })
            .collect();

        ModuleScan {
            config: value,
            omitted,
            custom_components,
        }
    }
}

impl Visit for ModuleScanner {
    fn visit_class_prop(&mut self, node: &ClassProp) {
        if self.class_config.is_none()
            && prop_name_key(&node.key).as_deref() == Some(CONFIG_FIELD)
            && let Some(value) = &node.value
        {
            self.class_config = Some(reduce_config(value));
        }
        node.visit_children_with(self);
    }

    fn visit_export_default_decl(&mut self, node: &ExportDefaultDecl) {
        match &node.decl {
            DefaultDecl::Class(class_expr) => {
                self.default_export_name = class_expr.ident.as_ref().map(|i| i.sym.to_string());
            }
            DefaultDecl::Fn(fn_expr) => {
                self.default_export_name = fn_expr.ident.as_ref().map(|i| i.sym.to_string());
            }
            _ => {}
        }
        node.visit_children_with(self);
    }

    fn visit_export_default_expr(&mut self, node: &ExportDefaultExpr) {
        if let Expr::Ident(ident) = unwrap_transparent(&node.expr) {
            self.default_export_name = Some(ident.sym.to_string());
        }
        node.visit_children_with(self);
    }

    fn visit_named_export(&mut self, node: &NamedExport) {
        if node.src.is_some() {
            return;
        }
        for specifier in &node.specifiers {
            if let ExportSpecifier::Named(named) = specifier
                && let Some(ModuleExportName::Ident(exported)) = &named.exported
                && exported.sym.as_str() == "default"
                && let ModuleExportName::Ident(orig) = &named.orig
            {
                self.default_export_name = Some(orig.sym.to_string());
            }
        }
    }

    fn visit_assign_expr(&mut self, node: &AssignExpr) {
        if node.op == AssignOp::Assign
            && let AssignTarget::Simple(SimpleAssignTarget::Member(member)) = &node.left
            && let Expr::Ident(object) = &*member.obj
            && is_config_prop(&member.prop)
        {
            self.config_assignments
                .push((object.sym.to_string(), reduce_config(&node.right)));
        }
        node.visit_children_with(self);
    }

    fn visit_import_decl(&mut self, node: &ImportDecl) {
        if node.type_only {
            return;
        }
        let module_path = node.src.value.to_string_lossy().into_owned();
        for specifier in &node.specifiers {
            match specifier {
                ImportSpecifier::Default(default) => {
                    self.default_imports
                        .insert(default.local.sym.to_string(), module_path.clone());
                }
                ImportSpecifier::Named(named) if !named.is_type_only => {
                    self.named_imports
                        .insert(named.local.sym.to_string(), module_path.clone());
                }
                ImportSpecifier::Named(_) => {}
                ImportSpecifier::Namespace(ns) => {
                    self.named_imports
                        .insert(ns.local.sym.to_string(), module_path.clone());
                }
            }
        }
    }

    fn visit_jsx_opening_element(&mut self, node: &JSXOpeningElement) {
        if let JSXElementName::Ident(ident) = &node.name {
            let tag = ident.sym.as_str();
            if !self.jsx_tags.iter().any(|t| t == tag) {
                self.jsx_tags.push(tag.to_string());
            }
        }
        node.visit_children_with(self);
    }
}

fn is_config_prop(prop: &MemberProp) -> bool {
    match prop {
        MemberProp::Ident(ident) => ident.sym.as_str() == CONFIG_FIELD,
        MemberProp::Computed(computed) => matches!(
            unwrap_transparent(&computed.expr),
            Expr::Lit(Lit::Str(s)) if s.value.as_str() == Some(CONFIG_FIELD)
        ),
        MemberProp::PrivateName(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parsers::jsx::parse_jsx_source;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn scan(code: &str) -> ModuleScan {
        let module = parse_jsx_source(code.to_string(), "test.tsx").unwrap();
        scan_module(&module)
    }

    fn component(name: &str, specifier: &str) -> CustomComponent {
        CustomComponent {
            name: name.to_string(),
            specifier: specifier.to_string(),
        }
    }

    #[test]
    fn test_class_field_config() {
        let result = scan(
            r#"
import Taro, { Component } from '@tarojs/taro'
export default class Index extends Component {
  config = {
    navigationBarTitleText: 'Home',
    usingComponents: { 'ec-canvas': '../../ec-canvas/ec-canvas' }
  }
  render () { return null }
}
"#,
        );
        assert_eq!(
            result.config,
            json!({
                "navigationBarTitleText": "Home",
                "usingComponents": { "ec-canvas": "../../ec-canvas/ec-canvas" }
            })
        );
        assert!(result.omitted.is_empty());
    }

    #[test]
    fn test_static_class_field_with_type_annotation() {
        let result = scan(
            r#"
import { Config } from '@tarojs/taro'
class Index {
  static config: Config = { navigationBarTitleText: 'Typed' }
}
export default Index
"#,
        );
        assert_eq!(result.config, json!({ "navigationBarTitleText": "Typed" }));
    }

    #[test]
    fn test_first_class_field_wins() {
        let result = scan(
            r#"
class A { config = { a: 1 } }
class B { config = { b: 2 } }
"#,
        );
        assert_eq!(result.config, json!({ "a": 1 }));
    }

    #[test]
    fn test_assignment_to_default_export_function() {
        let result = scan(
            r#"
export default function Index () { return <View /> }
Index.config = { navigationBarTitleText: 'Hooks' }
"#,
        );
        assert_eq!(result.config, json!({ "navigationBarTitleText": "Hooks" }));
    }

    #[test]
    fn test_assignment_before_default_export_identifier() {
        let result = scan(
            r#"
function Index () { return <View /> }
Index.config = { navigationBarTitleText: 'Before' }
export default Index
"#,
        );
        assert_eq!(result.config, json!({ "navigationBarTitleText": "Before" }));
    }

    #[test]
    fn test_assignment_to_named_default_export() {
        let result = scan(
            r#"
const Page = () => null
Page['config'] = { title: 'named' }
export { Page as default }
"#,
        );
        assert_eq!(result.config, json!({ "title": "named" }));
    }

    #[test]
    fn test_assignment_to_other_identifier_is_ignored() {
        let result = scan(
            r#"
function Helper () {}
Helper.config = { title: 'helper' }
export default function Index () {}
"#,
        );
        assert_eq!(result.config, json!({}));
    }

    #[test]
    fn test_assignment_overrides_class_field() {
        let result = scan(
            r#"
class Index { config = { from: 'field' } }
Index.config = { from: 'assignment' }
export default Index
"#,
        );
        assert_eq!(result.config, json!({ "from": "assignment" }));
    }

    #[test]
    fn test_missing_config_defaults_to_empty_mapping() {
        let result = scan("export default function Index () { return <View>hi</View> }");
        assert_eq!(result.config, json!({}));
        assert!(result.custom_components.is_empty());
    }

    #[test]
    fn test_custom_components_from_default_and_named_imports() {
        let result = scan(
            r#"
import { View } from '@tarojs/components'
import Foo from '../comp/foo'
import { Bar, Baz as Qux } from './widgets'
import * as Lib from './lib'
export default function Index () {
  return (
    <View>
      <Bar />
      <Foo title={<Qux />} />
      <Foo />
      <Lib />
      <Unknown />
    </View>
  )
}
"#,
        );
        assert_eq!(
            result.custom_components,
            vec![
                component("Bar", "./widgets"),
                component("Foo", "../comp/foo"),
                component("Qux", "./widgets"),
                component("Lib", "./lib"),
            ]
        );
    }

    #[test]
    fn test_builtin_tags_are_never_custom() {
        let result = scan(
            r#"
import View from './my-view'
import { Button, Text } from './my-controls'
export default () => <View><Button /><Text /></View>
"#,
        );
        assert!(result.custom_components.is_empty());
    }

    #[test]
    fn test_member_and_lowercase_tags() {
        let result = scan(
            r#"
import Ui from './ui'
import card from './card'
export default () => <div><Ui.Card /><card /></div>
"#,
        );
        assert_eq!(result.custom_components, vec![component("card", "./card")]);
    }

    #[test]
    fn test_type_only_imports_are_not_bindings() {
        let result = scan(
            r#"
import type Foo from './foo'
import { type Bar } from './bar'
export default () => <><Foo /><Bar /></>
"#,
        );
        assert!(result.custom_components.is_empty());
    }

    #[test]
    fn test_non_literal_config_values_are_reported() {
        let result = scan(
            r#"
import { TITLE } from './constants'
export default class Index {
  config = { navigationBarTitleText: TITLE, enablePullDownRefresh: true }
}
"#,
        );
        assert_eq!(result.config, json!({ "enablePullDownRefresh": true }));
        assert_eq!(
            result.omitted,
            vec![NonLiteralValue {
                key_path: "navigationBarTitleText".into(),
                kind: "identifier reference"
            }]
        );
    }
}
