//! Literal object reducer.
//!
//! Projects an object/array/literal expression onto a [`ConfigValue`]. Only
//! syntax that evaluates to itself is accepted; anything computed (calls,
//! identifier references, spreads, computed keys, template substitutions...)
//! is omitted from the result and reported as a [`NonLiteralValue`], so the
//! produced config is never silently wrong.
//!
//! JSON semantics apply where JavaScript and JSON disagree: `undefined`
//! properties are dropped, `undefined` array elements and holes become `null`,
//! and non-finite numbers become `null`.

use serde_json::{Map, Number, Value};
use swc_ecma_ast::{ArrayLit, Expr, Lit, ObjectLit, Prop, PropName, PropOrSpread, UnaryOp};

/// Semantic config value. Mappings keep insertion order (`preserve_order`).
pub type ConfigValue = Value;

/// A value that was omitted because it is not a literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonLiteralValue {
    /// Dotted key path (`window.title`, `pages[2]`); `config` for the root.
    pub key_path: String,
    /// What was found instead of a literal.
    pub kind: &'static str,
}

/// Result of reducing one config expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduced {
    pub value: ConfigValue,
    pub omitted: Vec<NonLiteralValue>,
}

enum Reduction {
    Value(ConfigValue),
    Undefined,
    NonLiteral(&'static str),
}

/// Reduce a config expression.
///
/// A root that is not an object (or is not a literal at all) still yields a
/// value: literals are returned as-is, and a non-literal root yields `{}`.
pub fn reduce_config(expr: &Expr) -> Reduced {
    let mut omitted = Vec::new();
    let value = match reduce(expr, "", &mut omitted) {
        Reduction::Value(value) => value,
        Reduction::Undefined => Value::Object(Map::new()),
        Reduction::NonLiteral(kind) => {
            omitted.push(NonLiteralValue {
                key_path: "config".to_string(),
                kind,
            });
            Value::Object(Map::new())
        }
    };
    Reduced { value, omitted }
}

fn reduce(expr: &Expr, path: &str, omitted: &mut Vec<NonLiteralValue>) -> Reduction {
    match unwrap_transparent(expr) {
        Expr::Object(obj) => Reduction::Value(reduce_object(obj, path, omitted)),
        Expr::Array(arr) => Reduction::Value(reduce_array(arr, path, omitted)),
        Expr::Lit(lit) => reduce_lit(lit),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => {
            match tpl.quasis.first().and_then(|q| q.cooked.as_ref()) {
                Some(cooked) => Reduction::Value(Value::String(cooked.to_string_lossy().into_owned())),
                None => Reduction::NonLiteral("template literal"),
            }
        }
        Expr::Tpl(_) => Reduction::NonLiteral("template literal with substitutions"),
        Expr::Unary(unary) => match (unary.op, unwrap_transparent(&unary.arg)) {
            (UnaryOp::Minus, Expr::Lit(Lit::Num(n))) => Reduction::Value(number_value(-n.value)),
            (UnaryOp::Plus, Expr::Lit(Lit::Num(n))) => Reduction::Value(number_value(n.value)),
            _ => Reduction::NonLiteral("unary expression"),
        },
        Expr::Ident(ident) => match ident.sym.as_str() {
            "undefined" => Reduction::Undefined,
            "NaN" | "Infinity" => Reduction::Value(Value::Null),
            _ => Reduction::NonLiteral("identifier reference"),
        },
        Expr::Call(_) | Expr::New(_) | Expr::OptChain(_) => Reduction::NonLiteral("function call"),
        Expr::Member(_) => Reduction::NonLiteral("member expression"),
        Expr::Arrow(_) | Expr::Fn(_) => Reduction::NonLiteral("function"),
        Expr::Cond(_) => Reduction::NonLiteral("conditional expression"),
        Expr::Bin(_) => Reduction::NonLiteral("binary expression"),
        _ => Reduction::NonLiteral("expression"),
    }
}

fn reduce_object(obj: &ObjectLit, path: &str, omitted: &mut Vec<NonLiteralValue>) -> ConfigValue {
    let mut map = Map::new();

    for prop in &obj.props {
        let prop = match prop {
            PropOrSpread::Spread(_) => {
                omitted.push(NonLiteralValue {
                    key_path: child_path(path, "..."),
                    kind: "spread",
                });
                continue;
            }
            PropOrSpread::Prop(prop) => &**prop,
        };

        match prop {
            Prop::KeyValue(kv) => {
                let Some(key) = prop_name_key(&kv.key) else {
                    omitted.push(NonLiteralValue {
                        key_path: child_path(path, "[computed]"),
                        kind: "computed key",
                    });
                    continue;
                };
                let key_path = child_path(path, &key);
                match reduce(&kv.value, &key_path, omitted) {
                    Reduction::Value(value) => {
                        map.insert(key, value);
                    }
                    Reduction::Undefined => {}
                    Reduction::NonLiteral(kind) => omitted.push(NonLiteralValue { key_path, kind }),
                }
            }
            Prop::Shorthand(ident) => omitted.push(NonLiteralValue {
                key_path: child_path(path, ident.sym.as_str()),
                kind: "identifier reference",
            }),
            Prop::Method(method) => omitted.push(NonLiteralValue {
                key_path: child_path(path, &prop_name_key(&method.key).unwrap_or_default()),
                kind: "method",
            }),
            Prop::Getter(getter) => omitted.push(NonLiteralValue {
                key_path: child_path(path, &prop_name_key(&getter.key).unwrap_or_default()),
                kind: "getter",
            }),
            Prop::Setter(setter) => omitted.push(NonLiteralValue {
                key_path: child_path(path, &prop_name_key(&setter.key).unwrap_or_default()),
                kind: "setter",
            }),
            Prop::Assign(assign) => omitted.push(NonLiteralValue {
                key_path: child_path(path, assign.key.sym.as_str()),
                kind: "assignment",
            }),
        }
    }

    Value::Object(map)
}

fn reduce_array(arr: &ArrayLit, path: &str, omitted: &mut Vec<NonLiteralValue>) -> ConfigValue {
    let mut items = Vec::with_capacity(arr.elems.len());

    for (index, elem) in arr.elems.iter().enumerate() {
        let key_path = format!("{}[{}]", path, index);
        let Some(elem) = elem else {
            items.push(Value::Null);
            continue;
        };
        if elem.spread.is_some() {
            omitted.push(NonLiteralValue {
                key_path,
                kind: "spread",
            });
            continue;
        }
        match reduce(&elem.expr, &key_path, omitted) {
            Reduction::Value(value) => items.push(value),
            Reduction::Undefined => items.push(Value::Null),
            Reduction::NonLiteral(kind) => omitted.push(NonLiteralValue { key_path, kind }),
        }
    }

    Value::Array(items)
}

fn reduce_lit(lit: &Lit) -> Reduction {
    match lit {
        Lit::Str(s) => Reduction::Value(Value::String(s.value.to_string_lossy().into_owned())),
        Lit::Num(n) => Reduction::Value(number_value(n.value)),
        Lit::Bool(b) => Reduction::Value(Value::Bool(b.value)),
        Lit::Null(_) => Reduction::Value(Value::Null),
        Lit::BigInt(_) => Reduction::NonLiteral("BigInt literal"),
        Lit::Regex(_) => Reduction::NonLiteral("regular expression"),
        Lit::JSXText(_) => Reduction::NonLiteral("JSX text"),
    }
}

/// Key of an object property or class member, if statically known.
///
/// Computed keys are accepted only when they are a string literal (`['a-b']`).
pub fn prop_name_key(name: &PropName) -> Option<String> {
    match name {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => Some(s.value.to_string_lossy().into_owned()),
        PropName::Num(n) => Some(format_number_key(n.value)),
        PropName::Computed(computed) => match unwrap_transparent(&computed.expr) {
            Expr::Lit(Lit::Str(s)) => Some(s.value.to_string_lossy().into_owned()),
            _ => None,
        },
        PropName::BigInt(_) => None,
    }
}

/// Strip wrappers that do not change the runtime value.
pub fn unwrap_transparent(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unwrap_transparent(&paren.expr),
        Expr::TsAs(ts_as) => unwrap_transparent(&ts_as.expr),
        Expr::TsConstAssertion(ts_const) => unwrap_transparent(&ts_const.expr),
        Expr::TsSatisfies(ts_sat) => unwrap_transparent(&ts_sat.expr),
        Expr::TsNonNull(non_null) => unwrap_transparent(&non_null.expr),
        Expr::TsTypeAssertion(assertion) => unwrap_transparent(&assertion.expr),
        _ => expr,
    }
}

fn number_value(value: f64) -> ConfigValue {
    if !value.is_finite() {
        return Value::Null;
    }
    if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        return Value::from(value as i64);
    }
    Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
}

fn format_number_key(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}

fn child_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}
