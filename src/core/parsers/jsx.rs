use anyhow::{Result, anyhow};
use std::sync::Arc;
use swc_common::{FileName, Globals, SourceMap, Spanned};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

/// Parse JSX/TSX source code string into an AST.
///
/// The grammar is TypeScript with JSX and legacy decorators enabled, which
/// covers plain `.js`/`.jsx` sources as well: class properties, optional
/// chaining, nullish coalescing, numeric separators and spread are all part of it.
///
/// The returned module owns no reference to the source map; it is meant to be
/// scanned once and dropped.
pub fn parse_jsx_source(code: String, file_path: &str) -> Result<Module> {
    use swc_common::GLOBALS;

    let source_map: Arc<SourceMap> = Default::default();

    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let syntax = Syntax::Typescript(TsSyntax {
            tsx: true,
            decorators: true,
            ..Default::default()
        });

        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        parser.parse_module().map_err(|e| {
            let loc = source_map.lookup_char_pos(e.span().lo);
            anyhow!(
                "{} (at {}:{})",
                e.kind().msg(),
                loc.line,
                loc.col_display + 1
            )
        })
    })
}
