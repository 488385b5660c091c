use std::sync::Arc;

use swc_common::{
    BytePos, FileName, Globals, SourceMap, Span, Spanned,
    comments::{CommentKind, SingleThreadedComments},
};
use swc_ecma_ast::Module;
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

use super::source::{ByteRange, CommentStyle, SourceComment};
use crate::error::{ExtractError, Result};

/// Where a `<script>` block runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptContext {
    /// Regular `<script>`: runs per component instance.
    Instance,
    /// `<script context="module">`: runs once per import.
    Module,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptLang {
    JavaScript,
    TypeScript,
}

/// One parsed `<script>` block.
///
/// Spans inside `module` are relative to swc's source file; use
/// [`ParsedScript::range`] to turn them into offsets in the full component.
#[derive(Debug, Clone)]
pub struct ParsedScript {
    pub module: Module,
    pub context: ScriptContext,
    pub lang: ScriptLang,
    /// Comments with absolute ranges, sorted by start.
    pub comments: Vec<SourceComment>,
    start_pos: BytePos,
    offset: usize,
}

impl ParsedScript {
    /// Absolute byte offset of an swc position.
    pub fn position(&self, pos: BytePos) -> usize {
        self.offset + pos.0.saturating_sub(self.start_pos.0) as usize
    }

    /// Absolute byte range of an swc span.
    pub fn range(&self, span: Span) -> ByteRange {
        ByteRange::new(self.position(span.lo), self.position(span.hi))
    }

    pub fn is_module_context(&self) -> bool {
        self.context == ScriptContext::Module
    }
}

/// Parse the text of one script block into an AST.
///
/// `offset` is the byte offset of `code` inside the full component source;
/// every range reported by the returned script is shifted by it.
pub fn parse_script_source(
    code: &str,
    file_path: &str,
    offset: usize,
    context: ScriptContext,
    lang: ScriptLang,
) -> Result<ParsedScript> {
    use swc_common::GLOBALS;

    GLOBALS.set(&Globals::new(), || {
        let source_map = Arc::new(SourceMap::default());
        let source_file =
            source_map.new_source_file(FileName::Real(file_path.into()).into(), code.to_string());
        let start_pos = source_file.start_pos;
        let absolute = |pos: BytePos| offset + pos.0.saturating_sub(start_pos.0) as usize;

        let syntax = match lang {
            ScriptLang::TypeScript => Syntax::Typescript(TsSyntax::default()),
            ScriptLang::JavaScript => Syntax::Es(EsSyntax::default()),
        };

        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), Some(&comments));

        let module = parser.parse_module().map_err(|e| {
            ExtractError::syntax(format!(
                "{} (at byte {})",
                e.kind().msg(),
                absolute(e.span().lo)
            ))
        })?;

        // Recovered errors still mean the script is not valid JavaScript.
        if let Some(e) = parser.take_errors().into_iter().next() {
            return Err(ExtractError::syntax(format!(
                "{} (at byte {})",
                e.kind().msg(),
                absolute(e.span().lo)
            )));
        }

        let (leading, trailing) = comments.borrow_all();
        let mut collected: Vec<SourceComment> = leading
            .values()
            .chain(trailing.values())
            .flat_map(|cmts| cmts.iter())
            .map(|cmt| SourceComment {
                style: match cmt.kind {
                    CommentKind::Block => CommentStyle::Block,
                    CommentKind::Line => CommentStyle::Line,
                },
                range: ByteRange::new(absolute(cmt.span.lo), absolute(cmt.span.hi)),
                text: cmt.text.to_string(),
            })
            .collect();
        collected.sort_by_key(|c| c.range.start);
        collected.dedup_by_key(|c| c.range.start);

        Ok(ParsedScript {
            module,
            context,
            lang,
            comments: collected,
            start_pos,
            offset,
        })
    })
}

#[cfg(test)]
mod tests {
    use crate::core::parsers::script::*;

    fn parse(code: &str) -> ParsedScript {
        parse_script_source(
            code,
            "test.svelte",
            10,
            ScriptContext::Instance,
            ScriptLang::JavaScript,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_simple_module() {
        let script = parse("let a = 1;\nexport let b;");
        assert_eq!(script.module.body.len(), 2);
        assert!(!script.is_module_context());
    }

    #[test]
    fn test_ranges_are_shifted_by_offset() {
        let script = parse("let a = 1;");
        let range = script.range(script.module.span);
        assert_eq!(range.start, 10);
        assert_eq!(range.end, 20);
    }

    #[test]
    fn test_comments_are_collected_in_order() {
        let script = parse("/** first */\nlet a;\n// second\nlet b;");
        assert_eq!(script.comments.len(), 2);
        assert_eq!(script.comments[0].style, CommentStyle::Block);
        assert_eq!(script.comments[0].text, "* first ");
        assert_eq!(script.comments[0].range.start, 10);
        assert_eq!(script.comments[1].style, CommentStyle::Line);
        assert_eq!(script.comments[1].text, " second");
    }

    #[test]
    fn test_syntax_error() {
        let result = parse_script_source(
            "let = ;",
            "test.svelte",
            0,
            ScriptContext::Instance,
            ScriptLang::JavaScript,
        );
        assert!(matches!(result, Err(ExtractError::Syntax { .. })));
    }

    #[test]
    fn test_syntax_error_position_is_absolute() {
        let code = "\nlet = ;\n";
        let result = parse_script_source(
            code,
            "test.svelte",
            100,
            ScriptContext::Instance,
            ScriptLang::JavaScript,
        );
        let Err(ExtractError::Syntax { message }) = result else {
            panic!("expected a syntax error");
        };
        let at: usize = message
            .rsplit("at byte ")
            .next()
            .map(|rest| rest.trim_end_matches(')'))
            .and_then(|n| n.parse().ok())
            .unwrap();
        assert!((100..100 + code.len()).contains(&at), "{message}");
    }

    #[test]
    fn test_typescript_script() {
        let result = parse_script_source(
            "export let size: number = 1;",
            "test.svelte",
            0,
            ScriptContext::Instance,
            ScriptLang::TypeScript,
        );
        assert!(result.is_ok());
    }
}
