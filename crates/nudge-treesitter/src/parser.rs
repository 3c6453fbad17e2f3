use nudge_core::{DeclarationParser, DeclarationParserFactory, ParseError};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Parser, Query, QueryCursor};

/// Captures the name of every variable declarator (fields and locals, not parameters).
pub const JAVA_DECLARATIONS_QUERY: &str = "(variable_declarator name: (identifier) @name)";

/// Collects declared variable names with a Tree-sitter query.
///
/// Every call parses the full text from scratch. The getter/setter detector only asks when the
/// edited line opens with an access modifier, so there is no edit stream to keep a tree in sync
/// with.
pub struct TreeSitterDeclarationParser {
    parser: Parser,
    query: Query,
    name_capture: u32,
}

impl std::fmt::Debug for TreeSitterDeclarationParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeSitterDeclarationParser")
            .field("name_capture", &self.name_capture)
            .finish_non_exhaustive()
    }
}

impl TreeSitterDeclarationParser {
    /// Create a parser for `language`. `query` must capture declared names as `@name`.
    pub fn new(language: Language, query: &str) -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| ParseError::Language(e.to_string()))?;

        let query = Query::new(&language, query).map_err(|e| ParseError::Query(e.to_string()))?;
        let name_capture = query
            .capture_index_for_name("name")
            .ok_or_else(|| ParseError::Query("query has no @name capture".to_string()))?;

        Ok(Self {
            parser,
            query,
            name_capture,
        })
    }

    /// The Java parser.
    pub fn java() -> Result<Self, ParseError> {
        Self::new(tree_sitter_java::LANGUAGE.into(), JAVA_DECLARATIONS_QUERY)
    }
}

impl DeclarationParser for TreeSitterDeclarationParser {
    fn declared_variables(&mut self, source: &str) -> Result<Vec<String>, ParseError> {
        let tree = self.parser.parse(source, None).ok_or(ParseError::NoTree)?;
        let root = tree.root_node();
        if root.has_error() {
            tracing::trace!("declaration parse recovered from syntax errors");
        }

        let mut cursor = QueryCursor::new();
        let mut names = Vec::new();
        let mut matches = cursor.matches(&self.query, root, source.as_bytes());
        while let Some(m) = matches.next() {
            for capture in m.captures {
                if capture.index != self.name_capture {
                    continue;
                }
                match capture.node.utf8_text(source.as_bytes()) {
                    Ok(name) if !name.is_empty() => names.push(name.to_string()),
                    Ok(_) => {}
                    Err(err) => tracing::trace!(%err, "skipping non-UTF-8 declarator"),
                }
            }
        }
        Ok(names)
    }
}

/// A factory for [`SessionManager::set_parser_factory`](nudge_core::SessionManager::set_parser_factory)
/// that gives every session its own Java parser.
///
/// Sessions whose parser fails to build get a stand-in that reports the failure on each parse;
/// the getter/setter detector logs it and carries on with no names.
pub fn java_parser_factory() -> DeclarationParserFactory {
    Box::new(|| match TreeSitterDeclarationParser::java() {
        Ok(parser) => Box::new(parser) as Box<dyn DeclarationParser>,
        Err(err) => {
            tracing::warn!(%err, "java declaration parser unavailable");
            let failing = move |_: &str| -> Result<Vec<String>, ParseError> { Err(err.clone()) };
            Box::new(failing) as Box<dyn DeclarationParser>
        }
    })
}
