use crate::error::{Error, Result, Warning, WarningSet};
use crate::regex::CompiledPattern;
use crate::retrieve;
use crate::stream::StringStream;
use newty::newty;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar_of(definitions: &str) -> (Grammar, WarningSet) {
        let mut warnings = WarningSet::default();
        let grammar = GrammarBuilder::new()
            .with_stream(StringStream::new(Path::new("whatever"), definitions))
            .build(&mut warnings)
            .unwrap();
        (grammar, warnings)
    }

    #[test]
    fn definitions_are_kept_in_file_order() {
        let (grammar, warnings) =
            grammar_of("blank [ \\t]+\nKW if\nID [a-z]+");
        assert!(warnings.is_empty());
        assert_eq!(grammar.len(), 3);
        assert_eq!(grammar.name(TerminalId(0)), "blank");
        assert_eq!(grammar.name(TerminalId(1)), "KW");
        assert_eq!(grammar.name(TerminalId(2)), "ID");
        assert_eq!(grammar.get(TerminalId(1)).pattern(), "if");
        assert_eq!(grammar.id("ID"), Some(TerminalId(2)));
        assert!(grammar.contains("KW"));
        assert!(!grammar.contains("NOPE"));
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let (grammar, warnings) = grammar_of(
            "# a comment\n\n   \nA a\n# another one\n\nB b\n",
        );
        assert!(warnings.is_empty());
        assert_eq!(grammar.len(), 2);
        assert_eq!(grammar.name(TerminalId(0)), "A");
        assert_eq!(grammar.name(TerminalId(1)), "B");
    }

    #[test]
    fn pattern_keeps_its_internal_spaces() {
        let (grammar, _) = grammar_of("OP  a b\n");
        assert_eq!(grammar.get(TerminalId(0)).pattern(), "a b");
    }

    #[test]
    fn missing_pattern_warns_and_skips() {
        let (grammar, warnings) = grammar_of("A a\nlonely\nB b\n");
        assert_eq!(grammar.len(), 2);
        assert_eq!(warnings.len(), 1);
        assert!(warnings
            .iter()
            .next()
            .unwrap()
            .to_string()
            .contains("line 2"));
    }

    #[test]
    fn compile_failure_aborts_the_whole_load() {
        let mut warnings = WarningSet::default();
        let error = GrammarBuilder::new()
            .with_stream(StringStream::new(
                Path::new("whatever"),
                "A a\nB b**\nC c\n",
            ))
            .build(&mut warnings)
            .unwrap_err();
        match error {
            Error::PatternSyntax { line, name, .. } => {
                assert_eq!(line, 2);
                assert_eq!(name, "B");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_stream() {
        let mut warnings = WarningSet::default();
        assert!(GrammarBuilder::new().build(&mut warnings).is_err());
    }

    #[test]
    fn missing_file() {
        assert!(GrammarBuilder::new()
            .with_file(Path::new("no/such/definitions"))
            .is_err());
    }

    #[test]
    fn default_grammar_file() {
        let mut warnings = WarningSet::default();
        let grammar = GrammarBuilder::new()
            .with_file(Path::new("gmrs/pyas.lex"))
            .unwrap()
            .build(&mut warnings)
            .unwrap();
        assert!(warnings.is_empty());
        assert!(grammar.contains("blank"));
        assert!(grammar.contains("comment"));
        assert!(grammar.contains("integer::dec"));
        assert!(grammar.contains("integer::hex"));
        // Hexadecimal must come first, otherwise `0x2a` starts with a
        // perfectly fine decimal `0`.
        assert!(grammar.id("integer::hex").unwrap().0 < grammar.id("integer::dec").unwrap().0);
    }
}

newty! {
    pub id TerminalId
}

/// # Summary
///
/// One line of a definitions file: a token type name, the pattern it was
/// declared with, and the compiled form of that pattern. Immutable once
/// built.
#[derive(Debug, Clone)]
pub struct TokenDefinition {
    name: String,
    pattern: String,
    compiled: CompiledPattern,
}

impl TokenDefinition {
    pub fn new(name: String, pattern: String, compiled: CompiledPattern) -> Self {
        Self {
            name,
            pattern,
            compiled,
        }
    }

    /// Return the token type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the pattern as written in the definitions file.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Return the compiled pattern.
    pub fn compiled(&self) -> &CompiledPattern {
        &self.compiled
    }
}

/// # Summary
///
/// `Grammar` is an ordered collection of [`TokenDefinition`]s. The order is
/// the one of the definitions file and it is semantically significant: the
/// scan phase tries definitions in this order and keeps the first match.
/// Should be built with a [`GrammarBuilder`].
///
/// # Methods
///
/// `name`: the token type name of a definition.
/// `get`: a definition, by index.
/// `id`: the index bound to a token type name.
/// `contains`: whether some definition has the given token type name.
/// `definitions`: iterate over the definitions, in priority order.
#[derive(Debug)]
pub struct Grammar {
    definitions: Vec<TokenDefinition>,
    name_map: HashMap<String, TerminalId>,
}

impl Grammar {
    pub fn new(definitions: Vec<TokenDefinition>) -> Self {
        let mut name_map = HashMap::new();
        for (i, definition) in definitions.iter().enumerate() {
            // On duplicate names, the first definition keeps the id.
            name_map
                .entry(definition.name().to_string())
                .or_insert(TerminalId(i));
        }
        Self {
            definitions,
            name_map,
        }
    }

    pub fn name(&self, idx: TerminalId) -> &str {
        self.definitions[idx.0].name()
    }

    pub fn get(&self, idx: TerminalId) -> &TokenDefinition {
        &self.definitions[idx.0]
    }

    pub fn id(&self, name: &str) -> Option<TerminalId> {
        self.name_map.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.name_map.contains_key(name)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &TokenDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// # Summary
///
/// A builder for a [`Grammar`] object.
///
/// # Attribute specificators
///
/// `with_file`: specify the definitions file.
///            May fail, if it can't open the given file.
/// `with_stream`: specify a given stream.
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    stream: Option<StringStream>,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self { stream: None }
    }

    pub fn with_file(mut self, file: impl Into<Rc<Path>>) -> Result<Self> {
        self.stream = Some(StringStream::from_file(file)?);
        Ok(self)
    }

    pub fn with_stream(mut self, stream: StringStream) -> Self {
        self.stream = Some(stream);
        self
    }

    /// Read the definitions, one `<type> <pattern>` per line, in file order.
    /// Comment lines (starting with `#`) and blank lines are skipped. A line
    /// with a type but no pattern is skipped with a warning; a pattern that
    /// does not compile is fatal to the whole load.
    pub fn build(mut self, warnings: &mut WarningSet) -> Result<Grammar> {
        let stream = retrieve!(self.stream);
        let origin = stream.origin();
        let mut definitions = Vec::new();
        for (number, line) in stream.as_str().lines().enumerate() {
            let number = number + 1;
            let line = line.trim_start();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (name, rest) = match line.find(char::is_whitespace) {
                Some(split) => (&line[..split], line[split..].trim_start()),
                None => (line, ""),
            };
            // The pattern is the rest of the line, untouched: internal and
            // trailing spaces belong to it.
            if rest.is_empty() {
                warnings.add(Warning::MissingPattern {
                    path: origin.to_path_buf(),
                    line: number,
                });
                continue;
            }
            let compiled =
                CompiledPattern::compile(rest).map_err(|source| Error::PatternSyntax {
                    path: origin.to_path_buf(),
                    line: number,
                    name: name.to_string(),
                    source,
                })?;
            definitions.push(TokenDefinition::new(
                name.to_string(),
                rest.to_string(),
                compiled,
            ));
        }
        Ok(Grammar::new(definitions))
    }
}
