use super::grammar::{Grammar, GrammarBuilder};
use crate::error::{Error, Result, WarningSet};
use crate::location::Location;
use crate::retrieve;
use crate::stream::StringStream;
use std::path::Path;
use std::rc::Rc;


/// # Summary
///
/// `Token` contains information about a token, thus it contains
///  - `name`: the token type, as declared in the definitions file;
///  - `value`: the exact substring of the source that generated this token;
///  - `location`: where the substring starts, as line/column.
#[derive(Debug, Clone)]
pub struct Token {
    name: String,
    value: String,
    location: Location,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}:{}:{}] {}",
            self.location.line(),
            self.location.column(),
            self.name,
            self.value
        )
    }
}

impl Token {
    /// Build a new token.
    pub fn new(name: String, value: String, location: Location) -> Self {
        Self {
            name,
            value,
            location,
        }
    }

    /// Return the token type.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the matched substring.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Return the location of the start of the token.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Return whether the token type starts with `family`. This is how a
    /// consumer matches a whole family of types at once: `integer` covers
    /// both `integer::dec` and `integer::hex`.
    pub fn is(&self, family: &str) -> bool {
        self.name.starts_with(family)
    }
}

/// Tokens of these exact types carry no information for a consumer; the
/// [`TokenStream`] query operations step over them.
fn significant(token: &Token) -> bool {
    token.name() != "comment" && token.name() != "blank"
}

/// # Summary
///
/// The complete, ordered result of a successful scan. A `TokenStream` is
/// only ever handed out whole: a failed scan returns an error, never a
/// truncated stream.
///
/// The stream keeps a reading position for its consumer. [`TokenStream::peek`]
/// and [`TokenStream::advance`] step over `comment` and `blank` tokens, which
/// is what a parser almost always wants; [`TokenStream::get`] and
/// [`TokenStream::iter`] see every token.
#[derive(Debug, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Return the number of tokens, significant or not.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Return the token at `pos`, regardless of the reading position.
    pub fn get(&self, pos: usize) -> Option<&Token> {
        self.tokens.get(pos)
    }

    /// Iterate over every token, in source order.
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    fn next_significant(&self) -> Option<usize> {
        (self.pos..self.tokens.len()).find(|&i| significant(&self.tokens[i]))
    }

    /// Return the next significant token without consuming anything.
    pub fn peek(&self) -> Option<&Token> {
        self.next_significant().map(|i| &self.tokens[i])
    }

    /// Consume up to and including the next significant token, and return
    /// it.
    pub fn advance(&mut self) -> Option<&Token> {
        let pos = self.next_significant()?;
        self.pos = pos + 1;
        Some(&self.tokens[pos])
    }

    /// Return whether the next significant token belongs to the `family` of
    /// types (see [`Token::is`]).
    pub fn next_is(&self, family: &str) -> bool {
        self.peek().is_some_and(|token| token.is(family))
    }
}

impl IntoIterator for TokenStream {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

/// # Summary
///
/// A builder for a `Lexer` object.
///
/// # Attribute specificators
///
/// `with_stream`: specify the source the lexer will lex.
/// `with_source_file`: specify the source as a file to read.
/// `with_grammar`: specify the grammar the lexer will use to lex.
/// `with_grammar_file`: specify the definitions file to build that grammar.
#[derive(Debug, Default)]
pub struct LexerBuilder {
    stream: Option<StringStream>,
    grammar: Option<Grammar>,
}

impl LexerBuilder {
    /// Instantiate a new `LexerBuilder`.
    pub fn new() -> Self {
        Self {
            stream: None,
            grammar: None,
        }
    }

    /// Specify the lexer's source stream.
    pub fn with_stream(mut self, stream: StringStream) -> Self {
        self.stream = Some(stream);
        self
    }

    /// Specify the lexer's source file.
    pub fn with_source_file(mut self, file: impl Into<Rc<Path>>) -> Result<Self> {
        self.stream = Some(StringStream::from_file(file)?);
        Ok(self)
    }

    /// Specify the lexer's grammar.
    pub fn with_grammar(mut self, grammar: Grammar) -> Self {
        self.grammar = Some(grammar);
        self
    }

    /// Specify the lexer's definitions file. Non-fatal problems in that file
    /// are reported through `warnings`.
    pub fn with_grammar_file(
        mut self,
        file: impl Into<Rc<Path>>,
        warnings: &mut WarningSet,
    ) -> Result<Self> {
        self.grammar = Some(GrammarBuilder::new().with_file(file)?.build(warnings)?);
        Ok(self)
    }

    /// Build the lexer.
    pub fn build(mut self) -> Result<Lexer> {
        let stream = retrieve!(self.stream);
        let grammar = retrieve!(self.grammar);
        Ok(Lexer::new(grammar, stream))
    }
}

/// # Summary
///
/// `Lexer` is the main object that is used for lexing. It couples a
/// [`Grammar`] with the source [`StringStream`] to tokenize; [`Lexer::lex`]
/// consumes the source and produces the [`TokenStream`].
///
/// # Methods
///
/// `new`: build a new `Lexer`. You may want to use the [`LexerBuilder`]
///      instead.
/// `lex`: scan the whole source, producing either every token or the first
///      lexical error.
#[derive(Debug)]
pub struct Lexer {
    grammar: Grammar,
    stream: StringStream,
}

impl Lexer {
    /// Create a new `Lexer` object.
    /// You may want to use the `LexerBuilder` instead.
    pub fn new(grammar: Grammar, stream: StringStream) -> Self {
        Self { grammar, stream }
    }

    /// Return the lexer's grammar.
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Scan the whole source text. At each position, the definitions are
    /// tried in file order and the first success is kept, even a zero-length
    /// one; no attempt is made to find a longer match among the remaining
    /// definitions. If no definition matches, the whole scan fails with the
    /// exact position of the offending byte, and no token is returned.
    ///
    /// A zero-length win does not move the cursor, so a definition whose
    /// pattern can match the empty string (an empty pattern, or one made
    /// only of `*`/`?` groups) makes `lex` loop forever as soon as it wins
    /// a position. Keep such patterns out of the definitions file.
    pub fn lex(&self) -> Result<TokenStream> {
        let source = self.stream.as_bytes();
        let mut tokens = Vec::new();
        let mut cursor = 0;
        let mut location = Location::default();
        while cursor < source.len() {
            let matched = self
                .grammar
                .definitions()
                .find_map(|definition| {
                    definition
                        .compiled()
                        .find(&source[cursor..])
                        .map(|matched| (definition, matched))
                });
            let Some((definition, matched)) = matched else {
                return Err(Error::Lexing {
                    path: self.stream.origin().to_path_buf(),
                    location,
                });
            };
            let value = String::from_utf8_lossy(matched.text()).into_owned();
            tokens.push(Token::new(
                definition.name().to_string(),
                value,
                location,
            ));
            location = location.after(matched.text());
            cursor += matched.length();
        }
        Ok(TokenStream::new(tokens))
    }
}
