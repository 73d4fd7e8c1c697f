use crate::command::{BuildCommand, Command, FindCommand, LoadCommand, ScanCommand};
use crate::error::ParseError;
use std::path::PathBuf;

pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let tokens = Lexer::new(input).lex()?;
    parse_tokens(tokens.into_iter())
}

#[derive(Debug)]
enum Keyword {
    Load,
    Build,
    Find,
    Scan,
    Stats,
    Exit,
}

impl Keyword {
    fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_uppercase().as_str() {
            "LOAD" => Some(Keyword::Load),
            "BUILD" => Some(Keyword::Build),
            "FIND" => Some(Keyword::Find),
            "SCAN" => Some(Keyword::Scan),
            "STATS" => Some(Keyword::Stats),
            "EXIT" => Some(Keyword::Exit),
            _ => None,
        }
    }
}

/// Keywords are only recognised in command position, so a key may be any
/// word, "find" included.
#[derive(Debug, PartialEq)]
enum Token {
    Word(String),
    Literal(String),
}

impl Token {
    fn into_string(self) -> String {
        match self {
            Token::Word(s) | Token::Literal(s) => s,
        }
    }
}

#[derive(Debug)]
struct Lexer {
    input: Vec<char>,
    pos: usize,
    buffer: String,
    tokens: Vec<Token>,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | '\'')
}

impl Lexer {
    fn new(input: &str) -> Lexer {
        Lexer {
            input: input.chars().collect(),
            pos: 0,
            buffer: String::new(),
            tokens: Vec::new(),
        }
    }

    fn lex(mut self) -> Result<Vec<Token>, ParseError> {
        while let Some(&c) = self.input.get(self.pos) {
            if c.is_whitespace() {
                self.pos += 1;
            } else if is_word_char(c) {
                self.lex_word()?;
            } else if c == '"' {
                self.lex_literal()?;
            } else {
                return Err(ParseError::UnexpectedChar(c));
            }
        }
        Ok(self.tokens)
    }

    fn lex_word(&mut self) -> Result<(), ParseError> {
        while let Some(&c) = self.input.get(self.pos) {
            if is_word_char(c) {
                self.buffer.push(c);
                self.pos += 1;
            } else if c.is_whitespace() {
                break;
            } else {
                return Err(ParseError::UnexpectedChar(c));
            }
        }
        self.tokens.push(Token::Word(std::mem::take(&mut self.buffer)));
        Ok(())
    }

    fn lex_literal(&mut self) -> Result<(), ParseError> {
        // opening quote
        self.pos += 1;
        let mut is_escaped = false;

        while let Some(&c) = self.input.get(self.pos) {
            self.pos += 1;
            if is_escaped {
                match c {
                    '"' | '\\' => self.buffer.push(c),
                    'n' => self.buffer.push('\n'),
                    't' => self.buffer.push('\t'),
                    _ => return Err(ParseError::InvalidEscape(c)),
                }
                is_escaped = false;
            } else {
                match c {
                    '"' => {
                        self.tokens
                            .push(Token::Literal(std::mem::take(&mut self.buffer)));
                        return Ok(());
                    }
                    '\\' => is_escaped = true,
                    _ => self.buffer.push(c),
                }
            }
        }

        Err(ParseError::UnterminatedLiteral(std::mem::take(
            &mut self.buffer,
        )))
    }
}

fn parse_tokens(mut tokens: impl Iterator<Item = Token>) -> Result<Command, ParseError> {
    let keyword = match tokens.next() {
        None => return Err(ParseError::UnexpectedEnd),
        Some(Token::Word(word)) => Keyword::from_word(&word).ok_or(ParseError::ExpectedKeyword)?,
        Some(Token::Literal(_)) => return Err(ParseError::ExpectedKeyword),
    };
    match keyword {
        Keyword::Load => process_load_keyword(&mut tokens),
        Keyword::Build => process_build_keyword(&mut tokens),
        Keyword::Find => {
            let key = parse_key(&mut tokens, "FIND")?;
            Ok(Command::Find(FindCommand(key)))
        }
        Keyword::Scan => {
            let key = parse_key(&mut tokens, "SCAN")?;
            Ok(Command::Scan(ScanCommand(key)))
        }
        Keyword::Stats => {
            expect_end(&mut tokens, "STATS")?;
            Ok(Command::Stats)
        }
        Keyword::Exit => {
            expect_end(&mut tokens, "EXIT")?;
            Ok(Command::Exit)
        }
    }
}

fn expect_end(
    tokens: &mut impl Iterator<Item = Token>,
    after: &'static str,
) -> Result<(), ParseError> {
    match tokens.next() {
        Some(_) => Err(ParseError::TrailingToken(after)),
        None => Ok(()),
    }
}

/// A missing key parses as the empty key; the session rejects it with a
/// message instead of a syntax error.
fn parse_key(
    tokens: &mut impl Iterator<Item = Token>,
    keyword: &'static str,
) -> Result<String, ParseError> {
    let key = tokens.next().map(Token::into_string).unwrap_or_default();
    expect_end(tokens, keyword)?;
    Ok(key.trim().to_string())
}

fn process_load_keyword(tokens: &mut impl Iterator<Item = Token>) -> Result<Command, ParseError> {
    let path = tokens.next().map(|token| PathBuf::from(token.into_string()));
    expect_end(tokens, "path")?;
    Ok(Command::Load(LoadCommand(path)))
}

fn process_build_keyword(tokens: &mut impl Iterator<Item = Token>) -> Result<Command, ParseError> {
    let page_size = match tokens.next() {
        None => None,
        Some(Token::Word(word)) => Some(
            word.parse::<i64>()
                .map_err(|_| ParseError::Expected("integer page size after BUILD"))?,
        ),
        Some(Token::Literal(_)) => {
            return Err(ParseError::Expected("integer page size after BUILD"))
        }
    };
    expect_end(tokens, "page size")?;
    Ok(Command::Build(BuildCommand(page_size)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_command() {
        assert_eq!(
            parse_command("LOAD").unwrap(),
            Command::Load(LoadCommand(None))
        );
        assert_eq!(
            parse_command("load data/words_alpha.txt").unwrap(),
            Command::Load(LoadCommand(Some(PathBuf::from("data/words_alpha.txt"))))
        );
        assert_eq!(
            parse_command("load \"my words.txt\"").unwrap(),
            Command::Load(LoadCommand(Some(PathBuf::from("my words.txt"))))
        );
        assert_eq!(
            parse_command("BUILD").unwrap(),
            Command::Build(BuildCommand(None))
        );
        assert_eq!(
            parse_command("build 250").unwrap(),
            Command::Build(BuildCommand(Some(250)))
        );
        assert_eq!(
            parse_command("Build -3").unwrap(),
            Command::Build(BuildCommand(Some(-3)))
        );
        assert_eq!(
            parse_command("FIND apple").unwrap(),
            Command::Find(FindCommand("apple".into()))
        );
        assert_eq!(
            parse_command("scan \"  grape \"").unwrap(),
            Command::Scan(ScanCommand("grape".into()))
        );
        assert_eq!(parse_command("stats").unwrap(), Command::Stats);
        assert_eq!(parse_command("  EXIT  ").unwrap(), Command::Exit);
    }

    #[test]
    fn keywords_can_be_keys() {
        assert_eq!(
            "find scan".parse::<Command>().unwrap(),
            Command::Find(FindCommand("scan".into()))
        );
    }

    #[test]
    fn missing_key_is_empty() {
        assert_eq!(
            parse_command("FIND").unwrap(),
            Command::Find(FindCommand(String::new()))
        );
    }

    #[test]
    fn escapes_in_literals() {
        assert_eq!(
            parse_command(r#"FIND "say \"hi\"\\""#).unwrap(),
            Command::Find(FindCommand("say \"hi\"\\".into()))
        );
        assert_eq!(
            parse_command(r#"FIND "\q""#).unwrap_err(),
            ParseError::InvalidEscape('q')
        );
        assert_eq!(
            parse_command(r#"FIND "open"#).unwrap_err(),
            ParseError::UnterminatedLiteral("open".into())
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_command("").unwrap_err(), ParseError::UnexpectedEnd);
        assert_eq!(parse_command("GET x").unwrap_err(), ParseError::ExpectedKeyword);
        assert_eq!(
            parse_command("\"FIND\" x").unwrap_err(),
            ParseError::ExpectedKeyword
        );
        assert_eq!(
            parse_command("FIND a b").unwrap_err(),
            ParseError::TrailingToken("FIND")
        );
        assert_eq!(
            parse_command("BUILD ten").unwrap_err(),
            ParseError::Expected("integer page size after BUILD")
        );
        assert_eq!(parse_command("STATS now").unwrap_err(), ParseError::TrailingToken("STATS"));
        assert_eq!(parse_command("FIND a;").unwrap_err(), ParseError::UnexpectedChar(';'));
    }
}
