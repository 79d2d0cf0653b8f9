use crate::token::{lookup_ident, Token, TokenKind};

/// Pull-based tokenizer over borrowed source text.
///
/// Each call to [`Lexer::next_token`] produces exactly one token. Once the
/// input is exhausted every further call yields an `Eof` token.
#[derive(Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    iter: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let iter = input.char_indices().peekable();
        Self { input, iter }
    }

    fn is_letter(ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_'
    }

    fn is_whitespace(ch: char) -> bool {
        matches!(ch, ' ' | '\t' | '\n' | '\r')
    }

    fn next_idx(&mut self) -> usize {
        self.iter
            .peek()
            .map(|(idx, _)| *idx)
            .unwrap_or(self.input.len())
    }

    fn token(&mut self, kind: TokenKind, start: usize) -> Token {
        let end = self.next_idx();
        Token::new(kind, &self.input[start..end], start)
    }

    fn read_identifier(&mut self, start: usize) -> Token {
        while self.iter.next_if(|(_, ch)| Self::is_letter(*ch)).is_some() {}

        let end = self.next_idx();
        let ident = &self.input[start..end];
        Token::new(lookup_ident(ident), ident, start)
    }

    fn read_number(&mut self, start: usize) -> Token {
        while self.iter.next_if(|(_, ch)| ch.is_ascii_digit()).is_some() {}

        self.token(TokenKind::Int, start)
    }

    fn followed_by(&mut self, expected: char) -> bool {
        self.iter.next_if(|(_, ch)| *ch == expected).is_some()
    }

    pub fn next_token(&mut self) -> Token {
        while self.iter.next_if(|(_, ch)| Self::is_whitespace(*ch)).is_some() {}

        let Some((idx, ch)) = self.iter.next() else {
            return Token::eof(self.input.len());
        };

        let kind = match ch {
            '=' => {
                if self.followed_by('=') {
                    TokenKind::Equal
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                if self.followed_by('=') {
                    TokenKind::NotEqual
                } else {
                    TokenKind::Bang
                }
            }
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Asterisk,
            '/' => TokenKind::Slash,
            '<' => TokenKind::LessThan,
            '>' => TokenKind::GreaterThan,
            ',' => TokenKind::Comma,
            ';' => TokenKind::SemiColon,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            c if Lexer::is_letter(c) => return self.read_identifier(idx),
            c if c.is_ascii_digit() => return self.read_number(idx),
            _ => TokenKind::Illegal,
        };
        self.token(kind, idx)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (token.kind != TokenKind::Eof).then_some(token)
    }
}
