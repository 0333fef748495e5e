//! Quote-aware word splitting for generated commands.
//!
//! Commands are tokenized into an argument vector and handed to the process
//! spawner directly; nothing here (or downstream) interprets shell
//! metacharacters. `;`, `|`, `>`, backticks and friends are ordinary word
//! bytes that reach the subprocess literally, which is what makes the
//! execution boundary injection-free.

use std::fmt;

/// Tokenization failure. Unterminated quoting is the only way to fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for LexError {}

/// Split a command line into words using shell-lexing quote rules.
///
/// - Unquoted whitespace separates words.
/// - Single quotes preserve everything up to the closing quote.
/// - Double quotes preserve everything except `\"` and `\\` escapes.
/// - An unquoted backslash escapes the following character.
///
/// No expansion, substitution, or operator handling of any kind.
pub fn split_words(input: &str) -> Result<Vec<String>, LexError> {
    let mut words = Vec::new();
    let mut current = String::new();
    // Distinguishes an empty pending word ('' or "") from no pending word.
    let mut in_word = false;
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        match ch {
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => current.push(c),
                        None => {
                            return Err(LexError {
                                message: "unterminated single quote".to_string(),
                            });
                        }
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(c @ ('"' | '\\')) => current.push(c),
                            Some(c) => {
                                current.push('\\');
                                current.push(c);
                            }
                            None => {
                                return Err(LexError {
                                    message: "unterminated double quote".to_string(),
                                });
                            }
                        },
                        Some(c) => current.push(c),
                        None => {
                            return Err(LexError {
                                message: "unterminated double quote".to_string(),
                            });
                        }
                    }
                }
            }
            '\\' => {
                in_word = true;
                match chars.next() {
                    Some(c) => current.push(c),
                    None => {
                        return Err(LexError {
                            message: "trailing backslash".to_string(),
                        });
                    }
                }
            }
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }

    if in_word {
        words.push(current);
    }
    Ok(words)
}
