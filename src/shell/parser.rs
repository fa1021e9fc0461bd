
use super::command::*;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseErr {
    EmptyLine,
    UnknownCommand(String),
    IncorrectNArguments(String, u8, u8),
}

pub struct Parser {
}

impl Parser {
    fn lex(&self, word: &str) -> Token {
        match word {
            "add" => Token::Add,
            "view" | "show" => Token::View,
            "delete" => Token::Delete,
            "delete-first" => Token::DeleteFirst,
            "export" => Token::Export,
            "count" => Token::Count,
            "units" => Token::Units,
            "help" | "?" => Token::Help,
            "quit" | "exit" => Token::Quit,
            s => Token::String(s.to_string())
        }
    }

    /// The first word picks the command; the rest of the line, trimmed, is its
    /// single argument, so patient ids may contain spaces.
    pub fn parse(&mut self, line: &str) -> Result<Command, ParseErr> {
        let line = line.trim();
        if line.is_empty() { return Err(ParseErr::EmptyLine) }

        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };
        let n_args = u8::from(!rest.is_empty());
        let token = self.lex(head);

        let expect = |expected: u8| {
            if n_args != expected {
                return Err(ParseErr::IncorrectNArguments(token.as_string(), n_args, expected));
            }
            Ok(())
        };

        match token {
            Token::Add => expect(0).map(|_| Command::Add),
            Token::View => expect(1).map(|_| Command::View { patient_id: rest.to_string() }),
            Token::Delete => expect(1).map(|_| Command::Delete { patient_id: rest.to_string() }),
            Token::DeleteFirst => expect(1).map(|_| Command::DeleteFirst { patient_id: rest.to_string() }),
            Token::Export => Ok(Command::Export { file: (!rest.is_empty()).then(|| rest.into()) }),
            Token::Count => expect(0).map(|_| Command::Count),
            Token::Units => expect(0).map(|_| Command::Units),
            Token::Help => Ok(Command::Help),
            Token::Quit => Ok(Command::Quit),
            Token::String(ref s) => Err(ParseErr::UnknownCommand(s.clone())),
        }
    }
}

#[derive(Debug)]
pub(crate) enum Token {
    String(String),

    Add,
    View,
    Delete,
    DeleteFirst,
    Export,
    Count,
    Units,
    Help,
    Quit,
}

impl Token {
    pub fn as_string(&self) -> String {
        match self {
            Token::String(string) => string.to_string(),
            Token::Add => "add".to_string(),
            Token::View => "view".to_string(),
            Token::Delete => "delete".to_string(),
            Token::DeleteFirst => "delete-first".to_string(),
            Token::Export => "export".to_string(),
            Token::Count => "count".to_string(),
            Token::Units => "units".to_string(),
            Token::Help => "help".to_string(),
            Token::Quit => "quit".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_parse_commands() {
        let mut parser = Parser {};

        assert_eq!(parser.parse("add"), Ok(Command::Add));
        assert_eq!(parser.parse("  view P-1001 "), Ok(Command::View { patient_id: "P-1001".to_string() }));
        assert_eq!(parser.parse("delete P 1001"), Ok(Command::Delete { patient_id: "P 1001".to_string() }));
        assert_eq!(parser.parse("delete-first X"), Ok(Command::DeleteFirst { patient_id: "X".to_string() }));
        assert_eq!(parser.parse("export"), Ok(Command::Export { file: None }));
        assert_eq!(
            parser.parse("export out/today.csv"),
            Ok(Command::Export { file: Some(PathBuf::from("out/today.csv")) })
        );
        assert_eq!(parser.parse("exit"), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        let mut parser = Parser {};

        assert_eq!(parser.parse("   "), Err(ParseErr::EmptyLine));
        assert_eq!(parser.parse("frobnicate now"), Err(ParseErr::UnknownCommand("frobnicate".to_string())));
        assert_eq!(parser.parse("view"), Err(ParseErr::IncorrectNArguments("view".to_string(), 0, 1)));
        assert_eq!(parser.parse("count everything"), Err(ParseErr::IncorrectNArguments("count".to_string(), 1, 0)));
    }
}
