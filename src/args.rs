use std::borrow::Cow;

/// One parsed input line, ready for the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command<'input> {
    pub command: Cow<'input, str>,
    pub args: Vec<Cow<'input, str>>,
    pub background: bool,
}

const BACKGROUND: char = '&';

/// Splits a raw line on whitespace. A trailing `&` marks the command as a
/// background one. Quotes and escapes are not interpreted.
pub fn parse_line(line: &str) -> Option<Command<'_>> {
    let mut line = line.trim();

    let background = match line.strip_suffix(BACKGROUND) {
        Some(rest) => {
            line = rest.trim();
            true
        }
        None => false,
    };

    let mut words = line.split_whitespace().map(Cow::Borrowed);
    // a lone `&` leaves nothing to run
    let command = words.next()?;

    Some(Command {
        command,
        args: words.collect(),
        background,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    use pretty_assertions::{assert_eq, assert_str_eq};

    fn words<'a>(cmd: &'a Command<'_>) -> Vec<&'a str> {
        cmd.args.iter().map(AsRef::as_ref).collect()
    }

    #[test]
    fn simple_multiple() {
        let cmd = parse_line("ls -l /tmp").unwrap();
        assert_str_eq!("ls", cmd.command.as_ref());
        assert_eq!(vec!["-l", "/tmp"], words(&cmd));
        assert!(!cmd.background);
    }

    #[test]
    fn quotes_are_not_special() {
        let cmd = parse_line("echo 'hola mundo'").unwrap();
        assert_str_eq!("echo", cmd.command.as_ref());
        assert_eq!(vec!["'hola", "mundo'"], words(&cmd));
    }

    #[test]
    fn trailing_ampersand() {
        let cmd = parse_line("sleep 5 &").unwrap();
        assert_str_eq!("sleep", cmd.command.as_ref());
        assert_eq!(vec!["5"], words(&cmd));
        assert!(cmd.background);
    }

    #[test]
    fn trailing_ampersand_touching_word() {
        let cmd = parse_line("sleep 5&\n").unwrap();
        assert_eq!(vec!["5"], words(&cmd));
        assert!(cmd.background);
    }

    #[test]
    fn repeated_whitespace() {
        let cmd = parse_line("  cd \t  /tmp   ").unwrap();
        assert_str_eq!("cd", cmd.command.as_ref());
        assert_eq!(vec!["/tmp"], words(&cmd));
    }

    #[test]
    fn no_arguments() {
        let cmd = parse_line("exit\n").unwrap();
        assert_str_eq!("exit", cmd.command.as_ref());
        assert!(cmd.args.is_empty());
    }

    #[test]
    fn empty() {
        assert_eq!(None, parse_line(""));
        assert_eq!(None, parse_line("   "));
        assert_eq!(None, parse_line("\n"));
    }

    #[test]
    fn lone_ampersand() {
        assert_eq!(None, parse_line("&"));
        assert_eq!(None, parse_line("  & "));
    }
}
