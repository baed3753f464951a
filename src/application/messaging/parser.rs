//! Message parser - Prefix matching and tokenizing

/// Command name and arguments split out of a prefixed message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

/// Strip `prefix` from the start of `text`, comparing case-insensitively.
///
/// Works on chars rather than bytes so that prefixes whose lower-case form
/// has a different byte length still line up with the input text.
pub fn strip_prefix<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let mut chars = text.char_indices();
    let mut end = 0;

    for expected in prefix.chars() {
        let (idx, actual) = chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
        end = idx + actual.len_utf8();
    }

    Some(&text[end..])
}

/// Split the text after the prefix into a lower-cased name and arguments
pub fn tokenize(rest: &str) -> Option<ParsedCommand> {
    let mut parts = rest.split_whitespace();
    let name = parts.next()?.to_lowercase();
    let args = parts.map(|s| s.to_string()).collect();

    Some(ParsedCommand { name, args })
}

/// Prefix match and tokenize in one step
pub fn parse(text: &str, prefix: &str) -> Option<ParsedCommand> {
    strip_prefix(text, prefix).and_then(tokenize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_match_ignores_case() {
        assert_eq!(strip_prefix("REI!ban x", "rei!"), Some("ban x"));
        assert_eq!(strip_prefix("rei!ban", "Rei!"), Some("ban"));
        assert_eq!(strip_prefix("hello", "!"), None);
        assert_eq!(strip_prefix("!", "!!"), None);
    }

    #[test]
    fn prefix_match_handles_multibyte_prefixes() {
        assert_eq!(strip_prefix("ÉTÉ ping", "été "), Some("ping"));
        assert_eq!(strip_prefix("İping", "i"), None);
    }

    #[test]
    fn tokenize_collapses_whitespace_and_lowercases_name() {
        let parsed = tokenize("  BaN   <@1>\t spamming  links ").unwrap();
        assert_eq!(parsed.name, "ban");
        assert_eq!(parsed.args, vec!["<@1>", "spamming", "links"]);
    }

    #[test]
    fn tokenize_keeps_argument_case() {
        let parsed = parse("!say Hello World", "!").unwrap();
        assert_eq!(parsed.args, vec!["Hello", "World"]);
    }

    #[test]
    fn bare_prefix_yields_nothing() {
        assert_eq!(parse("!   ", "!"), None);
    }
}
