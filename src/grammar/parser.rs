use super::{GrammarError, RawSymbol, RuleDefinition};

/// Parses BNF text into rule definitions.
///
/// Format: `<name> ::= alt | alt` per line. Non-terminals are written
/// `<name>`, literals are bare words or quoted with `"` or `'`. Lines
/// starting with `#` are comments, and a line starting with `|` continues
/// the previous rule.
pub fn parse_bnf(source: &str) -> Result<Vec<RuleDefinition>, GrammarError> {
    let mut definitions: Vec<RuleDefinition> = Vec::new();

    for (number, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let parse_error = || GrammarError::Parse {
            line: number + 1,
            text: line.to_string(),
        };

        if let Some((lhs, rhs)) = trimmed.split_once("::=") {
            let name = rule_name(lhs.trim()).ok_or_else(parse_error)?;
            let alternatives = parse_alternatives(rhs).ok_or_else(parse_error)?;
            definitions.push(RuleDefinition { name, alternatives });
        } else if let Some(rest) = trimmed.strip_prefix('|') {
            let previous = definitions.last_mut().ok_or_else(parse_error)?;
            let alternatives = parse_alternatives(rest).ok_or_else(parse_error)?;
            previous.alternatives.extend(alternatives);
        } else {
            return Err(parse_error());
        }
    }

    Ok(definitions)
}

fn rule_name(token: &str) -> Option<String> {
    let inner = token.strip_prefix('<')?.strip_suffix('>')?;
    (!inner.is_empty()).then(|| inner.to_string())
}

fn parse_alternatives(rhs: &str) -> Option<Vec<Vec<RawSymbol>>> {
    let mut alternatives = Vec::new();
    let mut current = Vec::new();
    let mut chars = rhs.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '|' => {
                chars.next();
                alternatives.push(std::mem::take(&mut current));
            }
            '"' | '\'' => {
                chars.next();
                let mut text = String::new();
                loop {
                    match chars.next()? {
                        q if q == c => break,
                        other => text.push(other),
                    }
                }
                current.push(RawSymbol::Literal(text));
            }
            '<' => {
                let mut token = String::new();
                while let Some(&next) = chars.peek() {
                    if next.is_whitespace() || next == '|' {
                        break;
                    }
                    token.push(next);
                    chars.next();
                    if next == '>' {
                        break;
                    }
                }
                // a lone '<' (or '<=') is a literal
                match rule_name(&token) {
                    Some(name) => current.push(RawSymbol::NonTerminal(name)),
                    None => current.push(RawSymbol::Literal(token)),
                }
            }
            _ => {
                let mut word = String::new();
                while let Some(&next) = chars.peek() {
                    if next.is_whitespace() || next == '|' || next == '"' || next == '\'' {
                        break;
                    }
                    word.push(next);
                    chars.next();
                }
                current.push(RawSymbol::Literal(word));
            }
        }
    }
    alternatives.push(current);
    Some(alternatives)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_parse_simple_rules() {
        let definitions = parse_bnf(
            "# arithmetic\n<expr> ::= <expr> <op> <expr> | x\n<op> ::= \"+\" | '*'\n",
        )
        .unwrap();

        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].name, "expr");
        assert_eq!(
            definitions[0].alternatives[0],
            vec![
                RawSymbol::rule("expr"),
                RawSymbol::rule("op"),
                RawSymbol::rule("expr")
            ]
        );
        assert_eq!(definitions[0].alternatives[1], vec![RawSymbol::literal("x")]);
        assert_eq!(
            definitions[1].alternatives,
            vec![vec![RawSymbol::literal("+")], vec![RawSymbol::literal("*")]]
        );
    }

    #[test]
    fn test_quoted_literal_keeps_spaces_and_bars() {
        let definitions = parse_bnf("<s> ::= \"a | b\" 'c d'").unwrap();
        assert_eq!(
            definitions[0].alternatives,
            vec![vec![RawSymbol::literal("a | b"), RawSymbol::literal("c d")]]
        );
    }

    #[test]
    fn test_empty_alternative_and_continuation() {
        let definitions = parse_bnf("<opt> ::= | x\n  | y").unwrap();
        assert_eq!(definitions[0].alternatives.len(), 3);
        assert!(definitions[0].alternatives[0].is_empty());
    }

    #[test]
    fn test_comparison_literal_is_not_a_rule() {
        let definitions = parse_bnf("<cmp> ::= < | <= | >").unwrap();
        assert_eq!(
            definitions[0].alternatives,
            vec![
                vec![RawSymbol::literal("<")],
                vec![RawSymbol::literal("<=")],
                vec![RawSymbol::literal(">")]
            ]
        );
    }

    #[test]
    fn test_malformed_line_rejected() {
        let result = parse_bnf("<s> ::= a\nthis is not a rule");
        assert!(matches!(result, Err(GrammarError::Parse { line: 2, .. })));
    }

    #[test]
    fn test_unterminated_quote_rejected() {
        assert!(parse_bnf("<s> ::= \"open").is_err());
    }

    #[test]
    fn test_grammar_from_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("grammar.bnf");
        let mut file = File::create(&file_path).unwrap();
        write!(file, "<start> ::= <bit> | <bit> <start>\n<bit> ::= 0 | 1").unwrap();

        let grammar = Grammar::from_file(&file_path).unwrap();
        assert_eq!(grammar.start_rule().name(), "start");
        assert_eq!(grammar.start_rule().production_count(), 2);
    }

    #[test]
    fn test_missing_file_reported() {
        let dir = tempdir().unwrap();
        let result = Grammar::from_file(&dir.path().join("absent.bnf"));
        assert!(matches!(result, Err(GrammarError::FileRead(_))));
    }
}
