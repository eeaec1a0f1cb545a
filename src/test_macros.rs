#[macro_export]
macro_rules! relative_file {
    ($f : expr) => {{
        let base = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        base.join($f)
    }};
}

#[macro_export]
macro_rules! tokens_of {
    ($s : expr) => {{
        $crate::lexer::scan($s)
            .unwrap()
            .into_iter()
            .map(|packed| packed.0)
            .collect::<Vec<$crate::lexer::Token>>()
    }};
}

#[cfg(test)]
mod tests {
    use crate::lexer::Token;
    use crate::parser::Parser;
    use std::fs;

    #[test]
    fn should_parse_valid_fixtures() {
        for f in fs::read_dir(relative_file!("fixtures/json/valid")).unwrap() {
            let path = f.unwrap().path();
            let text = fs::read_to_string(&path).unwrap();
            let parsed = Parser::default().with_array_root(true).parse_str(&text);
            assert!(parsed.is_ok(), "{:?}: {:?}", path, parsed);
        }
    }

    #[test]
    fn should_collect_tokens() {
        assert_eq!(tokens_of!("[null]")[1], Token::Null);
    }
}
