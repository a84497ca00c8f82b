use crate::error::FormatError;
use crate::text::{quote, unquote};
use crate::value::{Enum, Scalar, Text};

pub(super) fn render_scalar(value: &dyn Scalar) -> String {
    let mut token = String::new();
    value.write_token(&mut token);
    token
}

pub(super) fn render_text(value: &dyn Text) -> String {
    quote(&value.text())
}

pub(super) fn parse_scalar(value: &mut dyn Scalar, token: &str) -> Result<(), FormatError> {
    if value.read_token(token) {
        Ok(())
    } else {
        Err(FormatError::InvalidToken {
            token: token.to_owned(),
            expected: value.value_type_path(),
        })
    }
}

fn unquote_token(token: &str) -> Result<String, FormatError> {
    if !(token.len() >= 2 && token.starts_with('"') && token.ends_with('"')) {
        return Err(FormatError::InvalidToken {
            token: token.to_owned(),
            expected: "a quoted string".into(),
        });
    }
    unquote(token).ok_or_else(|| FormatError::InvalidEscape(token.to_owned()))
}

pub(super) fn parse_text(value: &mut dyn Text, token: &str) -> Result<(), FormatError> {
    let text = unquote_token(token)?;
    if value.set_text(text) {
        Ok(())
    } else {
        Err(FormatError::InvalidToken {
            token: token.to_owned(),
            expected: value.value_type_path(),
        })
    }
}

pub(super) fn parse_quoted_scalar(value: &mut dyn Scalar, token: &str) -> Result<(), FormatError> {
    let text = unquote_token(token)?;
    parse_scalar(value, &text)
}

/// Enum constants are matched exactly, in declaration order.
pub(super) fn parse_enum(value: &mut dyn Enum, token: &str) -> Result<(), FormatError> {
    let index = value.variant_names().iter().position(|name| *name == token);
    match index {
        Some(index) if value.set_variant_index(index) => Ok(()),
        _ => Err(FormatError::UnknownConstant {
            token: token.to_owned(),
            owner: value.value_type_path(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_quoted_scalar, parse_scalar, parse_text};
    use crate::error::FormatError;

    #[test]
    fn scalar_tokens() {
        let mut value = 0_i64;
        parse_scalar(&mut value, "-17").unwrap();
        assert_eq!(value, -17);

        let err = parse_scalar(&mut value, "seven").unwrap_err();
        assert!(matches!(err, FormatError::InvalidToken { ref token, .. } if token == "seven"));
        assert_eq!(value, -17);

        let mut flag = false;
        parse_scalar(&mut flag, "true").unwrap();
        assert!(flag);
    }

    #[test]
    fn text_tokens() {
        let mut text = String::new();
        parse_text(&mut text, "\"a%0Ab\"").unwrap();
        assert_eq!(text, "a\nb");

        assert!(matches!(
            parse_text(&mut text, "bare"),
            Err(FormatError::InvalidToken { .. })
        ));
        assert!(matches!(
            parse_text(&mut text, "\"%G1\""),
            Err(FormatError::InvalidEscape(_))
        ));

        let mut letter = 'x';
        assert!(parse_text(&mut letter, "\"ab\"").is_err());
        parse_text(&mut letter, "\"b\"").unwrap();
        assert_eq!(letter, 'b');
    }

    #[test]
    fn quoted_scalar() {
        let mut value = 0_u16;
        parse_quoted_scalar(&mut value, "\"12\"").unwrap();
        assert_eq!(value, 12);
    }
}
