//! Line commands accepted by the terminal host.
//!
//! ```text
//! category 5
//! manufacturer all
//! color 12
//! show
//! quit
//! ```

use thiserror::Error;

use crate::types::{FilterValue, InvalidFilterValue};

use super::message::UserEvent;

/// A parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Select(UserEvent),
    Show,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {0:?} (expected category, manufacturer, color, show or quit)")]
    Unknown(String),

    #[error("{0} needs a value: an id or `all`")]
    MissingValue(&'static str),

    #[error(transparent)]
    InvalidValue(#[from] InvalidFilterValue),
}

/// Parses one input line.
///
/// Command words are case-insensitive and may be abbreviated to their first
/// letter. Blank lines yield `Ok(None)`.
///
/// # Examples
///
/// ```
/// use catalog_cascade::session::{Command, UserEvent, parse_command};
/// use catalog_cascade::types::{CategoryId, FilterValue};
///
/// assert_eq!(
///     parse_command("category 5").unwrap(),
///     Some(Command::Select(UserEvent::Category(FilterValue::Only(CategoryId(5)))))
/// );
/// assert_eq!(
///     parse_command("C all").unwrap(),
///     Some(Command::Select(UserEvent::Category(FilterValue::All)))
/// );
/// assert_eq!(parse_command("   ").unwrap(), None);
/// assert!(parse_command("manufacturer").is_err());
/// ```
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(None);
    };
    let value = words.next();

    let command = match word.to_ascii_lowercase().as_str() {
        "category" | "c" => Command::Select(UserEvent::Category(parse_value("category", value)?)),
        "manufacturer" | "m" => {
            Command::Select(UserEvent::Manufacturer(parse_value("manufacturer", value)?))
        }
        "color" | "colour" | "k" => Command::Select(UserEvent::Color(parse_value("color", value)?)),
        "show" | "s" => Command::Show,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };

    Ok(Some(command))
}

fn parse_value<T>(slot: &'static str, raw: Option<&str>) -> Result<FilterValue<T>, CommandError>
where
    T: std::str::FromStr<Err = InvalidFilterValue>,
{
    let raw = raw.ok_or(CommandError::MissingValue(slot))?;
    Ok(FilterValue::parse(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColorId, ManufacturerId};
    use proptest::prelude::*;

    #[test]
    fn parses_each_slot() {
        assert_eq!(
            parse_command("manufacturer 7").unwrap(),
            Some(Command::Select(UserEvent::Manufacturer(FilterValue::Only(
                ManufacturerId(7)
            ))))
        );
        assert_eq!(
            parse_command("color all").unwrap(),
            Some(Command::Select(UserEvent::Color(FilterValue::All)))
        );
        assert_eq!(
            parse_command("k 3").unwrap(),
            Some(Command::Select(UserEvent::Color(FilterValue::Only(ColorId(3)))))
        );
    }

    #[test]
    fn parses_control_words() {
        assert_eq!(parse_command("show").unwrap(), Some(Command::Show));
        assert_eq!(parse_command("  QUIT ").unwrap(), Some(Command::Quit));
        assert_eq!(parse_command("q").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn rejects_unknown_word() {
        assert_eq!(
            parse_command("price 10"),
            Err(CommandError::Unknown("price".into()))
        );
    }

    #[test]
    fn rejects_bad_value() {
        assert!(matches!(
            parse_command("category five"),
            Err(CommandError::InvalidValue(_))
        ));
        assert_eq!(
            parse_command("color"),
            Err(CommandError::MissingValue("color"))
        );
    }

    proptest! {
        #[test]
        fn numeric_ids_parse(id in any::<u64>()) {
            let parsed = parse_command(&format!("manufacturer {}", id)).unwrap();
            let expected = UserEvent::Manufacturer(FilterValue::Only(ManufacturerId(id)));
            prop_assert_eq!(parsed, Some(Command::Select(expected)));
        }

        #[test]
        fn never_panics(line in ".*") {
            let _ = parse_command(&line);
        }
    }
}
