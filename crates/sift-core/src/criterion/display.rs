use crate::{
    criterion::{Criterion, ScalarSet},
    grammar,
    value::write_quoted,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use std::{fmt, str::FromStr};

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Never => f.write_str("never"),
            Self::Is(value) => write!(f, "{value}"),
            Self::Not(value) => write!(f, "!{value}"),
            Self::InSet(values) => write_set(f, values),
            Self::NotInSet(values) => {
                f.write_str("!")?;
                write_set(f, values)
            }
            Self::InRange(range) => write!(f, "{range}"),
            Self::Parity(parity) => write!(f, "{parity}"),
            Self::Some(inner) => write!(f, "some({inner})"),
            Self::And(items) => write_joined(f, items, " & "),
            Self::Or(items) => write_joined(f, items, " | "),
            Self::Named(fields) => {
                f.write_str("{")?;
                for (index, (key, criterion)) in fields.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write_key(f, key)?;
                    write!(f, ": {criterion}")?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_set(f: &mut fmt::Formatter<'_>, values: &ScalarSet) -> fmt::Result {
    f.write_str("{")?;
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{value}")?;
    }
    f.write_str("}")
}

// Nested composites are always parenthesized.
fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Criterion], separator: &str) -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_str(separator)?;
        }
        if matches!(item, Criterion::And(_) | Criterion::Or(_)) {
            write!(f, "({item})")?;
        } else {
            write!(f, "{item}")?;
        }
    }

    Ok(())
}

fn write_key(f: &mut fmt::Formatter<'_>, key: &str) -> fmt::Result {
    if grammar::is_ident(key) {
        f.write_str(key)
    } else {
        write_quoted(f, key)
    }
}

impl FromStr for Criterion {
    type Err = grammar::ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        grammar::parse(text)
    }
}

impl Serialize for Criterion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Criterion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;

        text.parse().map_err(D::Error::custom)
    }
}
