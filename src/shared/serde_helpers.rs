//! Deserializers tolerant of the backend's loose JSON typing.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
    UInt(u64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Int(n) => n.to_string(),
            RawId::UInt(n) => n.to_string(),
        }
    }
}

/// Accept an identifier sent either as a JSON number or a string
pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

/// Same as [`id`] for nullable references
pub fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(String::from))
}

/// Treat `null` as an empty list
pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

fn parse_number<E: serde::de::Error>(raw: RawNumber) -> Result<f64, E> {
    match raw {
        RawNumber::Number(n) => Ok(n),
        RawNumber::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| E::custom(format!("invalid number: {:?}", s))),
    }
}

/// Accept a number sent either as JSON number or numeric string (decimal columns)
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    RawNumber::deserialize(deserializer).and_then(parse_number)
}

/// Same as [`number`] for nullable values
pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawNumber>::deserialize(deserializer)?
        .map(parse_number::<D::Error>)
        .transpose()
}
