use serde::{de::IgnoredAny, Deserialize, Deserializer};
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTag {
    Text(String),
    Other(IgnoredAny),
}

///
/// Unknown, missing or non-string tags are not an error,
/// the field is simply left empty.
///
pub(crate) fn de_lenient_tag<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let tag = match Option::<RawTag>::deserialize(d)? {
        Some(RawTag::Text(tag)) => T::from_str(&tag).ok(),
        Some(RawTag::Other(_)) | None => None,
    };

    Ok(tag)
}
