//! DTOs shared by the HTTP API.

use serde::Deserialize;

pub mod api;
pub mod backup;
pub mod user;

/// Discord snowflakes are sent as strings so JavaScript clients don't lose precision.
fn serialize_u64_as_string<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&value.to_string())
}

fn deserialize_u64_from_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    String::deserialize(deserializer)?
        .parse::<u64>()
        .map_err(D::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::user::UserDto;

    /// Tests that snowflake ids survive a JSON round trip as strings.
    ///
    /// Expected: id serialized as a quoted string and parsed back
    #[test]
    fn snowflakes_are_strings() {
        let dto = UserDto {
            id: 123456789012345678,
            name: "Tester".to_string(),
        };

        let json = serde_json::to_string(&dto).unwrap();
        assert!(json.contains(r#""id":"123456789012345678""#));

        let parsed: UserDto = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, dto);
    }
}
