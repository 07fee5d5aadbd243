use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{deserialize_u64_from_string, serialize_u64_as_string};

/// The Discord user logged into the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    #[serde(
        serialize_with = "serialize_u64_as_string",
        deserialize_with = "deserialize_u64_from_string"
    )]
    #[schema(value_type = String)]
    pub id: u64,
    pub name: String,
}
