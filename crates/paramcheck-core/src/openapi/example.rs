//! Example Object. Carried through as documentation; never validated.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::{Extensions, Ref};

pub type ExampleRef = Ref<Example>;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Example {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<JsonValue>,

    /// URL of an example that cannot be embedded
    #[serde(
        default,
        rename = "externalValue",
        skip_serializing_if = "Option::is_none"
    )]
    pub external_value: Option<String>,

    #[serde(flatten)]
    pub extensions: Extensions,
}
