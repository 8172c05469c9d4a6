use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": "2",
        "name": "John Doe",
        "role": "Software Engineer",
        "department": "Engineering",
        "joinDate": "2023-03-10",
        "avatarUrl": "https://picsum.photos/seed/john/200"
    })
)]
pub struct Employee {
    #[schema(example = "2")]
    pub id: String,

    #[schema(example = "John Doe")]
    pub name: String,

    #[schema(example = "Software Engineer")]
    pub role: String,

    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(example = "2023-03-10", value_type = String, format = "date")]
    pub join_date: String,

    #[schema(example = "https://picsum.photos/seed/john/200")]
    #[serde(default)]
    pub avatar_url: String,
}

impl Employee {
    /// Name substring (case-insensitive) or id substring, the attendance grid search rule.
    pub fn matches_search(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase()) || self.id.contains(term)
    }
}
