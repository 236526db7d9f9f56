use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tag entity - a named label applied to posts, many-to-many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub title: String,
}

impl Tag {
    pub fn new(title: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
        }
    }
}
