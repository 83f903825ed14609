//! Dish entity, its embedded comments, and their DTOs.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// A menu item together with its comments, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub image: String,
    pub category: String,
    pub label: String,
    /// Price in minor currency units (cents).
    pub price: i64,
    pub featured: bool,
    pub comments: Vec<Comment>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Dish {
    /// Look up a comment of this dish by its id.
    pub fn comment(&self, comment_id: DbId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == comment_id)
    }
}

/// A rated note on a dish, with its author already resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: DbId,
    pub rating: i32,
    pub comment: String,
    pub author: CommentAuthor,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public view of the user referenced by `Comment::author`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub id: DbId,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
}

/// DTO for creating a dish. Only `name` and `description` are required.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDish {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub featured: bool,
}

/// DTO for updating a dish. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDish {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub label: Option<String>,
    pub price: Option<i64>,
    pub featured: Option<bool>,
}

/// Comment body as posted by a client.
///
/// There is deliberately no `author` field: unknown keys are dropped on
/// deserialization and the author always comes from the caller's token.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateComment {
    pub rating: i32,
    pub comment: String,
}

impl CreateComment {
    /// Attach the authenticated caller as author.
    pub fn authored_by(self, author_id: DbId) -> NewComment {
        NewComment {
            rating: self.rating,
            comment: self.comment,
            author_id,
        }
    }
}

/// A comment ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub rating: i32,
    pub comment: String,
    pub author_id: DbId,
}

/// Selective comment update. Only `rating` and `comment` are writable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateComment {
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

impl UpdateComment {
    /// Overwrite the fields present in this update, leaving the rest alone.
    pub fn apply_to(&self, target: &mut Comment) {
        if let Some(rating) = self.rating {
            target.rating = rating;
        }
        if let Some(comment) = &self.comment {
            target.comment.clone_from(comment);
        }
    }
}
