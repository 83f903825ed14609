//! Access rules for `/dishes/{dish_id}/comments/{comment_id}`.
//!
//! The rules run top to bottom and the first one that fails decides the
//! error. Each rule hands what it found to the next one. A missing dish
//! wins over a missing comment, and a missing comment wins over an
//! ownership failure.
//!
//! | # | Rule                  | Failure                                     |
//! |---|-----------------------|---------------------------------------------|
//! | 1 | dish exists           | 404 `Dish {dish_id} not found`              |
//! | 2 | comment is in dish    | 404 `Comment {id} not found in dish {id}`   |
//! | 3 | caller owns comment   | 403 (mutations only)                        |

use crate::error::CoreError;
use crate::models::dish::{Comment, Dish};
use crate::types::DbId;

/// Message returned when a caller tries to change someone else's comment.
pub const NOT_OWNER_MESSAGE: &str = "You are not authorized to perform this operation";

/// What the caller wants to do with the comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentAction {
    Read,
    Modify { caller: DbId },
}

/// True when `caller` is the author of `comment`.
pub fn is_owner(comment: &Comment, caller: DbId) -> bool {
    comment.author.id == caller
}

/// Unwrap a dish fetched for one of the comment endpoints, or fail with 404.
pub fn require_dish(dish: Option<Dish>, dish_id: DbId) -> Result<Dish, CoreError> {
    dish.ok_or(CoreError::NotFound {
        entity: "Dish",
        id: dish_id,
    })
}

/// A pending lookup of one comment inside a (possibly missing) dish.
#[derive(Debug, Clone, Copy)]
pub struct CommentLookup<'a> {
    pub dish: Option<&'a Dish>,
    pub dish_id: DbId,
    pub comment_id: DbId,
    pub action: CommentAction,
}

impl<'a> CommentLookup<'a> {
    pub fn new(
        dish: Option<&'a Dish>,
        dish_id: DbId,
        comment_id: DbId,
        action: CommentAction,
    ) -> Self {
        Self {
            dish,
            dish_id,
            comment_id,
            action,
        }
    }

    /// Evaluate the rules in table order and return the located comment.
    pub fn resolve(self) -> Result<&'a Comment, CoreError> {
        let dish = self.dish_exists()?;
        let comment = self.comment_exists(dish)?;
        self.caller_owns_comment(comment)?;
        Ok(comment)
    }

    fn dish_exists(&self) -> Result<&'a Dish, CoreError> {
        self.dish.ok_or(CoreError::NotFound {
            entity: "Dish",
            id: self.dish_id,
        })
    }

    fn comment_exists(&self, dish: &'a Dish) -> Result<&'a Comment, CoreError> {
        dish.comment(self.comment_id).ok_or(CoreError::CommentNotFound {
            dish_id: self.dish_id,
            comment_id: self.comment_id,
        })
    }

    fn caller_owns_comment(&self, comment: &Comment) -> Result<(), CoreError> {
        match self.action {
            CommentAction::Modify { caller } if !is_owner(comment, caller) => {
                Err(CoreError::Forbidden(NOT_OWNER_MESSAGE.to_string()))
            }
            _ => Ok(()),
        }
    }
}
