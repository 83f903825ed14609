//! In-memory implementations of the store traits for HTTP tests.
//!
//! Mirrors the Postgres stores closely enough for handler tests: unique
//! names conflict, ratings outside 1..=5 and unknown authors violate a
//! constraint, and comment authors come back resolved.

use std::sync::Mutex;

use async_trait::async_trait;
use bistro_core::models::dish::{
    Comment, CommentAuthor, CreateDish, Dish, NewComment, UpdateComment, UpdateDish,
};
use bistro_core::models::promotion::{CreatePromotion, Promotion, UpdatePromotion};
use bistro_core::models::user::{NewUser, User};
use bistro_core::models::DeleteSummary;
use bistro_core::store::{DishStore, PromotionStore, StoreError, StoreResult, UserStore};
use bistro_core::types::DbId;

#[derive(Default)]
struct Tables {
    next_id: DbId,
    users: Vec<User>,
    dishes: Vec<Dish>,
    promotions: Vec<Promotion>,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    fn dish_mut(&mut self, id: DbId) -> Option<&mut Dish> {
        self.dishes.iter_mut().find(|d| d.id == id)
    }
}

#[derive(Default)]
pub struct MemoryDb {
    tables: Mutex<Tables>,
}

impl MemoryDb {
    fn tables(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store lock poisoned")
    }

    /// Snapshot of a dish, bypassing the async trait.
    pub fn dish(&self, id: DbId) -> Option<Dish> {
        self.tables().dishes.iter().find(|d| d.id == id).cloned()
    }
}

#[async_trait]
impl DishStore for MemoryDb {
    async fn list(&self) -> StoreResult<Vec<Dish>> {
        Ok(self.tables().dishes.clone())
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Dish>> {
        Ok(self.dish(id))
    }

    async fn create(&self, input: &CreateDish) -> StoreResult<Dish> {
        let mut tables = self.tables();
        if tables.dishes.iter().any(|d| d.name == input.name) {
            return Err(StoreError::Conflict("uq_dishes_name".into()));
        }
        let now = chrono::Utc::now();
        let dish = Dish {
            id: tables.next_id(),
            name: input.name.clone(),
            description: input.description.clone(),
            image: input.image.clone(),
            category: input.category.clone(),
            label: input.label.clone(),
            price: input.price,
            featured: input.featured,
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        tables.dishes.push(dish.clone());
        Ok(dish)
    }

    async fn update(&self, id: DbId, input: &UpdateDish) -> StoreResult<Option<Dish>> {
        let mut tables = self.tables();
        let Some(dish) = tables.dish_mut(id) else {
            return Ok(None);
        };
        if let Some(v) = &input.name {
            dish.name.clone_from(v);
        }
        if let Some(v) = &input.description {
            dish.description.clone_from(v);
        }
        if let Some(v) = &input.image {
            dish.image.clone_from(v);
        }
        if let Some(v) = &input.category {
            dish.category.clone_from(v);
        }
        if let Some(v) = &input.label {
            dish.label.clone_from(v);
        }
        if let Some(v) = input.price {
            dish.price = v;
        }
        if let Some(v) = input.featured {
            dish.featured = v;
        }
        dish.updated_at = chrono::Utc::now();
        Ok(Some(dish.clone()))
    }

    async fn delete(&self, id: DbId) -> StoreResult<Option<Dish>> {
        let mut tables = self.tables();
        let idx = tables.dishes.iter().position(|d| d.id == id);
        Ok(idx.map(|i| tables.dishes.remove(i)))
    }

    async fn delete_all(&self) -> StoreResult<DeleteSummary> {
        let mut tables = self.tables();
        let deleted_count = tables.dishes.len() as u64;
        tables.dishes.clear();
        Ok(DeleteSummary { deleted_count })
    }

    async fn add_comment(&self, dish_id: DbId, input: &NewComment) -> StoreResult<Option<Dish>> {
        let mut tables = self.tables();
        if !(1..=5).contains(&input.rating) {
            return Err(StoreError::Constraint("ck_dish_comments_rating".into()));
        }
        let author = tables
            .users
            .iter()
            .find(|u| u.id == input.author_id)
            .map(|u| CommentAuthor {
                id: u.id,
                username: u.username.clone(),
                firstname: u.firstname.clone(),
                lastname: u.lastname.clone(),
            })
            .ok_or_else(|| StoreError::Constraint("dish_comments_author_id_fkey".into()))?;
        let id = tables.next_id();
        let Some(dish) = tables.dish_mut(dish_id) else {
            return Ok(None);
        };
        let now = chrono::Utc::now();
        dish.comments.push(Comment {
            id,
            rating: input.rating,
            comment: input.comment.clone(),
            author,
            created_at: now,
            updated_at: now,
        });
        dish.updated_at = now;
        Ok(Some(dish.clone()))
    }

    async fn update_comment(
        &self,
        dish_id: DbId,
        comment_id: DbId,
        input: &UpdateComment,
    ) -> StoreResult<Option<Dish>> {
        let mut tables = self.tables();
        let Some(dish) = tables.dish_mut(dish_id) else {
            return Ok(None);
        };
        if let Some(comment) = dish.comments.iter_mut().find(|c| c.id == comment_id) {
            input.apply_to(comment);
            comment.updated_at = chrono::Utc::now();
        }
        Ok(Some(dish.clone()))
    }

    async fn delete_comment(&self, dish_id: DbId, comment_id: DbId) -> StoreResult<Option<Dish>> {
        let mut tables = self.tables();
        let Some(dish) = tables.dish_mut(dish_id) else {
            return Ok(None);
        };
        dish.comments.retain(|c| c.id != comment_id);
        Ok(Some(dish.clone()))
    }

    async fn clear_comments(&self, dish_id: DbId) -> StoreResult<Option<Dish>> {
        let mut tables = self.tables();
        let Some(dish) = tables.dish_mut(dish_id) else {
            return Ok(None);
        };
        dish.comments.clear();
        Ok(Some(dish.clone()))
    }
}

#[async_trait]
impl PromotionStore for MemoryDb {
    async fn list(&self) -> StoreResult<Vec<Promotion>> {
        Ok(self.tables().promotions.clone())
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Promotion>> {
        Ok(self.tables().promotions.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, input: &CreatePromotion) -> StoreResult<Promotion> {
        let mut tables = self.tables();
        if tables.promotions.iter().any(|p| p.name == input.name) {
            return Err(StoreError::Conflict("uq_promotions_name".into()));
        }
        let now = chrono::Utc::now();
        let promotion = Promotion {
            id: tables.next_id(),
            name: input.name.clone(),
            description: input.description.clone(),
            image: input.image.clone(),
            label: input.label.clone(),
            price: input.price,
            featured: input.featured,
            created_at: now,
            updated_at: now,
        };
        tables.promotions.push(promotion.clone());
        Ok(promotion)
    }

    async fn update(&self, id: DbId, input: &UpdatePromotion) -> StoreResult<Option<Promotion>> {
        let mut tables = self.tables();
        let Some(promotion) = tables.promotions.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(v) = &input.name {
            promotion.name.clone_from(v);
        }
        if let Some(v) = &input.description {
            promotion.description.clone_from(v);
        }
        if let Some(v) = &input.image {
            promotion.image.clone_from(v);
        }
        if let Some(v) = &input.label {
            promotion.label.clone_from(v);
        }
        if let Some(v) = input.price {
            promotion.price = v;
        }
        if let Some(v) = input.featured {
            promotion.featured = v;
        }
        promotion.updated_at = chrono::Utc::now();
        Ok(Some(promotion.clone()))
    }

    async fn delete(&self, id: DbId) -> StoreResult<Option<Promotion>> {
        let mut tables = self.tables();
        let idx = tables.promotions.iter().position(|p| p.id == id);
        Ok(idx.map(|i| tables.promotions.remove(i)))
    }

    async fn delete_all(&self) -> StoreResult<DeleteSummary> {
        let mut tables = self.tables();
        let deleted_count = tables.promotions.len() as u64;
        tables.promotions.clear();
        Ok(DeleteSummary { deleted_count })
    }
}

#[async_trait]
impl UserStore for MemoryDb {
    async fn create(&self, input: &NewUser) -> StoreResult<User> {
        let mut tables = self.tables();
        if tables.users.iter().any(|u| u.username == input.username) {
            return Err(StoreError::Conflict("uq_users_username".into()));
        }
        let user = User {
            id: tables.next_id(),
            username: input.username.clone(),
            firstname: input.firstname.clone(),
            lastname: input.lastname.clone(),
            admin: input.admin,
            password_hash: input.password_hash.clone(),
            created_at: chrono::Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .tables()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        Ok(self.tables().users.clone())
    }
}
