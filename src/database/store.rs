use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewUser, Teacher, User};

/// A user with its `teacher` references resolved, in list order
#[derive(Debug, Clone)]
pub struct UserWithTeachers {
    pub user: User,
    pub teachers: Vec<Teacher>,
}

/// A teacher with its `creator` reference resolved. `creator` is `None` when the
/// referenced user no longer exists.
#[derive(Debug, Clone)]
pub struct TeacherWithCreator {
    pub teacher: Teacher,
    pub creator: Option<User>,
}

/// Persistence for teachers and the users that created them.
///
/// `insert_teacher_for` and `remove_teacher_from` touch two documents and must be
/// all-or-nothing: when either write fails, neither is visible afterwards.
#[async_trait]
pub trait TeacherStore: Send + Sync {
    async fn ping(&self) -> Result<(), DatabaseError>;

    async fn find_teacher(&self, id: Uuid) -> Result<Option<Teacher>, DatabaseError>;

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;

    async fn find_user_with_teachers(&self, id: Uuid) -> Result<Option<UserWithTeachers>, DatabaseError>;

    async fn find_teacher_with_creator(&self, id: Uuid) -> Result<Option<TeacherWithCreator>, DatabaseError>;

    /// Persist `teacher` and append its id to `creator.teacher` in one transaction
    async fn insert_teacher_for(&self, teacher: &Teacher, creator: &User) -> Result<(), DatabaseError>;

    /// Overwrite a single teacher document
    async fn save_teacher(&self, teacher: &Teacher) -> Result<(), DatabaseError>;

    /// Delete `teacher` and pull its id from `creator.teacher` in one transaction
    async fn remove_teacher_from(&self, teacher: &Teacher, creator: &User) -> Result<(), DatabaseError>;

    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError>;

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError>;

    /// Release connections on shutdown
    async fn close(&self) {}
}
