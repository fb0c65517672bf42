use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{NewUser, Teacher, User};
use crate::database::store::{TeacherStore, TeacherWithCreator, UserWithTeachers};

const TEACHER_COLUMNS: &str = "id, name, phone, email, creator";
const USER_COLUMNS: &str = "id, name, email, teacher";

/// PostgreSQL-backed store. Two-document writes run in an sqlx transaction;
/// returning early drops the transaction, which rolls it back.
#[derive(Clone)]
pub struct PgTeacherStore {
    pool: PgPool,
}

impl PgTeacherStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn teachers_in_order(&self, ids: &[Uuid]) -> Result<Vec<Teacher>, DatabaseError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let sql = format!(
            "SELECT {} FROM teachers WHERE id = ANY($1) ORDER BY array_position($1, id)",
            TEACHER_COLUMNS
        );
        let teachers = sqlx::query_as::<_, Teacher>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(teachers)
    }
}

#[async_trait]
impl TeacherStore for PgTeacherStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }

    async fn find_teacher(&self, id: Uuid) -> Result<Option<Teacher>, DatabaseError> {
        let sql = format!("SELECT {} FROM teachers WHERE id = $1", TEACHER_COLUMNS);
        let teacher = sqlx::query_as::<_, Teacher>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(teacher)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_with_teachers(&self, id: Uuid) -> Result<Option<UserWithTeachers>, DatabaseError> {
        let Some(user) = self.find_user(id).await? else {
            return Ok(None);
        };
        let teachers = self.teachers_in_order(&user.teacher).await?;
        Ok(Some(UserWithTeachers { user, teachers }))
    }

    async fn find_teacher_with_creator(&self, id: Uuid) -> Result<Option<TeacherWithCreator>, DatabaseError> {
        let Some(teacher) = self.find_teacher(id).await? else {
            return Ok(None);
        };
        let creator = self.find_user(teacher.creator).await?;
        Ok(Some(TeacherWithCreator { teacher, creator }))
    }

    async fn insert_teacher_for(&self, teacher: &Teacher, creator: &User) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO teachers (id, name, phone, email, creator) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(teacher.id)
        .bind(&teacher.name)
        .bind(&teacher.phone)
        .bind(&teacher.email)
        .bind(teacher.creator)
        .execute(&mut *tx)
        .await?;

        let pushed = sqlx::query("UPDATE users SET teacher = array_append(teacher, $1) WHERE id = $2")
            .bind(teacher.id)
            .bind(creator.id)
            .execute(&mut *tx)
            .await?;
        if pushed.rows_affected() != 1 {
            tx.rollback().await?;
            return Err(DatabaseError::NotFound(format!("user {}", creator.id)));
        }

        tx.commit().await?;
        debug!(teacher = %teacher.id, user = %creator.id, "committed teacher insert");
        Ok(())
    }

    async fn save_teacher(&self, teacher: &Teacher) -> Result<(), DatabaseError> {
        let updated = sqlx::query("UPDATE teachers SET name = $2, phone = $3 WHERE id = $1")
            .bind(teacher.id)
            .bind(&teacher.name)
            .bind(&teacher.phone)
            .execute(&self.pool)
            .await?;
        if updated.rows_affected() != 1 {
            return Err(DatabaseError::NotFound(format!("teacher {}", teacher.id)));
        }
        Ok(())
    }

    async fn remove_teacher_from(&self, teacher: &Teacher, creator: &User) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM teachers WHERE id = $1")
            .bind(teacher.id)
            .execute(&mut *tx)
            .await?;
        if deleted.rows_affected() != 1 {
            tx.rollback().await?;
            return Err(DatabaseError::NotFound(format!("teacher {}", teacher.id)));
        }

        let pulled = sqlx::query("UPDATE users SET teacher = array_remove(teacher, $1) WHERE id = $2")
            .bind(teacher.id)
            .bind(creator.id)
            .execute(&mut *tx)
            .await?;
        if pulled.rows_affected() != 1 {
            tx.rollback().await?;
            return Err(DatabaseError::NotFound(format!("user {}", creator.id)));
        }

        tx.commit().await?;
        debug!(teacher = %teacher.id, user = %creator.id, "committed teacher removal");
        Ok(())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let user = user.into_user();
        sqlx::query("INSERT INTO users (id, name, email, teacher) VALUES ($1, $2, $3, $4)")
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.teacher)
            .execute(&self.pool)
            .await?;
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users ORDER BY name, id", USER_COLUMNS);
        let users = sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?;
        Ok(users)
    }

    async fn close(&self) {
        DatabaseManager::close(&self.pool).await;
    }
}
