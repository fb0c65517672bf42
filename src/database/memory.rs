use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewUser, Teacher, User};
use crate::database::store::{TeacherStore, TeacherWithCreator, UserWithTeachers};

/// Failure points that can be armed on a [`MemoryStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Every read fails
    Lookup,
    /// Writes to the teachers collection fail
    TeacherWrite,
    /// Writes to the users collection fail
    UserWrite,
}

#[derive(Default)]
struct Collections {
    teachers: HashMap<Uuid, Teacher>,
    users: HashMap<Uuid, User>,
    fault: Option<Fault>,
}

impl Collections {
    fn check(&self, point: Fault) -> Result<(), DatabaseError> {
        match self.fault {
            Some(armed) if armed == point => Err(DatabaseError::QueryError(format!("injected fault: {:?}", point))),
            _ => Ok(()),
        }
    }
}

/// In-process store for development and tests.
///
/// Transactions stage their writes on copies while holding the write lock and
/// only swap them in once every step succeeded.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or with `None`, clear) a failure point
    pub async fn set_fault(&self, fault: Option<Fault>) {
        self.inner.write().await.fault = fault;
    }

    pub async fn teacher_count(&self) -> usize {
        self.inner.read().await.teachers.len()
    }
}

#[async_trait]
impl TeacherStore for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        self.inner.read().await.check(Fault::Lookup)
    }

    async fn find_teacher(&self, id: Uuid) -> Result<Option<Teacher>, DatabaseError> {
        let inner = self.inner.read().await;
        inner.check(Fault::Lookup)?;
        Ok(inner.teachers.get(&id).cloned())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let inner = self.inner.read().await;
        inner.check(Fault::Lookup)?;
        Ok(inner.users.get(&id).cloned())
    }

    async fn find_user_with_teachers(&self, id: Uuid) -> Result<Option<UserWithTeachers>, DatabaseError> {
        let inner = self.inner.read().await;
        inner.check(Fault::Lookup)?;

        let Some(user) = inner.users.get(&id).cloned() else {
            return Ok(None);
        };
        // Dangling references are skipped, as a populate would
        let teachers = user
            .teacher
            .iter()
            .filter_map(|teacher_id| inner.teachers.get(teacher_id).cloned())
            .collect();
        Ok(Some(UserWithTeachers { user, teachers }))
    }

    async fn find_teacher_with_creator(&self, id: Uuid) -> Result<Option<TeacherWithCreator>, DatabaseError> {
        let inner = self.inner.read().await;
        inner.check(Fault::Lookup)?;

        let Some(teacher) = inner.teachers.get(&id).cloned() else {
            return Ok(None);
        };
        let creator = inner.users.get(&teacher.creator).cloned();
        Ok(Some(TeacherWithCreator { teacher, creator }))
    }

    async fn insert_teacher_for(&self, teacher: &Teacher, creator: &User) -> Result<(), DatabaseError> {
        let mut inner = self.inner.write().await;

        inner.check(Fault::TeacherWrite)?;
        if inner.teachers.contains_key(&teacher.id) {
            return Err(DatabaseError::QueryError(format!("duplicate teacher id {}", teacher.id)));
        }

        inner.check(Fault::UserWrite)?;
        let mut staged_user = inner
            .users
            .get(&creator.id)
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound(format!("user {}", creator.id)))?;
        staged_user.teacher.push(teacher.id);

        inner.teachers.insert(teacher.id, teacher.clone());
        inner.users.insert(staged_user.id, staged_user);
        Ok(())
    }

    async fn save_teacher(&self, teacher: &Teacher) -> Result<(), DatabaseError> {
        let mut inner = self.inner.write().await;
        inner.check(Fault::TeacherWrite)?;

        let stored = inner
            .teachers
            .get_mut(&teacher.id)
            .ok_or_else(|| DatabaseError::NotFound(format!("teacher {}", teacher.id)))?;
        stored.name = teacher.name.clone();
        stored.phone = teacher.phone.clone();
        Ok(())
    }

    async fn remove_teacher_from(&self, teacher: &Teacher, creator: &User) -> Result<(), DatabaseError> {
        let mut inner = self.inner.write().await;

        inner.check(Fault::TeacherWrite)?;
        if !inner.teachers.contains_key(&teacher.id) {
            return Err(DatabaseError::NotFound(format!("teacher {}", teacher.id)));
        }

        inner.check(Fault::UserWrite)?;
        let mut staged_user = inner
            .users
            .get(&creator.id)
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound(format!("user {}", creator.id)))?;
        staged_user.teacher.retain(|id| *id != teacher.id);

        inner.teachers.remove(&teacher.id);
        inner.users.insert(staged_user.id, staged_user);
        Ok(())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut inner = self.inner.write().await;
        inner.check(Fault::UserWrite)?;

        let user = user.into_user();
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let inner = self.inner.read().await;
        inner.check(Fault::Lookup)?;

        let mut users: Vec<User> = inner.users.values().cloned().collect();
        users.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(users)
    }
}
