use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An instructor record. `creator` points at the user whose `teacher` list holds this id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Teacher {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub creator: Uuid,
}

/// Validated input for a teacher that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeacher {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub creator: Uuid,
}

impl NewTeacher {
    /// Assigns the document id. Ids are generated here, before the write, so the
    /// creator's back-reference can be pushed in the same transaction.
    pub fn into_teacher(self) -> Teacher {
        Teacher {
            id: Uuid::new_v4(),
            name: self.name,
            phone: self.phone,
            email: self.email,
            creator: self.creator,
        }
    }
}

/// The only fields an update may touch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherChanges {
    pub name: String,
    pub phone: String,
}

impl Teacher {
    pub fn apply(&mut self, changes: TeacherChanges) {
        self.name = changes.name;
        self.phone = changes.phone;
    }
}
