pub mod teacher;
pub mod user;

pub use teacher::{NewTeacher, Teacher, TeacherChanges};
pub use user::{NewUser, User};
