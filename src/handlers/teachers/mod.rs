// handlers/teachers - the five teacher endpoints, nested under the configured mount path
//
// GET    /:tid        show
// GET    /user/:uid   by_user
// POST   /            create
// PATCH  /:tid        update
// DELETE /:tid        delete

pub mod by_user;
pub mod create;
pub mod delete;
pub mod show;
pub mod update;

pub use by_user::get as teachers_by_user_get;
pub use create::post as teacher_post;
pub use delete::delete as teacher_delete;
pub use show::get as teacher_get;
pub use update::patch as teacher_patch;

use uuid::Uuid;

/// Path ids that don't parse can't name a stored document, so they read as absent
pub(crate) fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}
