mod manage;

pub use manage::{add_staff_user, list_users, list_users_by_role, update_profile};
