mod user_model;

pub use user_model::{UpdateUserRequest, User, render_listing};
