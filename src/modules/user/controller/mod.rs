mod user_controller;

pub use user_controller::{ACKNOWLEDGEMENT, UserController};
