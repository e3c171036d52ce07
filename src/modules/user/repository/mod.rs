mod memory;
mod postgres;
mod user_repository;

pub use memory::MemoryUserRepository;
pub use postgres::PgUserRepository;
pub use user_repository::UserRepository;
