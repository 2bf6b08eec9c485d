// User accounts: entity with hashed password, storage and HTTP handlers

pub mod handlers;
pub mod models;
pub mod password;
pub mod repository;

pub use handlers::{create_user, generate_jwt};
pub use models::{CreateUserInput, GetJwtInput, GetJwtOutput, User};
pub use password::PasswordService;
pub use repository::{MemoryUserRepository, PgUserRepository, UserRepository};
