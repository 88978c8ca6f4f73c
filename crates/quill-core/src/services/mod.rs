//! Application services - orchestrate ports into the account and post use cases.

mod account;
mod posts;

pub use account::AccountService;
pub use posts::{DEFAULT_PAGE_SIZE, PostService};
