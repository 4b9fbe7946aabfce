pub mod api_client;
pub mod session_storage;

pub use api_client::HttpClimbApi;
pub use session_storage::FileSessionStorage;
