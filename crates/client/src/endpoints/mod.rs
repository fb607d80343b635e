//! Endpoint groups, one per API area.
//!
//! Each group borrows the [`ApiClient`](crate::ApiClient) and is obtained
//! through its accessors: `client.auth()`, `client.incidents()`,
//! `client.change_requests()`, `client.users()`.

mod auth;
mod change_requests;
mod incidents;
mod users;

pub use auth::AuthApi;
pub use change_requests::ChangeRequestsApi;
pub use incidents::IncidentsApi;
pub use users::UsersApi;
