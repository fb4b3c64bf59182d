//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see the driving
//! ports, so tests can swap in an in-memory store or mocks.

use std::sync::Arc;

use crate::domain::UserService;
use crate::domain::ports::{UserRepository, UsersCommand, UsersQuery};

/// Dependency bundle for the user handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users_query: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
}

impl HttpState {
    /// Bundle explicit port implementations.
    pub fn new(users_query: Arc<dyn UsersQuery>, users_command: Arc<dyn UsersCommand>) -> Self {
        Self {
            users_query,
            users_command,
        }
    }

    /// Wire both ports to one [`UserService`] over `repository`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use userbase::inbound::http::state::HttpState;
    /// use userbase::outbound::memory::InMemoryUserRepository;
    ///
    /// let state = HttpState::for_repository(Arc::new(InMemoryUserRepository::new()));
    /// # let _ = state;
    /// ```
    pub fn for_repository(repository: Arc<dyn UserRepository>) -> Self {
        let service = Arc::new(UserService::new(repository));
        Self::new(service.clone(), service)
    }
}
