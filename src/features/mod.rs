//! Domain-level frontend features and their shared logic. The view imports these
//! modules to stay focused on DOM state while API and ceremony handling live in
//! dedicated feature areas.

pub mod auth;
