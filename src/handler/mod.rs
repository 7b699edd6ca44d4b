pub mod ai_handler;
pub mod auth;
pub mod google_oauth;
pub mod ticket_handler;
pub mod users;
