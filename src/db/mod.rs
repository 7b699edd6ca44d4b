pub mod auditdb;
pub mod db;
pub mod ticketdb;
pub mod userdb;
