pub mod greet;
pub mod hospital;
pub mod role;
pub mod users;
