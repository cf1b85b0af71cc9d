pub mod coach;
pub mod context;
pub mod dashboard;
pub mod logging;
pub mod render;
pub mod session;
pub mod watch;
