pub mod app;
pub mod auth;
pub mod donations;
pub mod forms;
pub mod home;
pub mod layout;
pub mod notifications;
pub mod panels;
pub mod scan;
pub mod tracking;

pub use app::render_app;
