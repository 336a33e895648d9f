pub mod breadcrumb;
pub mod error_message;
pub mod loading;
