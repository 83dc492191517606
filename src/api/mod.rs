pub mod attendance;
pub mod image;
pub mod records;
pub mod view;
