pub mod attendance;
pub mod department;
pub mod image;
pub mod view;
