pub mod photo_handler;

pub use photo_handler::{__path_get_photo, get_photo};
