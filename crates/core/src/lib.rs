pub mod audio;
pub mod pipeline;
pub mod shared;
pub mod upload;
pub mod video;
