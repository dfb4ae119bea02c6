mod health;
mod index;
mod process_audio;
mod process_text;
pub mod responses;
mod upload_audio;

pub use health::health_handler;
pub use index::index_handler;
pub use process_audio::process_audio_handler;
pub use process_text::{ProcessTextForm, process_text_handler};
pub use upload_audio::upload_audio_handler;
