mod amount;
mod audio_clip;
pub mod catalog;
mod filter_record;

pub use amount::{AmountFilter, ComparisonOperator, parse_amount};
pub use audio_clip::{AudioClip, AudioFormat};
pub use filter_record::{FilterParseError, FilterRecord, MathOperation};
