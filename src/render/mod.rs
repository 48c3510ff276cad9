//! Output projections of flow blocks: JSON, plain text, statistics and
//! block observers.

mod json;
pub mod observer;
mod result;
mod text;

pub use json::{from_json, to_json, JsonFormat};
pub use observer::{BlockObserver, CompositeObserver, KindRecorder, NoopObserver};
pub use result::{ConversionResult, ConversionStats};
pub use text::to_text;
