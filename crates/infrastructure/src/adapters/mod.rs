//! Adapters for the application ports.

mod code_editor;
mod manual_clock;
mod system_clock;
mod text_area;
mod tokio_timer;

pub use code_editor::CodeEditorBuffer;
pub use manual_clock::ManualClock;
pub use system_clock::SystemClock;
pub use text_area::TextAreaBuffer;
pub use tokio_timer::TokioTimer;
