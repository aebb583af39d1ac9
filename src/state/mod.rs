//! Chat widget core (pure).
//!
//! Everything in here is synchronous, allocation-light and free of I/O. The
//! only thing borrowed from the host is a [`TextMeasurer`]; the composed
//! [`ChatWidget`] additionally asks for redraws through [`ChatHost`].

pub mod chat_widget;
pub mod history;
pub mod input_line;
pub mod line_wrap;
pub mod measure;
pub mod region;
pub mod scroll;
pub mod slide;

// Re-export for convenience
pub use chat_widget::{ChatHost, ChatWidget};
pub use history::{CommandHistory, HistoryStore};
pub use input_line::InputLineView;
pub use line_wrap::{reflow, LineWrapBuffer};
pub use measure::{MonospaceMeasurer, TextMeasurer};
pub use region::{Region, RegionDispatcher, WidgetAction, WidgetLayout};
pub use scroll::{DragAccumulator, ScrollModel};
pub use slide::{SlideAnimator, SlidePhase};
