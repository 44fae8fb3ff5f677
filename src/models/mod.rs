pub mod event;

pub use event::{Event, EventDraft, EventForm, NewEvent};
