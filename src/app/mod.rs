pub mod handler;
pub mod presenter;

pub use handler::handle_form;
pub use presenter::{advice, render_text, Advice, JsonEnvelope, StatusBadge};
