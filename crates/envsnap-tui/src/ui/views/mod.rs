pub mod detail_modal;
pub mod event_list;

pub use detail_modal::render_detail_modal;
pub use event_list::render_event_list;
