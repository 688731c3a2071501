pub mod app;
pub mod components;
pub mod format;
pub mod layout;
pub mod notifications;
pub mod terminal;
pub mod theme;
pub mod views;

pub use app::{App, ListOrder};
pub use terminal::{init_terminal, restore_terminal, Tui};
pub use theme::ThemeMode;
