pub mod date_window;
pub mod percentage;
pub mod price;

pub use date_window::DateWindow;
pub use percentage::Percentage;
pub use price::Price;
