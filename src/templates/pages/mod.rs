pub mod detail;
pub mod home;

pub use detail::detail_page;
pub use home::home_page;
