pub mod layout;
mod add_card;
mod login;
mod quiz;

pub use add_card::draw_add_card;
pub use login::draw_login;
pub use quiz::draw_quiz;
