mod checkmark;
mod spinner;

pub use self::checkmark::Checkmark;
pub use self::spinner::Spinner;
