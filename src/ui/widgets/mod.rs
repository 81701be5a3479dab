pub mod button;
pub mod slider;

pub use button::Button;
pub use slider::Slider;
