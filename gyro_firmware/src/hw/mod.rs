pub mod led;
pub mod pins;
pub mod spi;
pub mod usart;

pub use led::Led;
pub use pins::BoardPins;
pub use spi::ChipSelect;
pub use spi::SpiBus;
pub use usart::Usart;
