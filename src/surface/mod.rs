pub mod headless;
pub mod label;

pub use headless::HeadlessSurface;
pub use label::TextLabel;
