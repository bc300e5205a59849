pub mod wheel;

pub use wheel::{FortuneWheel, ResultDisplay, SpinButton, WHEEL_RESULT_EVENT};
