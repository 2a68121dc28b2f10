mod halt;

pub use halt::*;
