/// Type alias for Result with anyhow::Error as the error type.
/// Infrastructure errors are typed `SoftkeeperError` values wrapped in anyhow.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
