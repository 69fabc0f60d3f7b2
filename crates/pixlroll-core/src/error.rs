// File: crates/pixlroll-core/src/error.rs
// Summary: Library error type and result alias.

pub type Result<T> = std::result::Result<T, PixlError>;

#[derive(thiserror::Error, Debug)]
pub enum PixlError {
    /// A colormap lookup outside the declared range. Callers clamp first, so
    /// seeing this means the clamp step is broken.
    #[error("value {value} outside range [{lo}, {hi}]")]
    OutOfRange { value: i32, lo: i32, hi: i32 },

    #[error("invalid range: lo {lo} is greater than hi {hi}")]
    InvalidRange { lo: i32, hi: i32 },

    #[error("unknown palette '{0}' (expected rainbow or rssi)")]
    UnknownPalette(String),

    #[error("unknown sample format '{0}' (expected int8 or uint8)")]
    UnknownFormat(String),

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("surface error: {0}")]
    Surface(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PixlError {
    pub fn options(msg: impl Into<String>) -> Self {
        Self::InvalidOptions(msg.into())
    }

    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_the_offending_value() {
        let err = PixlError::OutOfRange { value: 300, lo: 0, hi: 255 };
        assert_eq!(err.to_string(), "value 300 outside range [0, 255]");
        assert!(PixlError::options("x").to_string().starts_with("invalid options:"));
        assert!(PixlError::surface("x").to_string().starts_with("surface error:"));
    }

    #[test]
    fn io_errors_convert() {
        let err: PixlError = std::io::Error::other("pipe closed").into();
        assert!(err.to_string().contains("pipe closed"));
    }
}
