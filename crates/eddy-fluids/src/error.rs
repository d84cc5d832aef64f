use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FluidError {
    #[error("invalid grid dimensions {width}x{height}: both must be positive")]
    InvalidDimensions {
        width: usize,
        height: usize,
    },
    #[error("grid of {width}x{height} cells is too large to address or record")]
    TooLarge {
        width: usize,
        height: usize,
    },
    #[error("a fluid needs at least one density channel")]
    NoChannels,
}
