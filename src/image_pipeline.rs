//! Image viewing pipeline module
//!
//! Turns ASCOM Alpaca ImageBytes responses into display-ready renderings: decoding,
//! normalization to 8 bits, display adjustments, histograms, JPEG encoding and a short
//! render history, orchestrated per camera view by [`FrameViewPipeline`].

pub mod adjust;
pub mod common;
pub mod conversions;
pub mod decode;
pub mod encode;
pub mod histogram;
pub mod history;
pub mod normalize;

pub use common::{
    Result,
    ViewerError,
};

pub use decode::{
    Frame,
    FrameDecoder,
    ImageBytesBuilder,
    ImageBytesDecoder,
};

pub use normalize::{
    NormalizeOptions,
    NormalizedCache,
    Normalizer,
};

pub use adjust::{
    AdjustmentParams,
    ColorMap,
    RgbaRaster,
};

pub use histogram::{
    HistogramEngine,
    HistogramResult,
};

pub use encode::{
    EncodeConfig,
    EncodedImage,
    JpegRasterWriter,
    RasterWriter,
};

pub use history::{
    CaptureInfo,
    FrameHistory,
    HistoryEntry,
};

pub use conversions::{
    FrameViewPipeline,
    RenderKind,
    RenderOutput,
    ViewerConfig,
    ViewerConfigBuilder,
};
