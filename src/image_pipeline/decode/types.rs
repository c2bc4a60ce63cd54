//! Decoded frame types

use crate::image_pipeline::decode::header::ImageBytesHeader;

/// Alpaca `ImageArrayElementTypes` codes used in both element type header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    Unknown = 0,
    Int16 = 1,
    Int32 = 2,
    Double = 3,
    Single = 4,
    UInt64 = 5,
    Byte = 6,
    Int64 = 7,
    UInt16 = 8,
    UInt32 = 9,
}

impl ElementType {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Unknown),
            1 => Some(Self::Int16),
            2 => Some(Self::Int32),
            3 => Some(Self::Double),
            4 => Some(Self::Single),
            5 => Some(Self::UInt64),
            6 => Some(Self::Byte),
            7 => Some(Self::Int64),
            8 => Some(Self::UInt16),
            9 => Some(Self::UInt32),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }

    /// Bit depth of the sensor data described by this type. `Unknown` has none.
    pub fn bit_depth(self) -> Option<u32> {
        match self {
            Self::Unknown => None,
            Self::Byte => Some(8),
            Self::Int16 | Self::UInt16 => Some(16),
            Self::Int32 | Self::UInt32 | Self::Single => Some(32),
            Self::Double | Self::Int64 | Self::UInt64 => Some(64),
        }
    }

    /// Size of one sample on the wire.
    pub fn wire_size(self) -> usize {
        match self {
            Self::Unknown | Self::Byte => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Single => 4,
            Self::Double | Self::Int64 | Self::UInt64 => 8,
        }
    }
}

/// Typed view over the payload. 64-bit integer transmissions are stored as their
/// lower 32 bits (`U32` for UInt64, `I32` for Int64).
#[derive(Debug, Clone, PartialEq)]
pub enum PixelBuffer {
    U8(Vec<u8>),
    I16(Vec<i16>),
    U16(Vec<u16>),
    I32(Vec<i32>),
    U32(Vec<u32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl PixelBuffer {
    pub fn len(&self) -> usize {
        match self {
            Self::U8(v) => v.len(),
            Self::I16(v) => v.len(),
            Self::U16(v) => v.len(),
            Self::I32(v) => v.len(),
            Self::U32(v) => v.len(),
            Self::F32(v) => v.len(),
            Self::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Single sample widened to `f64`; `None` past the end.
    pub fn get(&self, index: usize) -> Option<f64> {
        match self {
            Self::U8(v) => v.get(index).map(|&s| s as f64),
            Self::I16(v) => v.get(index).map(|&s| s as f64),
            Self::U16(v) => v.get(index).map(|&s| s as f64),
            Self::I32(v) => v.get(index).map(|&s| s as f64),
            Self::U32(v) => v.get(index).map(|&s| s as f64),
            Self::F32(v) => v.get(index).map(|&s| s as f64),
            Self::F64(v) => v.get(index).copied(),
        }
    }
}

/// One decoded ImageBytes response.
///
/// A frame with zero width or height means "no image": either the device reported an
/// error (`error_code != 0`) or the buffer could not be decoded. `error_message` says why.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub metadata_version: i32,
    pub error_code: i32,
    pub error_message: Option<String>,
    pub client_transaction_id: u32,
    pub server_transaction_id: u32,
    pub data_start: usize,
    pub image_element_type: i32,
    pub transmission_element_type: i32,
    pub rank: u32,
    pub width: usize,
    pub height: usize,
    /// 3 for colour frames, 1 otherwise.
    pub planes: usize,
    pub pixels: PixelBuffer,
}

impl Frame {
    /// Zero-dimension frame for a buffer whose header could not be read at all.
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            metadata_version: 0,
            error_code: 0,
            error_message: Some(message.into()),
            client_transaction_id: 0,
            server_transaction_id: 0,
            data_start: 0,
            image_element_type: 0,
            transmission_element_type: 0,
            rank: 0,
            width: 0,
            height: 0,
            planes: 1,
            pixels: PixelBuffer::U8(Vec::new()),
        }
    }

    /// Zero-dimension frame that keeps the header's bookkeeping fields.
    pub fn rejected(header: &ImageBytesHeader, message: impl Into<String>) -> Self {
        Self {
            metadata_version: header.metadata_version,
            error_code: header.error_number,
            client_transaction_id: header.client_transaction_id,
            server_transaction_id: header.server_transaction_id,
            data_start: header.data_start,
            image_element_type: header.image_element_type,
            transmission_element_type: header.transmission_element_type,
            rank: header.rank.max(0) as u32,
            ..Self::empty(message)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn is_color(&self) -> bool {
        self.planes == 3
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Original sensor bit depth. An unknown image element type falls back to the
    /// width of the transmitted samples.
    pub fn bit_depth(&self) -> u32 {
        ElementType::from_code(self.image_element_type)
            .and_then(ElementType::bit_depth)
            .or_else(|| {
                ElementType::from_code(self.transmission_element_type)
                    .and_then(ElementType::bit_depth)
            })
            .unwrap_or(8)
    }

    /// Sample at column `x`, row `y`, colour plane `plane`, in the device's column-major order.
    pub fn sample(&self, x: usize, y: usize, plane: usize) -> Option<f64> {
        if x >= self.width || y >= self.height || plane >= self.planes {
            return None;
        }
        self.pixels.get((x * self.height + y) * self.planes + plane)
    }
}
