//! Frame decoder for the ASCOM Alpaca ImageBytes wire format.
//!
//! The payload that follows the header is a little-endian array laid out the way
//! Alpaca devices emit it: column-major, with the colour plane index changing fastest.
//! This reader only builds the typed view; reordering for display happens during
//! normalization.

use tracing::{debug, warn};

use crate::image_pipeline::common::error::{Result, ViewerError};
use crate::image_pipeline::decode::header::ImageBytesHeader;
use crate::image_pipeline::decode::reader::FrameDecoder;
use crate::image_pipeline::decode::types::{ElementType, Frame, PixelBuffer};

/// Decoder for `application/imagebytes` responses.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageBytesDecoder;

fn read_le<T, const N: usize>(payload: &[u8], count: usize, convert: fn([u8; N]) -> T) -> Vec<T> {
    payload
        .chunks_exact(N)
        .take(count)
        .map(|chunk| {
            let mut bytes = [0u8; N];
            bytes.copy_from_slice(chunk);
            convert(bytes)
        })
        .collect()
}

impl ImageBytesDecoder {
    fn dimensions(header: &ImageBytesHeader) -> Result<(usize, usize)> {
        if header.dim1 <= 0 || header.dim2 <= 0 {
            return Err(ViewerError::InvalidDimensions(
                header.dim1.max(0) as usize,
                header.dim2.max(0) as usize,
            ));
        }
        Ok((header.dim1 as usize, header.dim2 as usize))
    }

    fn read_pixels(header: &ImageBytesHeader, data: &[u8]) -> Result<Frame> {
        let transmission = ElementType::from_code(header.transmission_element_type)
            .ok_or(ViewerError::UnsupportedElementType(header.transmission_element_type))?;
        let (width, height) = Self::dimensions(header)?;
        let planes = header.planes();

        let count = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(planes))
            .ok_or(ViewerError::InvalidDimensions(width, height))?;
        let payload = &data[header.data_start..];
        let available = payload.len() / transmission.wire_size();
        if available < count {
            return Err(ViewerError::DecodeError(format!(
                "payload holds {} samples, {}x{}x{} needs {}",
                available, width, height, planes, count
            )));
        }

        // 64-bit integers arrive as pairs of 32-bit words; only the low word survives.
        let pixels = match transmission {
            ElementType::Unknown | ElementType::Byte => PixelBuffer::U8(payload[..count].to_vec()),
            ElementType::Int16 => PixelBuffer::I16(read_le(payload, count, i16::from_le_bytes)),
            ElementType::UInt16 => PixelBuffer::U16(read_le(payload, count, u16::from_le_bytes)),
            ElementType::Int32 => PixelBuffer::I32(read_le(payload, count, i32::from_le_bytes)),
            ElementType::UInt32 => PixelBuffer::U32(read_le(payload, count, u32::from_le_bytes)),
            ElementType::Single => PixelBuffer::F32(read_le(payload, count, f32::from_le_bytes)),
            ElementType::Double => PixelBuffer::F64(read_le(payload, count, f64::from_le_bytes)),
            ElementType::UInt64 => PixelBuffer::U32(read_le(payload, count, |b: [u8; 8]| {
                u32::from_le_bytes([b[0], b[1], b[2], b[3]])
            })),
            ElementType::Int64 => PixelBuffer::I32(read_le(payload, count, |b: [u8; 8]| {
                i32::from_le_bytes([b[0], b[1], b[2], b[3]])
            })),
        };

        Ok(Frame {
            metadata_version: header.metadata_version,
            error_code: 0,
            error_message: None,
            client_transaction_id: header.client_transaction_id,
            server_transaction_id: header.server_transaction_id,
            data_start: header.data_start,
            image_element_type: header.image_element_type,
            transmission_element_type: header.transmission_element_type,
            rank: header.rank.max(0) as u32,
            width,
            height,
            planes,
            pixels,
        })
    }
}

impl FrameDecoder for ImageBytesDecoder {
    fn decode(&self, data: &[u8]) -> Frame {
        debug!("Decoding ImageBytes buffer, {} bytes", data.len());

        let header = match ImageBytesHeader::parse(data) {
            Ok(header) => header,
            Err(e) => {
                warn!("Rejecting ImageBytes buffer: {}", e);
                return Frame::empty(e.to_string());
            }
        };

        if header.error_number != 0 {
            let text = String::from_utf8_lossy(&data[header.data_start..])
                .trim_end_matches('\0')
                .to_string();
            warn!(
                error_number = header.error_number,
                "Device reported an error: {}", text
            );
            return Frame::rejected(&header, text);
        }

        match Self::read_pixels(&header, data) {
            Ok(frame) => {
                debug!(
                    "Decoded {}x{}x{} frame, transmission type {}, bit depth {}",
                    frame.width,
                    frame.height,
                    frame.planes,
                    frame.transmission_element_type,
                    frame.bit_depth()
                );
                frame
            }
            Err(e) => {
                warn!("Rejecting ImageBytes frame: {}", e);
                Frame::rejected(&header, e.to_string())
            }
        }
    }
}
