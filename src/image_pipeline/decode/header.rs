//! Fixed-offset ImageBytes metadata header

use crate::image_pipeline::common::error::{Result, ViewerError};

/// Size of the version 1 metadata block in bytes.
pub const HEADER_LEN: usize = 44;

/// Metadata block found at the start of every ImageBytes response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageBytesHeader {
    pub metadata_version: i32,
    pub error_number: i32,
    pub client_transaction_id: u32,
    pub server_transaction_id: u32,
    pub data_start: usize,
    pub image_element_type: i32,
    pub transmission_element_type: i32,
    pub rank: i32,
    pub dim1: i32,
    pub dim2: i32,
    pub dim3: i32,
}

fn read_i32(data: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

impl ImageBytesHeader {
    /// Parses the header, checking only that the block and the payload offset fit in `data`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_LEN {
            return Err(ViewerError::DecodeError(format!(
                "buffer is {} bytes, header needs {}",
                data.len(),
                HEADER_LEN
            )));
        }

        let data_start = read_i32(data, 16);
        if data_start < HEADER_LEN as i32 || data_start as usize > data.len() {
            return Err(ViewerError::DecodeError(format!(
                "data start offset {} outside buffer of {} bytes",
                data_start,
                data.len()
            )));
        }

        Ok(Self {
            metadata_version: read_i32(data, 0),
            error_number: read_i32(data, 4),
            client_transaction_id: read_i32(data, 8) as u32,
            server_transaction_id: read_i32(data, 12) as u32,
            data_start: data_start as usize,
            image_element_type: read_i32(data, 20),
            transmission_element_type: read_i32(data, 24),
            rank: read_i32(data, 28),
            dim1: read_i32(data, 32),
            dim2: read_i32(data, 36),
            dim3: read_i32(data, 40),
        })
    }

    /// Three-plane colour data is flagged by rank 3 with a third dimension of 3.
    pub fn is_color(&self) -> bool {
        self.rank == 3 && self.dim3 == 3
    }

    pub fn planes(&self) -> usize {
        if self.is_color() { 3 } else { 1 }
    }
}
