//! ImageBytes buffer builder for simulators, fixtures and benchmarks.

use crate::image_pipeline::decode::header::HEADER_LEN;
use crate::image_pipeline::decode::types::ElementType;

/// A sample type that can be written into an ImageBytes payload.
pub trait WireSample: Copy {
    const ELEMENT_TYPE: ElementType;
    fn extend_le(self, out: &mut Vec<u8>);
}

macro_rules! wire_sample {
    ($($ty:ty => $element:ident),* $(,)?) => {
        $(
            impl WireSample for $ty {
                const ELEMENT_TYPE: ElementType = ElementType::$element;
                fn extend_le(self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_le_bytes());
                }
            }
        )*
    };
}

wire_sample! {
    u8 => Byte,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    f32 => Single,
    f64 => Double,
    u64 => UInt64,
    i64 => Int64,
}

/// Assembles a version 1 ImageBytes buffer.
///
/// Samples must already be in the device's column-major order.
#[derive(Debug, Clone)]
pub struct ImageBytesBuilder {
    width: i32,
    height: i32,
    planes: i32,
    image_element_type: Option<i32>,
    transmission_element_type: i32,
    client_transaction_id: u32,
    server_transaction_id: u32,
    error: Option<(i32, String)>,
    payload: Vec<u8>,
}

impl ImageBytesBuilder {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            planes: 1,
            image_element_type: None,
            transmission_element_type: ElementType::Byte.code(),
            client_transaction_id: 0,
            server_transaction_id: 0,
            error: None,
            payload: Vec::new(),
        }
    }

    /// Marks the frame as three-plane colour (rank 3).
    pub fn color(mut self) -> Self {
        self.planes = 3;
        self
    }

    /// Overrides the image element type; by default it matches the transmitted samples.
    pub fn image_element_type(mut self, code: i32) -> Self {
        self.image_element_type = Some(code);
        self
    }

    /// Overrides the transmission element type without touching the payload.
    pub fn transmission_element_type(mut self, code: i32) -> Self {
        self.transmission_element_type = code;
        self
    }

    pub fn transaction_ids(mut self, client: u32, server: u32) -> Self {
        self.client_transaction_id = client;
        self.server_transaction_id = server;
        self
    }

    pub fn samples<T: WireSample>(mut self, values: &[T]) -> Self {
        self.transmission_element_type = T::ELEMENT_TYPE.code();
        self.payload = Vec::with_capacity(values.len() * T::ELEMENT_TYPE.wire_size());
        for &value in values {
            value.extend_le(&mut self.payload);
        }
        self
    }

    /// Turns the buffer into a device error response carrying `message`.
    pub fn error(mut self, number: i32, message: impl Into<String>) -> Self {
        self.error = Some((number, message.into()));
        self
    }

    pub fn build(self) -> Vec<u8> {
        let (error_number, body) = match &self.error {
            Some((number, message)) => (*number, message.as_bytes()),
            None => (0, self.payload.as_slice()),
        };
        let (rank, dim3) = if self.planes == 3 { (3, 3) } else { (2, 0) };

        let header = [
            1,
            error_number,
            self.client_transaction_id as i32,
            self.server_transaction_id as i32,
            HEADER_LEN as i32,
            self.image_element_type
                .unwrap_or(self.transmission_element_type),
            self.transmission_element_type,
            rank,
            self.width,
            self.height,
            dim3,
        ];

        let mut out = Vec::with_capacity(HEADER_LEN + body.len());
        for field in header {
            out.extend_from_slice(&field.to_le_bytes());
        }
        out.extend_from_slice(body);
        out
    }
}
