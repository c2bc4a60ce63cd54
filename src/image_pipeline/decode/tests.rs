use crate::image_pipeline::decode::{
    ElementType, FrameDecoder, HEADER_LEN, ImageBytesBuilder, ImageBytesDecoder, ImageBytesHeader,
    PixelBuffer,
};

fn column_major(width: usize, height: usize, row_major: &[u16]) -> Vec<u16> {
    let mut out = vec![0u16; width * height];
    for y in 0..height {
        for x in 0..width {
            out[x * height + y] = row_major[y * width + x];
        }
    }
    out
}

#[test]
fn test_header_fields() {
    let bytes = ImageBytesBuilder::new(3, 2)
        .transaction_ids(7, 42)
        .samples(&[0u16; 6])
        .build();

    let header = ImageBytesHeader::parse(&bytes).unwrap();
    assert_eq!(header.metadata_version, 1);
    assert_eq!(header.error_number, 0);
    assert_eq!(header.client_transaction_id, 7);
    assert_eq!(header.server_transaction_id, 42);
    assert_eq!(header.data_start, HEADER_LEN);
    assert_eq!(header.image_element_type, ElementType::UInt16.code());
    assert_eq!(header.transmission_element_type, ElementType::UInt16.code());
    assert_eq!(header.rank, 2);
    assert_eq!((header.dim1, header.dim2), (3, 2));
    assert!(!header.is_color());
}

#[test]
fn test_u16_round_trip() {
    let samples: Vec<u16> = (0..12).map(|v| v * 5000).collect();
    let bytes = ImageBytesBuilder::new(4, 3).samples(&samples).build();

    let frame = ImageBytesDecoder.decode(&bytes);
    assert_eq!((frame.width, frame.height), (4, 3));
    assert_eq!(frame.bit_depth(), 16);
    assert_eq!(frame.pixels, PixelBuffer::U16(samples));
}

#[test]
fn test_integer_round_trips() {
    let bytes = ImageBytesBuilder::new(2, 2).samples(&[0u8, 17, 200, 255]).build();
    assert_eq!(ImageBytesDecoder.decode(&bytes).pixels, PixelBuffer::U8(vec![0, 17, 200, 255]));

    let bytes = ImageBytesBuilder::new(2, 2).samples(&[-3i16, 0, 1000, i16::MAX]).build();
    assert_eq!(
        ImageBytesDecoder.decode(&bytes).pixels,
        PixelBuffer::I16(vec![-3, 0, 1000, i16::MAX])
    );

    let bytes = ImageBytesBuilder::new(2, 2).samples(&[-70000i32, 0, 1, i32::MAX]).build();
    assert_eq!(
        ImageBytesDecoder.decode(&bytes).pixels,
        PixelBuffer::I32(vec![-70000, 0, 1, i32::MAX])
    );

    let bytes = ImageBytesBuilder::new(2, 2).samples(&[0u32, 65536, 1 << 20, u32::MAX]).build();
    assert_eq!(
        ImageBytesDecoder.decode(&bytes).pixels,
        PixelBuffer::U32(vec![0, 65536, 1 << 20, u32::MAX])
    );
}

#[test]
fn test_float_round_trips() {
    let singles = [0.0f32, 0.25, 1234.5, 65535.0];
    let frame = ImageBytesDecoder.decode(&ImageBytesBuilder::new(2, 2).samples(&singles).build());
    for (i, expected) in singles.iter().enumerate() {
        assert!((frame.pixels.get(i).unwrap() - *expected as f64).abs() < 1e-6);
    }

    let doubles = [-1.5f64, 0.0, 1e-3, 4e9];
    let frame = ImageBytesDecoder.decode(&ImageBytesBuilder::new(2, 2).samples(&doubles).build());
    assert_eq!(frame.bit_depth(), 64);
    for (i, expected) in doubles.iter().enumerate() {
        assert!((frame.pixels.get(i).unwrap() - expected).abs() < 1e-9);
    }
}

#[test]
fn test_64_bit_integers_keep_low_word() {
    let wide = [5u64, (1u64 << 32) + 9, u64::MAX, 70000];
    let frame = ImageBytesDecoder.decode(&ImageBytesBuilder::new(2, 2).samples(&wide).build());
    assert_eq!(frame.pixels, PixelBuffer::U32(vec![5, 9, u32::MAX, 70000]));
    assert_eq!(frame.bit_depth(), 64);

    let signed = [-2i64, 3, (7i64 << 32) + 1, 0];
    let frame = ImageBytesDecoder.decode(&ImageBytesBuilder::new(2, 2).samples(&signed).build());
    assert_eq!(frame.pixels, PixelBuffer::I32(vec![-2, 3, 1, 0]));
}

#[test]
fn test_column_major_sample_access() {
    let row_major: Vec<u16> = (0..16).collect();
    let samples = column_major(4, 4, &row_major);
    assert_eq!(samples, vec![0, 4, 8, 12, 1, 5, 9, 13, 2, 6, 10, 14, 3, 7, 11, 15]);

    let frame = ImageBytesDecoder.decode(&ImageBytesBuilder::new(4, 4).samples(&samples).build());
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(frame.sample(x, y, 0), Some((y * 4 + x) as f64));
        }
    }
    assert_eq!(frame.sample(4, 0, 0), None);
}

#[test]
fn test_color_frame() {
    let samples: Vec<u16> = (0..2 * 2 * 3).collect();
    let bytes = ImageBytesBuilder::new(2, 2).color().samples(&samples).build();

    let frame = ImageBytesDecoder.decode(&bytes);
    assert!(frame.is_color());
    assert_eq!(frame.rank, 3);
    assert_eq!(frame.pixels.len(), 12);
    // x=1, y=0 is the third pixel in column-major order.
    assert_eq!(frame.sample(1, 0, 2), Some(8.0));
}

#[test]
fn test_device_error_text() {
    let bytes = ImageBytesBuilder::new(4, 4).error(1, "Camera busy").build();

    let frame = ImageBytesDecoder.decode(&bytes);
    assert!(frame.is_empty());
    assert_eq!((frame.width, frame.height), (0, 0));
    assert_eq!(frame.error_code, 1);
    assert_eq!(frame.error_message.as_deref(), Some("Camera busy"));
}

#[test]
fn test_unsupported_transmission_type() {
    let bytes = ImageBytesBuilder::new(2, 2)
        .samples(&[1u8, 2, 3, 4])
        .transmission_element_type(42)
        .build();

    let frame = ImageBytesDecoder.decode(&bytes);
    assert!(frame.is_empty());
    assert_eq!(frame.error_code, 0);
    assert!(frame.error_message.unwrap().contains("42"));
}

#[test]
fn test_unknown_transmission_type_reads_bytes() {
    let bytes = ImageBytesBuilder::new(2, 1)
        .samples(&[9u8, 10])
        .transmission_element_type(0)
        .build();

    let frame = ImageBytesDecoder.decode(&bytes);
    assert_eq!(frame.pixels, PixelBuffer::U8(vec![9, 10]));
    assert_eq!(frame.bit_depth(), 8);
}

#[test]
fn test_unknown_image_type_uses_transmission_depth() {
    let bytes = ImageBytesBuilder::new(1, 1)
        .samples(&[4000u16])
        .image_element_type(0)
        .build();
    assert_eq!(ImageBytesDecoder.decode(&bytes).bit_depth(), 16);
}

#[test]
fn test_malformed_buffers_resolve_to_empty_frames() {
    let frame = ImageBytesDecoder.decode(&[0u8; 10]);
    assert!(frame.is_empty());
    assert!(frame.error_message.is_some());

    let short = ImageBytesBuilder::new(4, 4).samples(&[0u16; 5]).build();
    let frame = ImageBytesDecoder.decode(&short);
    assert!(frame.is_empty());
    assert!(frame.error_message.unwrap().contains("payload"));

    let no_pixels = ImageBytesBuilder::new(0, 4).samples(&[0u16; 4]).build();
    assert!(ImageBytesDecoder.decode(&no_pixels).is_empty());

    let mut bad_offset = ImageBytesBuilder::new(1, 1).samples(&[1u8]).build();
    bad_offset[16..20].copy_from_slice(&1000i32.to_le_bytes());
    assert!(ImageBytesDecoder.decode(&bad_offset).is_empty());
}
