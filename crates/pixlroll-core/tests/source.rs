// File: crates/pixlroll-core/tests/source.rs
// Purpose: Byte decoding and bounded block reads from an in-memory stream.

use std::io::Cursor;

use pixlroll_core::{decode, BlockReader, SampleFormat};

#[test]
fn signed_and_unsigned_bytes() {
    let bytes = [0x00, 0x7f, 0x80, 0xff];
    assert_eq!(decode(SampleFormat::Int8, &bytes).samples, vec![0, 127, -128, -1]);
    assert_eq!(decode(SampleFormat::Uint8, &bytes).samples, vec![0, 127, 128, 255]);
    assert_eq!(decode(SampleFormat::Int8, &bytes).dropped, 0);
}

#[test]
fn byte_wide_formats_never_drop_bytes() {
    for format in [SampleFormat::Int8, SampleFormat::Uint8] {
        assert_eq!(format.width(), 1);
        for len in [0usize, 1, 7, 999, 1000] {
            let bytes = vec![0x42u8; len];
            let d = decode(format, &bytes);
            assert_eq!(d.samples.len(), len, "{format} {len}");
            assert_eq!(d.dropped, 0, "{format} {len}");
        }
    }
}

#[test]
fn odd_read_sizes_keep_every_sample() {
    // a block size that does not divide the stream still delivers all of it
    let data: Vec<u8> = (0..=255u8).collect();
    let mut reader = BlockReader::new(Cursor::new(data), SampleFormat::Int8, 7).unwrap();
    let mut all = Vec::new();
    while let Some(batch) = reader.read_batch().unwrap() {
        assert!(batch.len() <= 7);
        all.extend(batch);
    }
    assert_eq!(all.len(), 256);
    assert_eq!(all[128], -128);
    assert_eq!(all[255], -1);
}

#[test]
fn blocks_are_bounded_and_end_with_none() {
    let data: Vec<u8> = (0..2500u32).map(|i| (i % 256) as u8).collect();
    let mut reader = BlockReader::new(Cursor::new(data), SampleFormat::Uint8, 1000).unwrap();

    let mut sizes = Vec::new();
    let mut first = None;
    while let Some(batch) = reader.read_batch().unwrap() {
        first.get_or_insert_with(|| batch[..3].to_vec());
        sizes.push(batch.len());
    }
    assert_eq!(sizes, vec![1000, 1000, 500]);
    assert_eq!(first, Some(vec![0, 1, 2]));
    // still at EOF
    assert_eq!(reader.read_batch().unwrap(), None);
}

#[test]
fn empty_stream_is_immediately_done() {
    let mut reader = BlockReader::new(Cursor::new(Vec::<u8>::new()), SampleFormat::Int8, 16).unwrap();
    assert_eq!(reader.format(), SampleFormat::Int8);
    assert!(reader.read_batch().unwrap().is_none());
}
