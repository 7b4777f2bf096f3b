//! TIFF decoding into two-dimensional intensity grids
//!
//! Every sample type the decoder produces is widened to `f64`. Sub-byte
//! grayscale is unpacked row by row. Anything that is not a single plane of
//! single-sample pixels is rejected with a shape error before pixel data is
//! handed to region analysis.

use crate::io::error::{AnalysisError, Result, WithPath, file_system_error, shape_error};
use ndarray::Array2;
use num_traits::AsPrimitive;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;

/// Intensity grid indexed by `[row, col]`
pub type Grid = Array2<f64>;

/// Load a TIFF file into an intensity grid
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file is not a decodable TIFF
/// - The image has more than one page or more than one sample per pixel
pub fn load_grid<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| file_system_error(path, "open", e))?;
    decode_grid(BufReader::new(file)).with_path(path)
}

/// Decode a TIFF stream into an intensity grid
///
/// # Errors
///
/// Returns an error if the stream is not a decodable single-plane TIFF
pub fn decode_grid<R: Read + Seek>(reader: R) -> Result<Grid> {
    let mut decoder = Decoder::new(reader)?;

    let (width, height) = decoder.dimensions()?;
    let (rows, cols) = (height as usize, width as usize);
    let color_type = decoder.colortype()?;
    let samples = decoder
        .get_tag_u32(Tag::SamplesPerPixel)
        .map_or(1, |spp| spp as usize);

    if decoder.more_images() {
        let pages = count_pages(&mut decoder)?;
        let mut shape = vec![pages, rows, cols];
        if samples > 1 {
            shape.push(samples);
        }
        return Err(shape_error(shape));
    }

    if samples > 1 {
        return Err(shape_error(vec![rows, cols, samples]));
    }

    let values = match (color_type, decoder.read_image()?) {
        (ColorType::Gray(bits @ (1 | 2 | 4)), DecodingResult::U8(data)) => {
            unpack_gray(&data, rows, cols, bits)
        }
        (_, decoded) => widen(decoded),
    };

    Array2::from_shape_vec((rows, cols), values).map_err(|e| AnalysisError::InvalidSourceData {
        reason: format!("decoded samples do not fill a {rows}x{cols} grid: {e}"),
    })
}

// Counts every page including the current one; leaves the decoder on the last page
fn count_pages<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<usize> {
    let mut pages = 1;
    while decoder.more_images() {
        decoder.next_image()?;
        pages += 1;
    }
    Ok(pages)
}

fn widen(decoded: DecodingResult) -> Vec<f64> {
    match decoded {
        DecodingResult::U8(data) => to_f64(&data),
        DecodingResult::U16(data) => to_f64(&data),
        DecodingResult::U32(data) => to_f64(&data),
        DecodingResult::U64(data) => to_f64(&data),
        DecodingResult::I8(data) => to_f64(&data),
        DecodingResult::I16(data) => to_f64(&data),
        DecodingResult::I32(data) => to_f64(&data),
        DecodingResult::I64(data) => to_f64(&data),
        DecodingResult::F16(data) => data.into_iter().map(f64::from).collect(),
        DecodingResult::F32(data) => to_f64(&data),
        DecodingResult::F64(data) => data,
    }
}

// 64-bit integers above 2^53 lose precision here
fn to_f64<T: AsPrimitive<f64>>(data: &[T]) -> Vec<f64> {
    data.iter().map(|value| value.as_()).collect()
}

/// Unpack 1, 2 or 4 bit grayscale rows, each padded to a whole byte
pub fn unpack_gray(data: &[u8], rows: usize, cols: usize, bits: u8) -> Vec<f64> {
    let per_byte = 8 / usize::from(bits);
    let bytes_per_row = cols.div_ceil(per_byte);
    let mask = (1u16 << bits) - 1;

    let mut values = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let byte = data
                .get(row * bytes_per_row + col / per_byte)
                .copied()
                .unwrap_or(0);
            let shift = 8 - usize::from(bits) * (col % per_byte + 1);
            let value = (u16::from(byte) >> shift) & mask;
            values.push(f64::from(value));
        }
    }
    values
}
