//! In-memory rasters that keep the sample type they were decoded with.

use std::fmt;

use ndarray::Array3;

/// Element type of a decoded raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleType {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SampleType::U8 => "u8",
            SampleType::U16 => "u16",
            SampleType::U32 => "u32",
            SampleType::U64 => "u64",
            SampleType::I8 => "i8",
            SampleType::I16 => "i16",
            SampleType::I32 => "i32",
            SampleType::I64 => "i64",
            SampleType::F32 => "f32",
            SampleType::F64 => "f64",
        };
        f.write_str(name)
    }
}

/// A (height, width, channels) array tagged with its sample type.
#[derive(Debug, Clone, PartialEq)]
pub enum Raster {
    U8(Array3<u8>),
    U16(Array3<u16>),
    U32(Array3<u32>),
    U64(Array3<u64>),
    I8(Array3<i8>),
    I16(Array3<i16>),
    I32(Array3<i32>),
    I64(Array3<i64>),
    F32(Array3<f32>),
    F64(Array3<f64>),
}

macro_rules! each_variant {
    ($raster:expr, $data:ident => $body:expr) => {
        match $raster {
            Raster::U8($data) => $body,
            Raster::U16($data) => $body,
            Raster::U32($data) => $body,
            Raster::U64($data) => $body,
            Raster::I8($data) => $body,
            Raster::I16($data) => $body,
            Raster::I32($data) => $body,
            Raster::I64($data) => $body,
            Raster::F32($data) => $body,
            Raster::F64($data) => $body,
        }
    };
}

impl Raster {
    pub fn sample_type(&self) -> SampleType {
        match self {
            Raster::U8(_) => SampleType::U8,
            Raster::U16(_) => SampleType::U16,
            Raster::U32(_) => SampleType::U32,
            Raster::U64(_) => SampleType::U64,
            Raster::I8(_) => SampleType::I8,
            Raster::I16(_) => SampleType::I16,
            Raster::I32(_) => SampleType::I32,
            Raster::I64(_) => SampleType::I64,
            Raster::F32(_) => SampleType::F32,
            Raster::F64(_) => SampleType::F64,
        }
    }

    /// (height, width, channels)
    pub fn dim(&self) -> (usize, usize, usize) {
        each_variant!(self, data => data.dim())
    }

    /// Cast every sample to f32. Wide integers and f64 lose precision the
    /// same way a plain `as` cast does.
    pub fn into_f32(self) -> Raster {
        match self {
            Raster::F32(data) => Raster::F32(data),
            other => Raster::F32(each_variant!(other, data => data.mapv(|v| v as f32))),
        }
    }
}
