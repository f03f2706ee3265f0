//! 原始帧数据源
//!
//! 传输层（串口等）只需提供字节流；每次读取一个固定长度的硬件帧。

use crate::error::DriverError;
use resense_protocol::{RAW_FRAME_LEN, RawFrame};
use std::io::{ErrorKind, Read};

/// 原始帧数据源
pub trait SampleSource {
    /// 阻塞读取下一帧
    fn read_frame(&mut self) -> Result<RawFrame, DriverError>;
}

/// 把任意 `Read` 字节流适配为数据源（串口、文件、管道……）
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    buffer: [u8; RAW_FRAME_LEN],
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: [0u8; RAW_FRAME_LEN],
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> SampleSource for ReaderSource<R> {
    fn read_frame(&mut self) -> Result<RawFrame, DriverError> {
        match self.reader.read_exact(&mut self.buffer) {
            Ok(()) => Ok(RawFrame::from_bytes(&self.buffer)?),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(DriverError::EndOfStream),
            Err(e) => Err(e.into()),
        }
    }
}

impl<S: SampleSource + ?Sized> SampleSource for Box<S> {
    fn read_frame(&mut self) -> Result<RawFrame, DriverError> {
        (**self).read_frame()
    }
}

/// 模拟数据源：按顺序返回预设帧，耗尽后返回 `EndOfStream`
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Default)]
pub struct MockSource {
    frames: std::collections::VecDeque<RawFrame>,
}

#[cfg(any(test, feature = "mock"))]
impl MockSource {
    pub fn new(frames: impl IntoIterator<Item = RawFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// 追加一帧
    pub fn push(&mut self, frame: RawFrame) {
        self.frames.push_back(frame);
    }

    /// 剩余帧数
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(any(test, feature = "mock"))]
impl SampleSource for MockSource {
    fn read_frame(&mut self) -> Result<RawFrame, DriverError> {
        self.frames.pop_front().ok_or(DriverError::EndOfStream)
    }
}
