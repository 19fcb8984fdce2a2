//! Ward Round Common Library
//!
//! CLIとWeb(WASM)で共有される描画・書き込み・要約プロトコルのロジック

pub mod annotation;
pub mod canvas;
pub mod error;
pub mod geometry;
pub mod prompts;
pub mod retry;
pub mod shape;
pub mod summary;
pub mod trigger;

pub use annotation::{AnnotationLayer, EventResponse, PenState, PointerEvent, PointerKind, PointerSource, Stroke};
pub use canvas::{render, Canvas, DrawCommand, RecordingCanvas, Rgba, StrokeStyle};
pub use error::{Error, Result, SummaryError};
pub use geometry::{Figure, Paint, PathOp, Point};
pub use retry::{with_retry, RetryPolicy};
pub use shape::Shape;
pub use summary::{
    build_request_body, interpret_reply, validate_notes, HttpReply, Protocol, SummarizerConfig,
    SummaryResult,
};
pub use trigger::{BusyGuard, NoTrigger, TriggerControl};
