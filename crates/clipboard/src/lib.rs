//! # Viewzenix Clipboard
//!
//! [`ClipboardSink`](viewzenix_core::clipboard::port::ClipboardSink) 的具体实现。

pub mod file;
pub mod memory;
pub mod stdout;
pub mod telegram;
