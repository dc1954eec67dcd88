//! # Viewzenix Core
//!
//! 告警构建器的领域层：实体、端口 (trait) 与全局配置。
//! 具体实现（剪贴板适配器、构建器本身、控制台入口）都在其它 crate 中，
//! 只依赖这里定义的抽象。

pub mod common;
pub mod config;

pub mod alert {
    pub mod entity;
    pub mod error;
}

pub mod clipboard {
    pub mod error;
    pub mod port;
}

pub mod notify {
    pub mod entity;
}
