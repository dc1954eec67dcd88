//! # Viewzenix Alert
//!
//! webhook 设置页的告警消息构建器。
//!
//! - [`numeric`]: 校验与生成共用的数值解析原语
//! - [`validate`]: 表单校验
//! - [`builder`]: 有状态的构建器，负责生成与序列化
//! - [`notice`]: 自动过期的通知
//! - [`session`]: 一个打开中的设置页，组合以上组件与剪贴板

pub mod builder;
pub mod notice;
pub mod numeric;
pub mod session;
pub mod validate;
