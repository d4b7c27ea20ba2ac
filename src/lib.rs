//! Campus Connect - 校园学术门户后端服务
//!
//! 基于 Actix Web 构建，学生与教师共用同一套接口，按角色返回不同视图。
//!
//! # 架构
//! - `cache`: 缓存层（Moka）
//! - `config`: 配置管理
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证、授权与限流中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层与实时聊天
//! - `storage`: 数据存储层（启动时从 JSON 数据集加载的内存存储）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
