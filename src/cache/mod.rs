//! 对象缓存
//!
//! 缓存后端以插件形式注册，启动时按 `cache.type` 选择实现。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明并在进程启动时注册一个缓存插件
///
/// 插件类型需要提供 `fn new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ty) => {
        #[::ctor::ctor]
        unsafe fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                ::std::sync::Arc::new(|| -> $crate::cache::register::BoxedObjectCacheFuture {
                    Box::pin(async {
                        let cache = <$ty>::new()
                            .map_err($crate::errors::CampusError::cache_connection)?;
                        Ok::<Box<dyn $crate::cache::ObjectCache>, $crate::errors::CampusError>(
                            Box::new(cache),
                        )
                    })
                }),
            );
        }
    };
}
