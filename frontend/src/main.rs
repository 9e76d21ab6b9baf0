use expense_manager_frontend::App;
use expense_manager_frontend::config::AppConfig;
use leptos::prelude::*;

// Use lol_alloc as the global allocator for smaller WASM size
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    console_error_panic_hook::set_once();

    // 配置块无效时仍然挂载应用，使用默认配置
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    // 日志器不可用时只能直接写控制台
    if let Err(e) = config.init_logging() {
        web_sys::console::error_1(&format!("[Config] {}", e).into());
    }
    if let Some(e) = config_error {
        log::warn!("[Config] {}，使用默认配置", e);
    }

    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title(&config.app_name);
    }

    mount_to_body(move || view! { <App config=config /> });
}
