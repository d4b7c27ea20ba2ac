//! 前端单页应用
//!
//! 构建产物 `frontend/dist/` 在编译时嵌入二进制。未命中的非 API 路径
//! 回退到 `index.html`，由前端路由处理；`/api/` 下的未知路径返回 JSON 404。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use rust_embed::Embed;
use std::borrow::Cow;
use std::path::Path;

use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode};

#[derive(Embed)]
#[folder = "frontend/dist/"]
struct FrontendAssets;

const INDEX_HTML: &str = "index.html";

fn content_type(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    match ext {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" | "map" | "webmanifest" => "application/json; charset=utf-8",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

// 打包器输出到 assets/ 的文件名带 hash，可以长期缓存
fn is_immutable(path: &str) -> bool {
    path.starts_with("assets/")
}

fn render_index(content: &[u8]) -> Vec<u8> {
    String::from_utf8_lossy(content)
        .replace("%APP_NAME%", &AppConfig::get().app.system_name)
        .into_bytes()
}

/// 解析请求路径对应的资源，找不到时回退到首页
fn resolve(path: &str) -> Option<(Cow<'static, [u8]>, &str)> {
    if !path.is_empty()
        && let Some(file) = FrontendAssets::get(path)
    {
        return Some((file.data, path));
    }
    FrontendAssets::get(INDEX_HTML).map(|file| (file.data, INDEX_HTML))
}

pub async fn serve_frontend(req: HttpRequest) -> ActixResult<HttpResponse> {
    let path = req.match_info().query("tail").trim_start_matches('/');

    if path == "api" || path.starts_with("api/") {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            format!("No API route matches /{path}"),
        )));
    }

    let Some((data, file_path)) = resolve(path) else {
        return Ok(HttpResponse::NotFound()
            .content_type("text/plain; charset=utf-8")
            .body("Frontend assets are not embedded in this build"));
    };

    let mime = content_type(file_path);
    let body = if file_path == INDEX_HTML {
        render_index(&data)
    } else {
        data.into_owned()
    };

    let cache_control = if is_immutable(file_path) {
        "public, max-age=31536000, immutable"
    } else {
        "no-cache"
    };

    Ok(HttpResponse::Ok()
        .content_type(mime)
        .insert_header(("Cache-Control", cache_control))
        .body(body))
}

/// 所有未匹配的 GET 请求交给前端，需最后注册
pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{tail:.*}", web::get().to(serve_frontend));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type() {
        assert_eq!(content_type("index.html"), "text/html; charset=utf-8");
        assert_eq!(
            content_type("assets/app-3f2a.js"),
            "application/javascript; charset=utf-8"
        );
        assert_eq!(content_type("unknown.xyz"), "application/octet-stream");
    }

    #[test]
    fn test_hashed_assets_are_immutable() {
        assert!(is_immutable("assets/index-9c1e.css"));
        assert!(!is_immutable("index.html"));
        assert!(!is_immutable("favicon.ico"));
    }

    #[test]
    fn test_unknown_route_falls_back_to_index() {
        let (_, file) = resolve("courses/12/assignments").expect("index.html is always embedded");
        assert_eq!(file, INDEX_HTML);
    }
}
