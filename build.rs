use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=frontend/dist");
    println!("cargo:rerun-if-changed=fixtures");

    let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") else {
        return;
    };
    let dist_path = Path::new(&manifest_dir).join("frontend/dist");

    if !dist_path.join("index.html").exists() {
        println!("cargo:warning=frontend/dist not found, embedding a placeholder page");
        if let Err(e) = create_placeholder(&dist_path) {
            panic!("Failed to create placeholder frontend: {e}");
        }
    }
}

fn create_placeholder(dist_path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dist_path.join("assets"))?;

    let html = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>%APP_NAME%</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            max-width: 640px;
            margin: 96px auto;
            padding: 0 20px;
            color: #1f2937;
        }
        code {
            background: #f3f4f6;
            padding: 2px 6px;
            border-radius: 4px;
        }
    </style>
</head>
<body>
    <h1>%APP_NAME%</h1>
    <p>The API is running, but the web client was not built before compiling the server.</p>
    <p>Build it with <code>cd frontend &amp;&amp; npm install &amp;&amp; npm run build</code> and rebuild the server.</p>
</body>
</html>
"#;

    fs::write(dist_path.join("index.html"), html)?;
    fs::write(dist_path.join("favicon.ico"), [])
}
