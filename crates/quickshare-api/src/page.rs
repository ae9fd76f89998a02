//! Index page rendering
//!
//! The page is produced from a typed [`IndexView`] by a pure function so it can
//! be tested without going through HTTP.

use url::form_urlencoded;

/// Data shown on the index page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexView {
    /// Names of the files currently shared
    pub files: Vec<String>,
}

impl IndexView {
    pub fn new(files: Vec<String>) -> Self {
        Self { files }
    }
}

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>QuickShare Server</title>
    <style>
        body { font-family: sans-serif; text-align: center; padding: 20px; background: #f8f9fa; }
        .container { max-width: 500px; margin: auto; background: white; padding: 30px; border-radius: 10px; box-shadow: 0 4px 6px rgba(0,0,0,0.1); }
        .upload-box { border: 2px dashed #007bff; padding: 30px; margin: 20px 0; border-radius: 8px; }
        input[type="file"] { margin-bottom: 20px; width: 100%; }
        input[type="submit"] { background: #007bff; color: white; border: none; padding: 12px 24px; border-radius: 5px; cursor: pointer; font-size: 16px; }
        input[type="submit"]:hover { background: #0056b3; }
        .file-list { text-align: left; margin-top: 30px; }
        a { color: #007bff; text-decoration: none; }
    </style>
</head>
<body>
    <div class="container">
        <h1>QuickShare Server</h1>
        <div class="upload-box">
            <h3>Send a file to this computer</h3>
            <form method="POST" action="/upload" enctype="multipart/form-data">
                <input type="file" name="file">
                <input type="submit" value="Upload">
            </form>
        </div>
        <div class="file-list">
            <h3>Shared files</h3>
            <ul>
"#;

const PAGE_TAIL: &str = r#"            </ul>
        </div>
    </div>
</body>
</html>
"#;

/// Render the index page: upload form plus one download link per file.
pub fn render_index(view: &IndexView) -> String {
    let mut html = String::from(PAGE_HEAD);

    for name in &view.files {
        html.push_str(&format!(
            "                <li><a href=\"{}\">{}</a></li>\n",
            escape_html(&download_href(name)),
            escape_html(name)
        ));
    }

    html.push_str(PAGE_TAIL);
    html
}

/// Link to the download route for `name`, encoded as a single path segment
pub fn download_href(name: &str) -> String {
    // byte_serialize writes spaces as '+' and a literal '+' as %2B
    let encoded: String = form_urlencoded::byte_serialize(name.as_bytes()).collect();
    format!("/download/{}", encoded.replace('+', "%20"))
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
