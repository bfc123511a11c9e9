//! HTML for the desktop landing page and the mobile upload page.

use std::fmt::Write;

/// Escape text for use inside HTML element content or a quoted attribute.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Path an image key is served from.
pub fn image_src(key: &str) -> String {
    format!("/images/{}", urlencoding::encode(key))
}

fn gallery_items(images: &[String]) -> String {
    if images.is_empty() {
        return r#"<p class="empty">还没有图片</p>"#.to_string();
    }

    let mut html = String::new();
    for key in images {
        let src = escape_html(&image_src(key));
        let name = escape_html(key);
        let _ = write!(
            html,
            r#"<figure><a href="{src}" target="_blank"><img src="{src}" alt="{name}" loading="lazy"></a><figcaption>{name}</figcaption></figure>"#
        );
    }
    html
}

/// Landing page: QR code for the upload page plus the current gallery.
///
/// The gallery re-polls `GET /images` every `poll_interval_secs`; zero
/// disables polling.
pub fn landing_page(
    qr_code: &str,
    upload_url: &str,
    images: &[String],
    poll_interval_secs: u64,
) -> String {
    let qr_code = escape_html(qr_code);
    let upload_url = escape_html(upload_url);
    let gallery = gallery_items(images);
    let poll_ms = poll_interval_secs.saturating_mul(1000);

    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>手机传图</title>
    <style>
        body {{ font-family: Arial, sans-serif; max-width: 960px; margin: 0 auto; padding: 20px; color: #333; }}
        .qr {{ text-align: center; padding: 20px; border-bottom: 1px solid #eee; }}
        .qr img {{ width: 240px; height: 240px; }}
        .qr code {{ display: block; margin-top: 8px; color: #666; }}
        #gallery {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: 16px; margin-top: 20px; }}
        figure {{ margin: 0; text-align: center; }}
        figure img {{ max-width: 100%; max-height: 200px; border: 1px solid #ddd; border-radius: 5px; }}
        figcaption {{ font-size: 12px; color: #888; word-break: break-all; }}
        .empty {{ color: #999; grid-column: 1 / -1; text-align: center; }}
    </style>
</head>
<body>
    <div class="qr">
        <h2>📱 用手机扫描二维码上传图片</h2>
        <img src="{qr_code}" alt="upload QR code">
        <code>{upload_url}</code>
    </div>
    <h3>已上传的图片</h3>
    <div id="gallery">{gallery}</div>
    <script>
        const POLL_MS = {poll_ms};

        function render(images) {{
            const gallery = document.getElementById('gallery');
            gallery.replaceChildren();
            if (images.length === 0) {{
                const p = document.createElement('p');
                p.className = 'empty';
                p.textContent = '还没有图片';
                gallery.appendChild(p);
                return;
            }}
            for (const name of images) {{
                const src = '/images/' + encodeURIComponent(name);
                const fig = document.createElement('figure');
                const link = document.createElement('a');
                link.href = src;
                link.target = '_blank';
                const img = document.createElement('img');
                img.src = src;
                img.alt = name;
                img.loading = 'lazy';
                link.appendChild(img);
                const caption = document.createElement('figcaption');
                caption.textContent = name;
                fig.appendChild(link);
                fig.appendChild(caption);
                gallery.appendChild(fig);
            }}
        }}

        let last = null;
        function refresh() {{
            fetch('/images')
                .then(response => response.json())
                .then(images => {{
                    const key = JSON.stringify(images);
                    if (key !== last) {{
                        last = key;
                        render(images);
                    }}
                }})
                .catch(() => {{}});
        }}

        if (POLL_MS > 0) {{
            setInterval(refresh, POLL_MS);
        }}
    </script>
</body>
</html>
"#
    )
}

/// Mobile upload page. Picks or captures a photo and posts it as the
/// `image` field of a multipart form.
pub fn upload_page() -> &'static str {
    r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>手机上传图片</title>
    <style>
        body { font-family: Arial, sans-serif; text-align: center; padding: 20px; }
        .upload-btn {
            background: #4CAF50;
            color: white;
            padding: 15px 30px;
            border: none;
            border-radius: 5px;
            font-size: 16px;
            margin: 20px;
            cursor: pointer;
        }
        #preview { max-width: 100%; margin: 20px 0; }
        #preview img { max-width: 300px; border: 2px solid #ddd; border-radius: 5px; }
        .status { margin: 10px; color: #666; }
    </style>
</head>
<body>
    <h2>📱 上传图片到电脑</h2>

    <form id="uploadForm" enctype="multipart/form-data">
        <input type="file" id="fileInput" accept="image/*" capture="camera" style="display: none;">
        <button type="button" class="upload-btn" onclick="document.getElementById('fileInput').click()">
            📸 选择或拍照上传
        </button>
    </form>

    <div id="preview"></div>
    <div id="status" class="status"></div>

    <script>
        const status = document.getElementById('status');
        const button = document.querySelector('.upload-btn');
        const preview = document.getElementById('preview');

        function setStatus(text, color) {
            status.textContent = text;
            status.style.color = color;
        }

        document.getElementById('fileInput').addEventListener('change', function (e) {
            const file = e.target.files[0];
            if (!file) return;

            const reader = new FileReader();
            reader.onload = function (ev) {
                const img = document.createElement('img');
                img.src = ev.target.result;
                preview.replaceChildren(img);
            };
            reader.readAsDataURL(file);

            uploadFile(file);
            e.target.value = '';
        });

        function uploadFile(file) {
            const formData = new FormData();
            formData.append('image', file);

            setStatus('⏳ 上传中...', '#666');
            button.disabled = true;

            fetch('/upload', { method: 'POST', body: formData })
                .then(response => response.json())
                .then(data => {
                    if (data.success) {
                        setStatus('✅ 上传成功！', 'green');
                        setTimeout(() => {
                            setStatus('可以继续上传新图片', '#666');
                            button.disabled = false;
                            preview.replaceChildren();
                        }, 2000);
                    } else {
                        setStatus('❌ ' + (data.error || '上传失败'), 'red');
                        button.disabled = false;
                    }
                })
                .catch(() => {
                    setStatus('❌ 上传失败', 'red');
                    button.disabled = false;
                });
        }
    </script>
</body>
</html>
"#
}
