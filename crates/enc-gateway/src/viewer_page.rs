//! HTML viewer served at the root route.

use crate::{FILES_ENDPOINT, IMAGE_ENDPOINT_PREFIX, JSON_ENDPOINT_PREFIX, MODELS_ENDPOINT};

pub(crate) fn render_viewer_page() -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>ENC Analysis Viewer</title>
  <style>
    :root {{
      color-scheme: light;
      font-family: "IBM Plex Sans", "Segoe UI", sans-serif;
    }}
    body {{
      margin: 0;
      background: #f4f6f8;
      color: #13232f;
    }}
    .container {{
      max-width: 1200px;
      margin: 0 auto;
      padding: 1.5rem;
    }}
    .controls {{
      display: flex;
      gap: 1rem;
      margin-bottom: 1rem;
    }}
    .grid {{
      display: grid;
      gap: 1rem;
      grid-template-columns: 1fr 1fr;
    }}
    .panel {{
      background: #ffffff;
      border: 1px solid #d4dde6;
      border-radius: 8px;
      padding: 1rem;
      overflow: auto;
    }}
    img {{
      max-width: 100%;
    }}
    pre {{
      white-space: pre-wrap;
      font-size: 0.85rem;
    }}
  </style>
</head>
<body>
  <div class="container">
    <h1>ENC Analysis Viewer</h1>
    <div class="controls">
      <label>Model <select id="modelSelect"></select></label>
      <label>Image <select id="fileSelect"></select></label>
    </div>
    <div class="grid">
      <div class="panel"><img id="imageView" alt="selected image" /></div>
      <div class="panel"><pre id="jsonView"></pre></div>
    </div>
  </div>
  <script>
    const modelSelect = document.getElementById("modelSelect");
    const fileSelect = document.getElementById("fileSelect");
    const imageView = document.getElementById("imageView");
    const jsonView = document.getElementById("jsonView");

    function fillSelect(select, values) {{
      select.innerHTML = "";
      for (const value of values) {{
        const option = document.createElement("option");
        option.value = value;
        option.textContent = value;
        select.appendChild(option);
      }}
    }}

    async function refreshSelection() {{
      const model = modelSelect.value;
      const file = fileSelect.value;
      if (!model || !file) {{
        return;
      }}
      imageView.src = "{image_prefix}/" + encodeURIComponent(file);
      const response = await fetch("{json_prefix}/" + encodeURIComponent(model) + "/" + encodeURIComponent(file));
      const payload = await response.json();
      jsonView.textContent = JSON.stringify(payload, null, 2);
    }}

    async function boot() {{
      const [models, files] = await Promise.all([
        fetch("{models_endpoint}").then((response) => response.json()),
        fetch("{files_endpoint}").then((response) => response.json()),
      ]);
      fillSelect(modelSelect, models);
      fillSelect(fileSelect, files);
      modelSelect.addEventListener("change", refreshSelection);
      fileSelect.addEventListener("change", refreshSelection);
      await refreshSelection();
    }}

    boot();
  </script>
</body>
</html>
"#,
        image_prefix = IMAGE_ENDPOINT_PREFIX,
        json_prefix = JSON_ENDPOINT_PREFIX,
        models_endpoint = MODELS_ENDPOINT,
        files_endpoint = FILES_ENDPOINT,
    )
}
