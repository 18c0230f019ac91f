//! Server-rendered page: form, loading, error, and result grid

use super::{download_filename, escape_html};
use crate::catalog::{CatalogOption, MODELS, VIBES};
use crate::form::{FormController, MIN_DESCRIPTION_CHARS};

const STYLE: &str = r#"
body { margin: 0; background: #111827; color: #e5e7eb; font-family: sans-serif; }
header, footer { text-align: center; padding: 1.5rem; }
footer { color: #6b7280; font-size: 0.875rem; }
main { max-width: 80rem; margin: 0 auto; padding: 2rem 1rem; }
section, fieldset { background: #1f2937; border: 1px solid #374151; border-radius: 1rem; padding: 2rem; margin-bottom: 3rem; }
h2, legend { color: #d8b4fe; font-weight: bold; font-size: 1.5rem; }
fieldset[disabled] { opacity: 0.5; }
textarea { width: 100%; min-height: 12rem; background: #374151; color: #fff; border-radius: 0.5rem; }
.options { display: grid; grid-template-columns: repeat(auto-fill, minmax(10rem, 1fr)); gap: 1rem; }
.options img { width: 100%; border-radius: 0.5rem; }
.preview { max-width: 24rem; aspect-ratio: 3 / 4; object-fit: cover; border-radius: 0.5rem; }
.actions { text-align: center; }
.error { text-align: center; padding: 2rem; background: rgba(127, 29, 29, 0.5); border: 1px solid #b91c1c; border-radius: 0.5rem; }
.error h3 { color: #f87171; }
.grid { display: grid; grid-template-columns: repeat(2, 1fr); gap: 1rem; }
@media (min-width: 768px) { .grid { grid-template-columns: repeat(3, 1fr); gap: 1.5rem; } }
.cell { position: relative; aspect-ratio: 9 / 16; overflow: hidden; border-radius: 0.5rem; border: 2px solid #374151; }
.cell img { width: 100%; height: 100%; object-fit: cover; }
.cell a { position: absolute; bottom: 0.75rem; right: 0.75rem; background: rgba(0, 0, 0, 0.5); color: #fff; padding: 0.5rem; border-radius: 9999px; }
"#;

/// Render the whole page for the current form state
pub fn render_page(form: &FormController) -> String {
    let mut body = String::new();

    if form.is_loading() {
        body.push_str(&render_loading(form));
    } else if form.images().is_empty() {
        body.push_str(&render_form(form));
    }

    if let Some(error) = form.error() {
        body.push_str(&render_error(error));
    }

    if !form.is_loading() && !form.images().is_empty() {
        body.push_str(&render_results(form));
    }

    // Keep polling while a generation started elsewhere is running.
    let refresh = if form.is_loading() {
        r#"<meta http-equiv="refresh" content="3">"#
    } else {
        ""
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{refresh}
<title>Affiliate Image Studio</title>
<style>{STYLE}</style>
</head>
<body>
<header><h1>Affiliate Image Studio</h1><p>Turn a product description into six ready-to-post marketing images.</p></header>
<main>
{body}
</main>
<footer><p>Powered by Gemini API</p></footer>
</body>
</html>
"#
    )
}

fn render_form(form: &FormController) -> String {
    let selection = form.selection();

    let image_block = match &selection.image {
        Some(image) => format!(
            r#"<img class="preview" src="{}" alt="Product Preview">
<label><input type="checkbox" name="remove_image" value="1"> Remove image</label>"#,
            escape_html(image.data_uri())
        ),
        None => String::from("<p>Upload a reference image (optional)</p>"),
    };

    let model_step = render_options(
        "Step 2: Choose a Model",
        "model",
        &MODELS,
        selection.model,
        selection.description.is_empty(),
    );
    let vibe_step = render_options(
        "Step 3: Choose a Vibe",
        "vibe",
        &VIBES,
        selection.vibe,
        selection.model.is_none(),
    );

    let generate_disabled = if !form.is_complete() || form.is_loading() {
        " disabled"
    } else {
        ""
    };

    format!(
        r#"<form id="studio-form" method="post" action="/form" enctype="multipart/form-data">
<section>
<h2>Step 1: Describe Your Product</h2>
{image_block}
<input type="file" name="image" accept="image/*">
<p>Describe your product for the AI *</p>
<textarea name="description" placeholder="e.g., A stylish, noise-cancelling wireless headphone in matte black with gold accents.">{description}</textarea>
<p>Be descriptive! The more detail you provide, the better the result.</p>
</section>
{model_step}
{vibe_step}
<div class="actions">
<button type="submit" name="action" value="save">Save</button>
<button type="submit" name="action" value="generate"{generate_disabled}>Generate 6 Images</button>
</div>
</form>
{script}
"#,
        description = escape_html(&selection.description),
        script = step_script(),
    )
}

/// Re-applies the step gating in the browser as the user types and picks,
/// so each step unlocks without a save round trip
fn step_script() -> String {
    format!(
        r#"<script>
(function () {{
  var form = document.getElementById("studio-form");
  if (!form) return;
  function update() {{
    var description = form.elements["description"].value;
    var model = form.querySelector('input[name="model"]:checked');
    var vibe = form.querySelector('input[name="vibe"]:checked');
    form.querySelector('fieldset[data-step="model"]').disabled = description.length === 0;
    form.querySelector('fieldset[data-step="vibe"]').disabled = !model;
    form.querySelector('button[value="generate"]').disabled =
      !(Array.from(description.trim()).length > {min} && model && vibe);
  }}
  form.addEventListener("input", update);
  form.addEventListener("change", update);
}})();
</script>"#,
        min = MIN_DESCRIPTION_CHARS,
    )
}

fn render_options(
    title: &str,
    field: &str,
    options: &[CatalogOption],
    selected: Option<&CatalogOption>,
    disabled: bool,
) -> String {
    let items: String = options
        .iter()
        .map(|option| {
            let checked = if selected.map(|s| s.id) == Some(option.id) {
                " checked"
            } else {
                ""
            };
            format!(
                r#"<label><input type="radio" name="{field}" value="{id}"{checked}><img src="{image}" alt="{name}"><span>{name}</span></label>"#,
                id = escape_html(option.id),
                image = escape_html(option.image),
                name = escape_html(option.name),
            )
        })
        .collect();

    let disabled = if disabled { " disabled" } else { "" };
    format!(
        r#"<fieldset data-step="{field}"{disabled}><legend>{title}</legend><div class="options">{items}</div></fieldset>
"#
    )
}

fn render_loading(form: &FormController) -> String {
    let message = if form.selection().image.is_some() {
        "Our AI is carefully placing your product into new scenes. This might take a bit longer."
    } else {
        "Our creative AI is warming up. This may take a moment."
    };
    format!(
        r#"<div class="actions"><h2>Generating Your Content...</h2><p>{message}</p>
<form method="post" action="/reset"><button type="submit">Start Over</button></form></div>
"#
    )
}

fn render_error(error: &str) -> String {
    format!(
        r#"<div class="error"><h3>An Error Occurred</h3><p>{}</p>
<form method="post" action="/reset"><button type="submit">Try Again</button></form></div>
"#,
        escape_html(error)
    )
}

fn render_results(form: &FormController) -> String {
    let cells: String = form
        .images()
        .iter()
        .enumerate()
        .map(|(index, image)| {
            let ordinal = index + 1;
            format!(
                r#"<div class="cell"><img src="{src}" alt="Generated content {ordinal}"><a href="/images/{ordinal}/download" download="{filename}">Download</a></div>"#,
                src = escape_html(&image.data_uri()),
                filename = download_filename(ordinal),
            )
        })
        .collect();

    format!(
        r#"<section><h2>Generated Images</h2><div class="grid">{cells}</div>
<form class="actions" method="post" action="/reset"><button type="submit">Start Over</button></form></section>
"#
    )
}
