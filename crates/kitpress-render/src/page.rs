//! Self-contained HTML shells for published pages.
//!
//! Every generated page carries a "back to campaign" link scoped to the
//! kit slug; no external stylesheets or scripts are referenced.

use crate::engine::{MarkdownEngine, html_escape};
use crate::front_matter::parse_editorial;

/// Published URL of a campaign root.
fn campaign_url(slug: &str) -> String {
    format!("/campaign/{slug}/")
}

/// Humanize a file stem into a display title: separators become spaces,
/// words are title-cased.
pub fn humanize_title(stem: &str) -> String {
    stem.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render one editorial markdown file into a complete HTML document.
///
/// The title comes from front matter, falling back to the humanized file
/// stem; the body goes through the selected engine. This never fails.
pub fn render_editorial(
    engine: &dyn MarkdownEngine,
    stem: &str,
    content: &str,
    slug: &str,
) -> String {
    let (meta, body) = parse_editorial(content);
    let title = meta.title.unwrap_or_else(|| humanize_title(stem));
    let description = meta
        .description
        .map(|d| format!("\n<meta name=\"description\" content=\"{}\"/>", html_escape(&d)))
        .unwrap_or_default();
    let body_html = engine.render(body);

    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head>
<meta charset="UTF-8"/>
<meta name="viewport" content="width=device-width,initial-scale=1"/>
<title>{title} — {slug}</title>{description}
<style>
  body{{max-width:800px;margin:40px auto;padding:0 20px;
       font-family:Georgia,serif;color:#1a1a1a;line-height:1.7;}}
  h1,h2,h3{{color:#1a1a1a;}} a{{color:#b8860b;}}
  img{{max-width:100%;}}
  pre{{background:#f6f6f6;padding:12px;overflow-x:auto;}}
  table{{border-collapse:collapse;}} td,th{{border:1px solid #ddd;padding:6px 10px;}}
  .back{{font-family:sans-serif;font-size:0.85rem;margin-bottom:24px;}}
</style>
</head><body>
<div class="back"><a href="{back}">← Back to campaign</a></div>
<h1>{title}</h1>
{body_html}
</body></html>"#,
        title = html_escape(&title),
        slug = html_escape(slug),
        description = description,
        back = campaign_url(slug),
        body_html = body_html,
    )
}

/// Index page for a published banners directory: every banner embedded as
/// an inline frame with a filename caption.
pub fn banner_index_html(slug: &str, files: &[String]) -> String {
    let items: String = files
        .iter()
        .map(|name| {
            let name = html_escape(name);
            format!(
                "<div class=\"banner\">\
                 <div class=\"caption\">{name}</div>\
                 <iframe src=\"{base}banners/{name}\" scrolling=\"no\"></iframe>\
                 </div>\n",
                base = campaign_url(slug),
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head>
<meta charset="UTF-8"/>
<title>Banners — {slug}</title>
<style>
  body{{font-family:sans-serif;padding:20px;background:#fafafa;}}
  a{{color:#b8860b;}} .back{{margin-bottom:16px;}}
  .banner{{margin:16px 0;border:1px solid #ddd;display:inline-block;}}
  .banner .caption{{font-size:0.8rem;padding:4px;background:#f0f0f0;}}
  .banner iframe{{border:none;display:block;}}
</style>
</head><body>
<div class="back"><a href="{back}">← Back to campaign</a></div>
<h2>Banner Ads — {slug}</h2>
{items}
</body></html>"#,
        slug = html_escape(slug),
        back = campaign_url(slug),
        items = if items.is_empty() {
            "<p>No banners found.</p>".to_string()
        } else {
            items
        },
    )
}

/// Index page for a published email directory: a plain hyperlink list.
pub fn email_index_html(slug: &str, files: &[String]) -> String {
    let items: String = files
        .iter()
        .map(|name| {
            let name = html_escape(name);
            format!(
                "<li><a href=\"{base}email/{name}\">{name}</a></li>",
                base = campaign_url(slug),
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head>
<meta charset="UTF-8"/>
<title>Email Modules — {slug}</title>
<style>
  body{{font-family:sans-serif;padding:20px;}}
  a{{color:#b8860b;}} li{{margin:8px 0;}}
</style>
</head><body>
<a href="{back}">← Back to campaign</a>
<h2>Email Modules — {slug}</h2>
<ul>{items}</ul>
</body></html>"#,
        slug = html_escape(slug),
        back = campaign_url(slug),
        items = if items.is_empty() {
            "<li>No modules found.</li>".to_string()
        } else {
            items
        },
    )
}
