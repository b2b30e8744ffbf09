use std::fmt::Write;

use headliner_core::{domain::Topic, theme::ThemePalette};

/// Escapes text for use in element content and quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Wraps `content` in the shared document shell: themed body, navigation,
/// theme picker and topic sidebar.
pub(crate) fn document(
    title: &str,
    palette: &ThemePalette,
    topics: &[Topic],
    content: &str,
) -> String {
    let mut html = String::with_capacity(content.len() + 4096);
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/static/style.css">
</head>
<body style="background-color: {background}; color: {text};">
<header>
<h1>Headliner</h1>
<nav><a href="/">Latest</a> <a href="/saved">Saved</a></nav>
<form class="theme" action="/change_theme" method="post">
<label for="bg_color">Background</label>
<input type="text" id="bg_color" name="bg_color" value="{background}"
 maxlength="7">
<button type="submit">Apply</button>
</form>
</header>
<main>
"#,
        title = escape(title),
        background = escape(&palette.background),
        text = palette.text.hex(),
    );

    html.push_str(&topic_sidebar(topics));
    html.push_str(content);
    html.push_str(
        r#"</main>
<script src="/static/js/script.js"></script>
</body>
</html>
"#,
    );
    html
}

fn topic_sidebar(topics: &[Topic]) -> String {
    let mut html =
        String::from("<aside class=\"topics\">\n<h2>Topics</h2>\n<ul>\n");
    for topic in topics {
        let state = if topic.is_visible { "Hide" } else { "Show" };
        let _ = writeln!(
            html,
            r#"<li class="{class}"><span>{name}</span>
<form action="/toggle_topic/{id}" method="post">
<button type="submit">{state}</button></form>
<a href="/delete_topic/{id}">Delete</a></li>"#,
            class = if topic.is_visible { "visible" } else { "hidden" },
            name = escape(&topic.name),
            id = topic.id,
        );
    }
    html.push_str(
        r#"</ul>
<form class="add-topic" action="/add_topic" method="post">
<input type="text" name="name" placeholder="Topic name" maxlength="50">
<input type="text" name="keyword" placeholder="Feed keyword" maxlength="100">
<button type="submit">Add topic</button>
</form>
</aside>
"#,
    );
    html
}
