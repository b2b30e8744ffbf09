use std::fmt::Write;

use headliner_core::{
    domain::{Article, FeedArticle, Topic},
    theme::ThemePalette,
};

use super::layout::{document, escape};

/// Main view: latest articles of every visible topic.
#[derive(Debug)]
pub struct IndexPage<'a> {
    pub palette: &'a ThemePalette,
    pub topics: &'a [Topic],
    pub articles: &'a [FeedArticle],
}

impl IndexPage<'_> {
    pub fn render(&self) -> String {
        let mut content = String::from(
            "<section class=\"articles\">\n<h2>Latest news</h2>\n",
        );
        if self.articles.is_empty() {
            content.push_str("<p class=\"empty\">No articles to show.</p>\n");
        }
        for article in self.articles {
            content.push_str("<article>\n");
            push_image(&mut content, article.image_url.as_deref());
            let _ = write!(
                content,
                r#"<span class="topic">{topic}</span>
<h3><a href="{url}" target="_blank" rel="noopener">{title}</a></h3>
<p>{description}</p>
<form action="/save_article" method="post">
<input type="hidden" name="title" value="{title}">
<input type="hidden" name="description" value="{description}">
<input type="hidden" name="url" value="{url}">
<input type="hidden" name="image_url" value="{image_url}">
<input type="hidden" name="topic" value="{topic}">
<button type="submit">Save</button>
</form>
</article>
"#,
                topic = escape(&article.topic),
                url = escape(&article.url),
                title = escape(&article.title),
                description = escape(&article.description),
                image_url =
                    escape(article.image_url.as_deref().unwrap_or_default()),
            );
        }
        content.push_str("</section>\n");

        document("Headliner", self.palette, self.topics, &content)
    }
}

/// Saved favorites.
#[derive(Debug)]
pub struct SavedPage<'a> {
    pub palette: &'a ThemePalette,
    pub topics: &'a [Topic],
    pub articles: &'a [Article],
}

impl SavedPage<'_> {
    pub fn render(&self) -> String {
        let mut content = String::from(
            "<section class=\"articles\">\n<h2>Saved articles</h2>\n",
        );
        if self.articles.is_empty() {
            content.push_str("<p class=\"empty\">Nothing saved yet.</p>\n");
        }
        for article in self.articles {
            content.push_str("<article>\n");
            push_image(&mut content, article.image_url.as_deref());
            let _ = write!(
                content,
                r#"<span class="topic">{topic}</span>
<h3><a href="{url}" target="_blank" rel="noopener">{title}</a></h3>
<p>{description}</p>
<a class="delete" href="/delete_article/{id}">Remove</a>
</article>
"#,
                topic = escape(&article.topic),
                url = escape(&article.url),
                title = escape(&article.title),
                description =
                    escape(article.description.as_deref().unwrap_or_default()),
                id = article.id,
            );
        }
        content.push_str("</section>\n");

        document("Saved - Headliner", self.palette, self.topics, &content)
    }
}

fn push_image(html: &mut String, image_url: Option<&str>) {
    if let Some(src) = image_url {
        let _ = writeln!(
            html,
            r#"<img src="{}" alt="" loading="lazy">"#,
            escape(src)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> ThemePalette {
        ThemePalette::resolve("#ffffff".to_string())
    }

    #[test]
    fn index_renders_save_form_with_escaped_fields() {
        let articles = vec![FeedArticle {
            title: "Rust <2024> edition".into(),
            description: "Fast & safe".into(),
            url: "https://example.com/a?x=1&y=2".into(),
            image_url: Some("https://example.com/a.jpg".into()),
            topic: "Technology".into(),
        }];
        let palette = palette();
        let html = IndexPage {
            palette: &palette,
            topics: &[],
            articles: &articles,
        }
        .render();

        assert!(html.contains("Rust &lt;2024&gt; edition"));
        assert!(html.contains(r#"name="description" value="Fast &amp; safe""#));
        assert!(html.contains(r#"href="https://example.com/a?x=1&amp;y=2""#));
        assert!(html.contains(r#"<img src="https://example.com/a.jpg""#));
        assert!(html.contains(r#"action="/save_article""#));
    }

    #[test]
    fn index_without_articles_says_so() {
        let palette = palette();
        let html = IndexPage {
            palette: &palette,
            topics: &[],
            articles: &[],
        }
        .render();
        assert!(html.contains("No articles to show."));
    }

    #[test]
    fn saved_lists_delete_links_and_skips_missing_images() {
        let articles = vec![Article {
            id: 7,
            title: "Saved".into(),
            description: None,
            url: "https://example.com/s".into(),
            image_url: None,
            topic: "Politics".into(),
        }];
        let palette = palette();
        let html = SavedPage {
            palette: &palette,
            topics: &[],
            articles: &articles,
        }
        .render();

        assert!(html.contains(r#"href="/delete_article/7""#));
        assert!(!html.contains("<img"));
        assert!(html.contains("<title>Saved - Headliner</title>"));
    }
}
