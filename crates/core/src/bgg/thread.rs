use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::BggError;
use crate::xml::XmlNode;

use super::parse_date;

/// Individual article (post) in a thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadArticle {
    pub id: String,
    pub username: String,
    pub link: String,
    pub post_date: Option<DateTime<Utc>>,
    pub edit_date: Option<DateTime<Utc>>,
    pub num_edits: u32,
    pub subject: String,
    /// Raw HTML body as returned by the API
    pub body: String,
}

/// Thread with all of its articles from `/thread`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadOutput {
    pub id: String,
    pub subject: String,
    pub num_articles: u32,
    pub link: String,
    pub articles: Vec<ThreadArticle>,
}

fn article_from_node(node: &XmlNode) -> ThreadArticle {
    ThreadArticle {
        id: node.string("id"),
        username: node.string("username"),
        link: node.string("link"),
        post_date: parse_date(node.field("postdate")),
        edit_date: parse_date(node.field("editdate")),
        num_edits: node.number("numedits"),
        subject: node.string("subject"),
        body: node.string("body"),
    }
}

/// Map a `/thread` response.
///
/// Any document without a `<thread>` root, error documents included, is
/// reported as [`BggError::ThreadNotFound`].
pub fn parse_thread(xml: &str) -> Result<ThreadOutput, BggError> {
    let root = XmlNode::parse(xml)?;
    if root.name != "thread" {
        return Err(BggError::ThreadNotFound);
    }

    let articles = root
        .child("articles")
        .map(|a| a.children_named("article").map(article_from_node).collect())
        .unwrap_or_default();

    Ok(ThreadOutput {
        id: root.string("id"),
        subject: root.string("subject"),
        num_articles: root.number("numarticles"),
        link: root.string("link"),
        articles,
    })
}

/// Strip HTML tags and decode HTML entities from an article body
///
/// Line breaks (`<br/>`) and paragraph ends become newlines.
pub fn strip_html(text: &str) -> String {
    let breaks = Regex::new(r"(?i)<br\s*/?>|</p>").unwrap();
    let tags = Regex::new(r"<[^>]*>").unwrap();

    let with_breaks = breaks.replace_all(text, "\n");
    let stripped = tags.replace_all(&with_breaks, "");
    html_escape::decode_html_entities(&stripped)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREAD: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<thread id="2933563" numarticles="2" link="https://boardgamegeek.com/thread/2933563" termsofuse="https://boardgamegeek.com/xmlapi/termsofuse">
    <subject>First play thoughts</subject>
    <articles>
        <article id="40001" username="alice" link="https://boardgamegeek.com/thread/2933563/article/40001#40001" postdate="2022-09-01T10:00:00-05:00" editdate="2022-09-01T11:30:00-05:00" numedits="1">
            <subject>First play thoughts</subject>
            <body><![CDATA[Loved it.<br/>Would play again &amp; again.]]></body>
        </article>
        <article id="40002" username="bob" link="https://boardgamegeek.com/thread/2933563/article/40002#40002" postdate="2022-09-02T08:00:00-05:00" editdate="2022-09-02T08:00:00-05:00" numedits="0">
            <subject>Re: First play thoughts</subject>
            <body>Agreed</body>
        </article>
    </articles>
</thread>"#;

    #[test]
    fn test_parse_thread() {
        let output = parse_thread(THREAD).unwrap();

        assert_eq!(output.id, "2933563");
        assert_eq!(output.subject, "First play thoughts");
        assert_eq!(output.num_articles, 2);
        assert_eq!(output.link, "https://boardgamegeek.com/thread/2933563");
        assert_eq!(output.articles.len(), 2);

        let first = &output.articles[0];
        assert_eq!(first.id, "40001");
        assert_eq!(first.username, "alice");
        assert_eq!(first.num_edits, 1);
        assert_eq!(first.subject, "First play thoughts");
        assert_eq!(first.body, "Loved it.<br/>Would play again &amp; again.");
        assert_eq!(
            first.post_date.unwrap().to_rfc3339(),
            "2022-09-01T15:00:00+00:00"
        );
        assert_eq!(output.articles[1].subject, "Re: First play thoughts");
    }

    #[test]
    fn test_parse_thread_single_article() {
        let xml = r#"<thread id="1" numarticles="1" link="l">
            <subject>Solo</subject>
            <articles><article id="9" username="carol"><body>hi</body></article></articles>
        </thread>"#;

        let output = parse_thread(xml).unwrap();

        assert_eq!(output.articles.len(), 1);
        assert_eq!(output.articles[0].id, "9");
        assert_eq!(output.articles[0].num_edits, 0);
        assert_eq!(output.articles[0].subject, "");
        assert_eq!(output.articles[0].post_date, None);
    }

    #[test]
    fn test_parse_thread_without_articles() {
        let xml = r#"<thread id="1" numarticles="0" link="l"><subject>Empty</subject></thread>"#;

        let output = parse_thread(xml).unwrap();

        assert!(output.articles.is_empty());
    }

    #[test]
    fn test_parse_thread_not_found() {
        let xml = r#"<items termsofuse="https://boardgamegeek.com/xmlapi/termsofuse"/>"#;
        assert_eq!(parse_thread(xml), Err(BggError::ThreadNotFound));
    }

    #[test]
    fn test_parse_thread_error_document() {
        let xml = r#"<error message="Thread Not Found"/>"#;
        let err = parse_thread(xml).unwrap_err();

        assert_eq!(err, BggError::ThreadNotFound);
        assert_eq!(err.to_string(), "Thread not found");
    }

    #[test]
    fn test_parse_thread_malformed() {
        assert!(matches!(parse_thread("<thread"), Err(BggError::Xml(_))));
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(
            strip_html("Loved it.<br/>Would play again &amp; again."),
            "Loved it.\nWould play again & again."
        );
        assert_eq!(
            strip_html("<p>First <b>bold</b></p><p>Second</p>"),
            "First bold\nSecond"
        );
    }
}
