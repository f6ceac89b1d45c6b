//! Syllabus page parser.
//!
//! Page shape, per section:
//!
//! ```text
//! <div>                                  header's parent
//!   <h3 class="list_header">Week 1 (10:32)</h3>
//! </div>
//! <ul>                                   item list: next element after the parent
//!   <li><a href="...">Intro (5:12)</a> ... <a href="intro.mp4">...</a></li>
//! </ul>
//! ```
//!
//! Headers are matched by class, not by tag, so small markup changes around
//! them do not break the parse.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::error::ParseError;
use super::sanitize::sanitize_name;
use super::{Catalog, CatalogStatus, Section, Video};

/// Class carried by every section header element.
pub const SECTION_HEADER_CLASS: &str = "list_header";

/// Pattern an anchor's `href` must match to count as the video file.
pub const MEDIA_LINK_PATTERN: &str = r"\.mp4";

/// Compiled selectors and patterns for one page shape. Build once, parse many.
#[derive(Debug)]
pub struct SyllabusParser {
    header: Selector,
    item: Selector,
    anchor: Selector,
    linked_anchor: Selector,
    media_link: Regex,
}

fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| ParseError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

impl SyllabusParser {
    pub fn new() -> Result<Self, ParseError> {
        let media_link = Regex::new(MEDIA_LINK_PATTERN).map_err(|e| ParseError::Selector {
            selector: MEDIA_LINK_PATTERN.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            header: selector(&format!(".{}", SECTION_HEADER_CLASS))?,
            item: selector("li")?,
            anchor: selector("a")?,
            linked_anchor: selector("a[href]")?,
            media_link,
        })
    }

    /// Parses raw page markup into a catalog, preserving document order.
    ///
    /// A page without any section header yields an empty catalog (see
    /// [`Catalog::status`]); a header that does not fit the expected shape is an error.
    pub fn parse(&self, page: &str) -> Result<Catalog, ParseError> {
        let document = Html::parse_document(page);
        let mut sections = Vec::new();

        for (index, header) in document.select(&self.header).enumerate() {
            let section_no = index + 1;
            let raw = header.text().collect::<String>();
            if raw.trim().is_empty() {
                return Err(ParseError::MissingSectionName {
                    section: section_no,
                });
            }
            let name = sanitize_name(&raw);
            if name.is_empty() {
                return Err(ParseError::EmptySectionName {
                    section: section_no,
                    raw: raw.trim().to_string(),
                });
            }
            tracing::debug!(section = section_no, "{}", name);

            let list = item_list(header).ok_or_else(|| ParseError::MissingItemList {
                section: section_no,
                name: name.clone(),
            })?;

            let mut videos = Vec::new();
            for (item_index, item) in list.select(&self.item).enumerate() {
                let video = self.parse_item(item, section_no, item_index + 1)?;
                tracing::debug!("  {} {}", video.name, video.source_url);
                videos.push(video);
            }
            sections.push(Section { name, videos });
        }

        let catalog = Catalog::new(sections);
        match catalog.status() {
            CatalogStatus::NoSections => {
                tracing::warn!("no sections found; probably bad cookies file (or wrong class name)")
            }
            CatalogStatus::Found { sections, videos } => {
                tracing::info!("found {} sections and {} videos on this page", sections, videos)
            }
        }
        Ok(catalog)
    }

    fn parse_item(&self, item: ElementRef<'_>, section: usize, item_no: usize) -> Result<Video, ParseError> {
        let title = item
            .select(&self.anchor)
            .next()
            .map(|a| a.text().collect::<String>())
            .filter(|t| !t.trim().is_empty())
            .ok_or(ParseError::MissingVideoName {
                section,
                item: item_no,
            })?;
        let name = sanitize_name(&title);

        let source_url = item
            .select(&self.linked_anchor)
            .filter_map(|a| a.value().attr("href"))
            .find(|href| self.media_link.is_match(href))
            .ok_or_else(|| ParseError::MissingMediaLink {
                section,
                item: item_no,
                name: name.clone(),
            })?;

        Ok(Video {
            name,
            source_url: source_url.to_string(),
        })
    }
}

/// Header → parent → next sibling element: the list holding the week's items.
fn item_list(header: ElementRef<'_>) -> Option<ElementRef<'_>> {
    header
        .parent()?
        .next_siblings()
        .find_map(ElementRef::wrap)
}

/// Parses a syllabus page with the default page shape.
pub fn parse_syllabus(page: &str) -> Result<Catalog, ParseError> {
    SyllabusParser::new()?.parse(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_WEEKS: &str = r#"
        <html><body>
        <div class="course-item-list">
          <div class="course-item-list-header">
            <h3 class="list_header">Week 1 (10:32)</h3>
          </div>
          <ul class="course-item-list-section-list">
            <li>
              <a class="lecture-link" href="/nlp/lecture/view?lecture_id=1">Intro (5:12)</a>
              <div class="course-lecture-item-resource">
                <a href="/nlp/lecture/subtitles?q=1_en">Subtitles</a>
                <a href="http://cdn.example.org/nlp/1.mp4">Video (MP4)</a>
              </div>
            </li>
            <li>
              <a class="lecture-link" href="/nlp/lecture/view?lecture_id=2">Setup</a>
              <a href="2.mp4?download=true">Video (MP4)</a>
            </li>
          </ul>
          <div class="course-item-list-header">
            <h3 class="list_header">Week 2: Language Models</h3>
          </div>
          <ul class="course-item-list-section-list">
            <li>
              <a href="/nlp/lecture/view?lecture_id=3">N-grams</a>
              <a href="/nlp/lecture/download.mp4?lecture_id=3">Video</a>
            </li>
          </ul>
        </div>
        </body></html>
    "#;

    #[test]
    fn parses_sections_and_videos_in_order() {
        let catalog = parse_syllabus(TWO_WEEKS).unwrap();
        assert_eq!(catalog.section_count(), 2);
        assert_eq!(catalog.video_count(), 3);

        let s1 = &catalog.sections()[0];
        assert_eq!(s1.name, "Week_1");
        assert_eq!(s1.videos[0].name, "Intro");
        assert_eq!(s1.videos[0].source_url, "http://cdn.example.org/nlp/1.mp4");
        assert_eq!(s1.videos[1].name, "Setup");
        assert_eq!(s1.videos[1].source_url, "2.mp4?download=true");

        let s2 = &catalog.sections()[1];
        assert_eq!(s2.name, "Week_2-_Language_Models");
        assert_eq!(s2.videos[0].name, "N-grams");
        assert_eq!(
            s2.videos[0].source_url,
            "/nlp/lecture/download.mp4?lecture_id=3"
        );
    }

    #[test]
    fn scenario_week_with_two_videos() {
        let page = r#"
            <div><h2 class="list_header">Week 1 (10:32)</h2></div>
            <ul>
              <li><a href="a.mp4">Intro</a></li>
              <li><a href="b.mp4">Setup</a></li>
            </ul>
        "#;
        let catalog = parse_syllabus(page).unwrap();
        assert_eq!(catalog.section_count(), 1);
        let section = &catalog.sections()[0];
        assert_eq!(section.name, "Week_1");
        let names: Vec<&str> = section.videos.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Intro", "Setup"]);
        assert_eq!(section.videos[0].source_url, "a.mp4");
        assert_eq!(section.videos[1].source_url, "b.mp4");
    }

    #[test]
    fn header_matched_by_class_not_tag() {
        let page = r#"
            <section><span class="title list_header">Week 3</span></section>
            <ol><li><a href="x.mp4">Graphs</a></li></ol>
        "#;
        let catalog = parse_syllabus(page).unwrap();
        assert_eq!(catalog.sections()[0].name, "Week_3");
        assert_eq!(catalog.sections()[0].videos[0].name, "Graphs");
    }

    #[test]
    fn no_headers_is_empty_not_error() {
        let page = "<html><body><form action=\"/login\"><input name=\"email\"></form></body></html>";
        let catalog = parse_syllabus(page).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.status(), CatalogStatus::NoSections);
    }

    #[test]
    fn empty_input_is_empty_catalog() {
        let catalog = parse_syllabus("").unwrap();
        assert_eq!(catalog.status(), CatalogStatus::NoSections);
    }

    #[test]
    fn section_with_empty_list_has_no_videos() {
        let page = r#"<div><h3 class="list_header">Week 1</h3></div><ul></ul>"#;
        let catalog = parse_syllabus(page).unwrap();
        assert_eq!(catalog.section_count(), 1);
        assert_eq!(catalog.video_count(), 0);
    }

    #[test]
    fn header_without_text_is_error() {
        let page = r#"<div><h3 class="list_header">   </h3></div><ul></ul>"#;
        let err = parse_syllabus(page).unwrap_err();
        assert!(matches!(err, ParseError::MissingSectionName { section: 1 }));
    }

    #[test]
    fn header_with_only_unsafe_text_is_error() {
        let page = r#"<div><h3 class="list_header">???</h3></div><ul></ul>"#;
        let err = parse_syllabus(page).unwrap_err();
        assert!(matches!(err, ParseError::EmptySectionName { section: 1, .. }));
    }

    #[test]
    fn header_without_item_list_is_error() {
        let page = r#"
            <div><h3 class="list_header">Week 1</h3></div>
            <ul><li><a href="a.mp4">Intro</a></li></ul>
            <div><h3 class="list_header">Week 2</h3></div>
        "#;
        let err = parse_syllabus(page).unwrap_err();
        match err {
            ParseError::MissingItemList { section, name } => {
                assert_eq!(section, 2);
                assert_eq!(name, "Week_2");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn item_without_title_is_error() {
        let page = r#"
            <div><h3 class="list_header">Week 1</h3></div>
            <ul><li><span>no anchor here</span></li></ul>
        "#;
        let err = parse_syllabus(page).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingVideoName {
                section: 1,
                item: 1
            }
        ));
    }

    #[test]
    fn item_without_media_link_is_error() {
        let page = r#"
            <div><h3 class="list_header">Week 1</h3></div>
            <ul>
              <li><a href="a.mp4">Intro</a></li>
              <li><a href="/slides.pdf">Slides</a></li>
            </ul>
        "#;
        let err = parse_syllabus(page).unwrap_err();
        match err {
            ParseError::MissingMediaLink { section, item, name } => {
                assert_eq!((section, item), (1, 2));
                assert_eq!(name, "Slides");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn tolerates_unclosed_tags() {
        let page = r#"
            <div><h3 class="list_header">Week 1</h3></div>
            <ul>
              <li><a href="a.mp4">Intro</a>
              <li><a href="b.mp4">Setup</a>
            </ul>
        "#;
        let catalog = parse_syllabus(page).unwrap();
        assert_eq!(catalog.video_count(), 2);
    }
}
