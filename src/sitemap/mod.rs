//! `sitemap.xml` document model and serializer.
//!
//! Entries are collected as records and rendered in one pass by a quick-xml
//! writer, so text is always escaped and the document is either complete or
//! not produced at all.

use std::fmt;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use thiserror::Error;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("sitemap query failed")]
    Generation(#[from] sea_orm::DbErr),

    #[error("sitemap rendering failed: {0}")]
    Render(String),
}

impl IntoResponse for SitemapError {
    fn into_response(self) -> Response {
        match &self {
            SitemapError::Generation(source) => {
                tracing::error!(error = %source, "sitemap generation error");
            }
            SitemapError::Render(reason) => {
                tracing::error!(error = %reason, "sitemap generation error");
            }
        }
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            "Error generating sitemap",
        )
            .into_response()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Daily,
    Weekly,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
        }
    }
}

/// Crawl priority in `0.0..=1.0`, rendered with one decimal.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Priority(f32);

impl Priority {
    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: NaiveDate,
    pub change_frequency: ChangeFrequency,
    pub priority: Priority,
}

#[derive(Debug, Clone, Default)]
pub struct UrlSet {
    entries: Vec<SitemapEntry>,
}

impl UrlSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: SitemapEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[SitemapEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_xml(&self) -> Result<String, SitemapError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        emit(
            &mut writer,
            Event::Start(BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NS)])),
        )?;
        for entry in &self.entries {
            emit(&mut writer, Event::Start(BytesStart::new("url")))?;
            text_element(&mut writer, "loc", &entry.url)?;
            text_element(
                &mut writer,
                "lastmod",
                &entry.last_modified.format("%Y-%m-%d").to_string(),
            )?;
            text_element(&mut writer, "changefreq", entry.change_frequency.as_str())?;
            text_element(&mut writer, "priority", &entry.priority.to_string())?;
            emit(&mut writer, Event::End(BytesEnd::new("url")))?;
        }
        emit(&mut writer, Event::End(BytesEnd::new("urlset")))?;

        String::from_utf8(writer.into_inner()).map_err(|err| SitemapError::Render(err.to_string()))
    }
}

fn text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<(), SitemapError> {
    emit(writer, Event::Start(BytesStart::new(name)))?;
    emit(writer, Event::Text(BytesText::new(text)))?;
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), SitemapError> {
    writer
        .write_event(event)
        .map_err(|err| SitemapError::Render(err.to_string()))
}

/// URL slug for a collection: the stored slug, or the name lowercased with
/// every whitespace run replaced by a hyphen.
pub fn collection_slug(name: &str, slug: Option<&str>) -> String {
    if let Some(slug) = slug.filter(|s| !s.is_empty()) {
        return slug.to_string();
    }
    let mut out = String::with_capacity(name.len());
    let mut in_space = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('-');
            }
            in_space = true;
        } else {
            out.extend(ch.to_lowercase());
            in_space = false;
        }
    }
    out
}
