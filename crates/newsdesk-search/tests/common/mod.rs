//! Canned pages standing in for the network.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use newsdesk_scraper::{Document, PageSource};

#[derive(Debug, Default)]
pub struct FakePages {
    pages: HashMap<String, String>,
    denied: HashSet<String>,
    pub requested: Vec<String>,
}

impl FakePages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.pages
            .insert(url.to_string(), format!("<html><body>{body}</body></html>"));
        self
    }

    pub fn deny(mut self, url: &str) -> Self {
        self.denied.insert(url.to_string());
        self
    }
}

impl PageSource for FakePages {
    async fn allowed(&mut self, url: &str) -> bool {
        !self.denied.contains(url)
    }

    async fn fetch(&mut self, url: &str) -> Option<Document> {
        self.requested.push(url.to_string());
        if self.denied.contains(url) {
            return None;
        }
        self.pages.get(url).map(|html| Document::parse(url, html))
    }
}

/// `count` article blocks titled `"{title} {i}"` linking to `{base}{slug}-{i}`.
pub fn articles(base: &str, slug: &str, title: &str, count: usize) -> String {
    (0..count)
        .map(|i| format!(r#"<article><h2><a href="{base}{slug}-{i}">{title} {i}</a></h2></article>"#))
        .collect()
}
