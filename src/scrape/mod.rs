// src/scrape/mod.rs
// =============================================================================
// HTML text extraction for wiki pages.
//
// We use the `scraper` crate to parse the page into a DOM, then walk it in
// document order to find text that sits at a known position relative to a
// heading or table cell.
// =============================================================================

mod nested;

pub use nested::extract_preceded_nested_text;
