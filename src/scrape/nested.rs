// src/scrape/nested.rs
// =============================================================================
// Pulls text fragments out of a wiki page by position rather than by class
// names, which the wiki changes more often than its layout.
//
// A query has three parts:
// - a "preceding" element name, e.g. h3
// - a marker substring that element's text must contain, e.g. "Bachelors"
// - a chain of containing element names, e.g. ul > li > p > a
//
// The document is walked in order as start / text / end events:
// 1. Wait for a preceding element whose text contains the marker
// 2. Then follow the containing chain one level at a time
// 3. Keep every text fragment found at the innermost level
// 4. Once the chain is fully exited again, stop - only the first block
//    after the marker is returned
//
// An element that doesn't fit the chain while we're already at the
// innermost level resets the chain back to the outermost element.
// =============================================================================

use scraper::{ElementRef, Html};

// Returns every text fragment found inside `containing` (outermost first)
// after the first `preceding` element whose text contains `marker`.
//
// Fragments are trimmed and whitespace-only fragments are dropped.
//
// Example:
//   html = "<h3>Bachelors</h3><ul><li><p><a>Alex</a></p></li></ul>"
//   extract_preceded_nested_text(html, "h3", "Bachelors", &["ul", "li", "p", "a"])
//   -> ["Alex"]
pub fn extract_preceded_nested_text(
    html: &str,
    preceding: &str,
    marker: &str,
    containing: &[&str],
) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut state = NestedText::new(preceding, marker, containing);
    walk(document.root_element(), &mut state);
    state.fragments
}

// Depth-first walk that feeds the state machine the same events a
// streaming (SAX) parser would produce.
fn walk(element: ElementRef<'_>, state: &mut NestedText<'_>) {
    let name = element.value().name();
    state.start_element(name);

    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            walk(child_element, state);
        } else if let Some(text) = child.value().as_text() {
            state.text(text);
        }
    }

    state.end_element(name);
}

struct NestedText<'q> {
    preceding: &'q str,
    marker: &'q str,
    containing: &'q [&'q str],

    in_preceding: bool,
    preceding_seen: bool,

    // How many containing elements we are currently inside
    depth: usize,
    capturing: bool,
    done: bool,

    fragments: Vec<String>,
}

impl<'q> NestedText<'q> {
    fn new(preceding: &'q str, marker: &'q str, containing: &'q [&'q str]) -> Self {
        NestedText {
            preceding,
            marker,
            containing,
            in_preceding: false,
            preceding_seen: false,
            depth: 0,
            capturing: false,
            done: false,
            fragments: Vec::new(),
        }
    }

    fn start_element(&mut self, name: &str) {
        if !self.preceding_seen {
            if name.eq_ignore_ascii_case(self.preceding) {
                self.in_preceding = true;
            }
        } else if !self.done {
            if self.depth < self.containing.len() {
                if name.eq_ignore_ascii_case(self.containing[self.depth]) {
                    self.depth += 1;
                    if self.depth == self.containing.len() {
                        self.capturing = true;
                    }
                }
            } else {
                // Unexpected element nested inside the innermost one
                self.depth = 0;
            }
        }
    }

    fn text(&mut self, text: &str) {
        if self.in_preceding {
            if text.contains(self.marker) {
                self.preceding_seen = true;
            }
        } else if self.capturing && self.depth == self.containing.len() {
            let fragment = text.trim();
            if !fragment.is_empty() {
                self.fragments.push(fragment.to_string());
            }
        }
    }

    fn end_element(&mut self, name: &str) {
        if self.in_preceding && name.eq_ignore_ascii_case(self.preceding) {
            self.in_preceding = false;
        } else if !self.done
            && self.depth > 0
            && name.eq_ignore_ascii_case(self.containing[self.depth - 1])
        {
            self.depth -= 1;
            if self.capturing && self.depth == 0 {
                self.capturing = false;
                self.done = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VILLAGERS: &str = r#"
        <html><body>
        <h2><span>Marriage candidates</span></h2>
        <h3><span class="mw-headline">Bachelors</span></h3>
        <ul>
            <li><p><a href="/Alex">Alex</a></p></li>
            <li><p><a href="/Elliott">Elliott</a></p></li>
        </ul>
        <h3><span class="mw-headline">Bachelorettes</span></h3>
        <ul>
            <li><p><a href="/Abigail">Abigail</a></p></li>
        </ul>
        </body></html>
    "#;

    #[test]
    fn test_extracts_first_block_after_marker() {
        let names = extract_preceded_nested_text(VILLAGERS, "h3", "Bachelors", &["ul", "li", "p", "a"]);
        assert_eq!(names, vec!["Alex", "Elliott"]);
    }

    #[test]
    fn test_marker_substring_selects_later_heading() {
        let names =
            extract_preceded_nested_text(VILLAGERS, "h3", "Bachelorettes", &["ul", "li", "p", "a"]);
        assert_eq!(names, vec!["Abigail"]);
    }

    #[test]
    fn test_missing_marker_gives_nothing() {
        let names = extract_preceded_nested_text(VILLAGERS, "h3", "Farm animals", &["ul", "li", "p", "a"]);
        assert!(names.is_empty());
    }

    #[test]
    fn test_element_names_ignore_case() {
        let names = extract_preceded_nested_text(VILLAGERS, "H3", "Bachelors", &["UL", "Li", "P", "A"]);
        assert_eq!(names, vec!["Alex", "Elliott"]);
    }

    #[test]
    fn test_table_cells() {
        let html = r#"
            <table><tr>
                <td>Best Gifts:</td>
                <td>
                    <span class="nametemplate"><img src="x.png"> <a href="/Spaghetti">Spaghetti</a></span>
                    <span class="nametemplate"><a href="/Peach">Peach</a></span>
                </td>
            </tr></table>
        "#;
        let gifts = extract_preceded_nested_text(html, "td", "Best Gifts", &["td", "span", "a"]);
        assert_eq!(gifts, vec!["Spaghetti", "Peach"]);
    }

    #[test]
    fn test_text_between_links_is_skipped() {
        let html = r#"
            <h4>Universal Loves exceptions</h4>
            <ul>
                <li><a>Haley</a> doesn't love <a>Prismatic Shard</a>.</li>
                <li><a>Penny</a> doesn't love <a>Wine</a>.</li>
            </ul>
        "#;
        let pairs = extract_preceded_nested_text(html, "h4", "exceptions", &["ul", "li", "a"]);
        assert_eq!(pairs, vec!["Haley", "Prismatic Shard", "Penny", "Wine"]);
    }

    #[test]
    fn test_text_before_marker_is_ignored() {
        let html = r#"
            <ul><li><a>Too early</a></li></ul>
            <h3>Universal Loves</h3>
            <ul><li><span><a>Rabbit's Foot</a></span></li></ul>
        "#;
        let gifts = extract_preceded_nested_text(html, "h3", "Universal Loves", &["ul", "li", "span", "a"]);
        assert_eq!(gifts, vec!["Rabbit's Foot"]);
    }
}
