use log::{debug, warn};

use crate::page::{ClickEvent, Page, ScrollToOptions};

/// Handle a click delegated from the TOC list.
///
/// Clicks on anything but an anchor pass through untouched. For an anchor
/// the default navigation is suppressed and the page smoothly scrolls so
/// the linked element sits `offset` pixels below the viewport top.
/// Returns the requested scroll position, if any.
pub fn handle_click(page: &mut Page, event: &mut ClickEvent, offset: f64) -> Option<f64> {
    let doc = page.document();
    if doc.tag_name(event.target) != Some("a") {
        return None;
    }

    event.prevent_default();

    let href = doc.get_attribute(event.target, "href").unwrap_or_default();
    let Some(target_id) = href.strip_prefix('#') else {
        warn!("TOC link '{}' is not an in-page anchor", href);
        return None;
    };

    let Some(target) = doc.get_element_by_id(target_id) else {
        warn!("TOC link target '#{}' not found in the page", target_id);
        return None;
    };

    let scroll_y = page.scroll_y();
    let element_position = doc.bounding_client_rect(target, scroll_y).top;
    let offset_position = element_position + scroll_y - offset;

    debug!("Navigating to '#{}' at {}", target_id, offset_position);
    page.scroll_to(ScrollToOptions::smooth(offset_position));
    Some(offset_position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{parse_html, LayoutBox};
    use crate::page::ScrollTarget;

    fn page_with_link(href: &str) -> (Page, crate::dom::NodeId) {
        let mut doc = parse_html(&format!(
            "<body><ul id=tocList><li><a href=\"{}\">Background</a><span>x</span></li></ul><h3 id=heading-1>Background</h3></body>",
            href
        ));
        let heading = doc.get_element_by_id("heading-1").unwrap();
        doc.set_layout(heading, LayoutBox::new(1200.0, 30.0));
        let link = doc.select_first(doc.root(), "a").unwrap().unwrap();
        (Page::new(doc), link)
    }

    #[test]
    fn test_click_scrolls_with_offset() {
        let (mut page, link) = page_with_link("#heading-1");
        page.scroll_to(ScrollToOptions::instant(300.0));

        let mut event = ClickEvent::new(link);
        assert_eq!(handle_click(&mut page, &mut event, 80.0), Some(1120.0));
        assert!(event.default_prevented());

        let pending = page.pending_scroll_animations();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].target, ScrollTarget::Window);
        assert_eq!(pending[0].options, ScrollToOptions::smooth(1120.0));
        assert_eq!(page.scroll_y(), 300.0);
    }

    #[test]
    fn test_missing_target_is_swallowed() {
        let (mut page, link) = page_with_link("#gone");
        let mut event = ClickEvent::new(link);
        assert_eq!(handle_click(&mut page, &mut event, 80.0), None);
        assert!(event.default_prevented());
        assert!(page.scroll_history().is_empty());
    }

    #[test]
    fn test_non_anchor_click_passes_through() {
        let (mut page, _) = page_with_link("#heading-1");
        let span = page.document().select_first(page.document().root(), "span").unwrap().unwrap();
        let mut event = ClickEvent::new(span);
        assert_eq!(handle_click(&mut page, &mut event, 80.0), None);
        assert!(!event.default_prevented());
    }
}
