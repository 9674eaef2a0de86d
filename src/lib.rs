//! Scroll-synchronized floating table of contents for article pages.
//!
//! The crate scans an article's `h2`-`h6` headings, builds a nested list of
//! links inside a `#floatingTOC` panel and highlights the link of the
//! heading the reader has reached. The page itself is modelled by
//! [`dom::Document`] and [`page::Page`]; the host owns both and drives
//! events, animation frames and layout.
//!
//! ```no_run
//! use floating_toc::{install, parse_html, Page, TocConfig};
//!
//! let html = std::fs::read_to_string("_site/post.html")?;
//! let mut page = Page::new(parse_html(&html));
//! let toc = install(&mut page, TocConfig::default())?;
//! println!("{}", toc.outline_json()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod dom;
pub mod page;
pub mod toc;
pub mod utils;

pub use config::{load_config, load_config_file, TocClasses, TocConfig};
pub use dom::{parse_html, Document, LayoutBox, NodeId, Position, Selector};
pub use page::{ClickEvent, FrameThrottle, Page, ReadyState, ScrollBehavior, ScrollToOptions};
pub use toc::{install, FloatingToc, HeadingRecord, TocEntry, TocStatus};
pub use utils::error::{BoxResult, TocError};
pub use utils::logging::init_logging;
