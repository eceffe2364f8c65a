//! EDN page encoding.
//!
//! Pages become a map with keyword keys:
//!
//! ```text
//! {:title "Hello" :properties {:id "n1" :created "..." :updated "..."} :blocks [{:id "..." :content "..."}]}
//! ```

use std::fmt::{self, Write as _};

use crate::domain::{Block, Page};

/// The subset of EDN needed for pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edn {
    Str(String),
    Keyword(String),
    Vector(Vec<Edn>),
    Map(Vec<(Edn, Edn)>),
}

impl Edn {
    fn string(s: &str) -> Self {
        Edn::Str(s.to_string())
    }

    fn entry(key: &str, value: Edn) -> (Edn, Edn) {
        (Edn::Keyword(key.to_string()), value)
    }
}

impl fmt::Display for Edn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edn::Str(s) => write_string(f, s),
            Edn::Keyword(k) => write!(f, ":{k}"),
            Edn::Vector(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(' ')?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            Edn::Map(entries) => {
                f.write_char('{')?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_char(' ')?;
                    }
                    write!(f, "{key} {value}")?;
                }
                f.write_char('}')
            }
        }
    }
}

fn write_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_control() => write!(f, "\\u{:04x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

fn block_to_edn(block: &Block) -> Edn {
    Edn::Map(vec![
        Edn::entry("id", Edn::string(&block.id)),
        Edn::entry("content", Edn::string(&block.content)),
    ])
}

/// Converts a page to its EDN value.
pub fn page_to_edn_value(page: &Page) -> Edn {
    let props = &page.properties;
    let mut properties = vec![
        Edn::entry("id", Edn::string(&props.id)),
        Edn::entry("created", Edn::string(&props.created)),
        Edn::entry("updated", Edn::string(&props.updated)),
    ];
    if !props.tags.is_empty() {
        let tags = props.tags.iter().map(|t| Edn::string(t)).collect();
        properties.push(Edn::entry("tags", Edn::Vector(tags)));
    }

    Edn::Map(vec![
        Edn::entry("title", Edn::string(&page.title)),
        Edn::entry("properties", Edn::Map(properties)),
        Edn::entry(
            "blocks",
            Edn::Vector(page.blocks.iter().map(block_to_edn).collect()),
        ),
    ])
}

/// Encodes a page as EDN text.
pub fn page_to_edn(page: &Page) -> String {
    page_to_edn_value(page).to_string()
}
